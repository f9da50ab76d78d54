//! Map projection: the reduced-facet search that feeds map markers.
//!
//! Only geocoded properties are eligible. The map filter knows property type,
//! an optional price window and a location substring; it has no area facet and
//! no sort order. Base-layer selection lives on [`MapView`] and never triggers
//! a new projection.

use crate::core::matcher::{contains_ignore_case, matches_property_type};
use crate::domain::filter::PropertyTypeFilter;
use crate::domain::inventory::Inventory;
use crate::domain::model::{format_full_price, Coordinates, Property};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const DEFAULT_CENTER: Coordinates = Coordinates {
    latitude: 37.0902,
    longitude: -95.7129,
};
pub const DEFAULT_ZOOM: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseLayer {
    #[default]
    Standard,
    Satellite,
}

impl BaseLayer {
    pub fn name(self) -> &'static str {
        match self {
            BaseLayer::Standard => "standard",
            BaseLayer::Satellite => "satellite",
        }
    }

    pub fn tile_url(self) -> &'static str {
        match self {
            BaseLayer::Standard => "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            BaseLayer::Satellite => {
                "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}"
            }
        }
    }

    pub fn attribution(self) -> &'static str {
        match self {
            BaseLayer::Standard => "© OpenStreetMap contributors",
            BaseLayer::Satellite => "Tiles © Esri",
        }
    }
}

impl FromStr for BaseLayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "map" => Ok(BaseLayer::Standard),
            "satellite" => Ok(BaseLayer::Satellite),
            other => Err(format!("unknown base layer '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapFilter {
    property_type: PropertyTypeFilter,
    min_price: Option<u64>,
    max_price: Option<u64>,
    location: String,
}

impl MapFilter {
    pub fn property_type(&self) -> PropertyTypeFilter {
        self.property_type
    }

    pub fn min_price(&self) -> Option<u64> {
        self.min_price
    }

    pub fn max_price(&self) -> Option<u64> {
        self.max_price
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn set_property_type(&mut self, property_type: PropertyTypeFilter) {
        self.property_type = property_type;
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    pub fn set_price_bounds(&mut self, min: Option<u64>, max: Option<u64>) {
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => {
                self.min_price = Some(hi);
                self.max_price = Some(lo);
            }
            _ => {
                self.min_price = min;
                self.max_price = max;
            }
        }
    }

    /// Free-text minimum price. Blank clears the bound; unparsable text is
    /// discarded and the previous bound is kept.
    pub fn set_min_price_text(&mut self, text: &str) {
        if let Some(min) = parse_price_text(text) {
            self.set_price_bounds(min, self.max_price);
        }
    }

    /// Counterpart of [`MapFilter::set_min_price_text`] for the upper bound.
    pub fn set_max_price_text(&mut self, text: &str) {
        if let Some(max) = parse_price_text(text) {
            self.set_price_bounds(self.min_price, max);
        }
    }

    pub fn matches(&self, property: &Property) -> bool {
        if property.coordinates.is_none() {
            return false;
        }
        if !matches_property_type(property, self.property_type) {
            return false;
        }
        if self.min_price.is_some_and(|min| property.price < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.price > max) {
            return false;
        }
        self.location.is_empty()
            || contains_ignore_case(&property.location, &self.location.to_lowercase())
    }
}

// Outer None: reject the input. Inner None: clear the bound.
fn parse_price_text(text: &str) -> Option<Option<u64>> {
    let cleaned: String = text
        .trim()
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | '_'))
        .collect();
    if cleaned.is_empty() {
        return Some(None);
    }
    if !cleaned.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    cleaned.parse().ok().map(Some)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub id: String,
    pub position: Coordinates,
    pub title: String,
    pub location: String,
    pub price_label: String,
    pub image_url: String,
}

impl MapMarker {
    fn from_property(property: &Property, position: Coordinates) -> Self {
        Self {
            id: property.id.clone(),
            position,
            title: property.title.clone(),
            location: property.location.clone(),
            price_label: format_full_price(property.price, property.price_unit),
            image_url: property.image_url.clone(),
        }
    }
}

pub fn project(inventory: &Inventory, filter: &MapFilter) -> Vec<MapMarker> {
    inventory
        .properties()
        .iter()
        .filter(|p| filter.matches(p))
        .filter_map(|p| p.coordinates.map(|c| MapMarker::from_property(p, c)))
        .collect()
}

/// State behind the map page: viewport, tile layer, filter and current markers.
#[derive(Debug, Clone)]
pub struct MapView {
    inventory: Inventory,
    center: Coordinates,
    zoom: u8,
    layer: BaseLayer,
    filter: MapFilter,
    markers: Vec<MapMarker>,
    projections: u64,
}

impl MapView {
    pub fn new(inventory: Inventory) -> Self {
        Self::with_viewport(inventory, DEFAULT_CENTER, DEFAULT_ZOOM, BaseLayer::default())
    }

    pub fn with_viewport(
        inventory: Inventory,
        center: Coordinates,
        zoom: u8,
        layer: BaseLayer,
    ) -> Self {
        let mut view = Self {
            inventory,
            center,
            zoom,
            layer,
            filter: MapFilter::default(),
            markers: Vec::new(),
            projections: 0,
        };
        view.reproject();
        view
    }

    pub fn center(&self) -> Coordinates {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn layer(&self) -> BaseLayer {
        self.layer
    }

    pub fn filter(&self) -> &MapFilter {
        &self.filter
    }

    pub fn markers(&self) -> &[MapMarker] {
        &self.markers
    }

    /// How many times the marker set has been recomputed.
    pub fn projections(&self) -> u64 {
        self.projections
    }

    /// Swaps the tile layer. Markers are left untouched.
    pub fn set_layer(&mut self, layer: BaseLayer) {
        self.layer = layer;
    }

    /// Replaces the filter and recomputes the markers.
    pub fn apply_filter(&mut self, filter: MapFilter) {
        self.filter = filter;
        self.reproject();
    }

    fn reproject(&mut self) {
        self.markers = project(&self.inventory, &self.filter);
        self.projections += 1;
        tracing::debug!(
            "Map projection #{} produced {} markers",
            self.projections,
            self.markers.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PriceUnit, PropertyType};

    fn listing(
        id: &str,
        price: u64,
        kind: PropertyType,
        location: &str,
        coordinates: Option<Coordinates>,
    ) -> Property {
        Property {
            id: id.to_string(),
            title: format!("Listing {}", id),
            price,
            price_unit: PriceUnit::Sale,
            location: location.to_string(),
            property_type: kind,
            beds: None,
            baths: None,
            area: Some(1_000),
            image_url: String::new(),
            coordinates,
        }
    }

    fn inventory() -> Inventory {
        Inventory::new(vec![
            listing(
                "1",
                1_250_000,
                PropertyType::House,
                "Beverly Hills, CA",
                Some(Coordinates::new(34.0736, -118.4004)),
            ),
            listing(
                "3",
                850_000,
                PropertyType::Land,
                "Lake Tahoe, NV",
                Some(Coordinates::new(39.0968, -120.0324)),
            ),
            listing("9", 685_000, PropertyType::House, "Portland, OR", None),
        ])
        .unwrap()
    }

    fn marker_ids(markers: &[MapMarker]) -> Vec<&str> {
        markers.iter().map(|m| m.id.as_str()).collect()
    }

    #[test]
    fn test_only_geocoded_properties_are_projected() {
        let markers = project(&inventory(), &MapFilter::default());
        assert_eq!(marker_ids(&markers), vec!["1", "3"]);
        assert_eq!(markers[0].price_label, "$1,250,000");
    }

    #[test]
    fn test_property_type_and_location_facets() {
        let mut filter = MapFilter::default();
        filter.set_property_type(PropertyType::House.into());
        assert_eq!(marker_ids(&project(&inventory(), &filter)), vec!["1"]);

        let mut filter = MapFilter::default();
        filter.set_location("tahoe");
        assert_eq!(marker_ids(&project(&inventory(), &filter)), vec!["3"]);
    }

    #[test]
    fn test_price_text_inputs() {
        let mut filter = MapFilter::default();
        filter.set_min_price_text("$900,000");
        assert_eq!(filter.min_price(), Some(900_000));
        assert_eq!(marker_ids(&project(&inventory(), &filter)), vec!["1"]);

        filter.set_min_price_text("lots");
        assert_eq!(filter.min_price(), Some(900_000));

        filter.set_max_price_text("100000");
        assert_eq!(filter.min_price(), Some(100_000));
        assert_eq!(filter.max_price(), Some(900_000));
        assert_eq!(marker_ids(&project(&inventory(), &filter)), vec!["3"]);

        filter.set_min_price_text("");
        assert_eq!(filter.min_price(), None);
    }

    #[test]
    fn test_layer_change_does_not_reproject() {
        let mut view = MapView::new(inventory());
        assert_eq!(view.projections(), 1);
        assert_eq!(view.center(), DEFAULT_CENTER);
        assert_eq!(view.zoom(), DEFAULT_ZOOM);

        view.set_layer(BaseLayer::Satellite);
        assert_eq!(view.projections(), 1);
        assert_eq!(view.layer(), BaseLayer::Satellite);
        assert_eq!(view.markers().len(), 2);

        let mut filter = view.filter().clone();
        filter.set_property_type(PropertyType::Land.into());
        view.apply_filter(filter);
        assert_eq!(view.projections(), 2);
        assert_eq!(marker_ids(view.markers()), vec!["3"]);
    }

    #[test]
    fn test_base_layer_parsing() {
        assert_eq!("satellite".parse::<BaseLayer>(), Ok(BaseLayer::Satellite));
        assert_eq!("Map".parse::<BaseLayer>(), Ok(BaseLayer::Standard));
        assert!("terrain".parse::<BaseLayer>().is_err());
    }
}
