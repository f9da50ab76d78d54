use crate::domain::model::PropertyType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the price facet. A `+` in a query string maps here.
pub const PRICE_CEILING: u64 = 5_000_000;

/// Upper bound of the area facet, in square feet.
pub const AREA_CEILING: u64 = 20_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    All,
    Sale,
    Rent,
}

impl FromStr for ListingType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(ListingType::All),
            "sale" | "buy" => Ok(ListingType::Sale),
            "rent" => Ok(ListingType::Rent),
            other => Err(format!("unknown listing type '{}'", other)),
        }
    }
}

/// The property-type facet: either every type or exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PropertyTypeFilter {
    #[default]
    All,
    Only(PropertyType),
}

impl PropertyTypeFilter {
    pub fn accepts(self, property_type: PropertyType) -> bool {
        match self {
            PropertyTypeFilter::All => true,
            PropertyTypeFilter::Only(wanted) => wanted == property_type,
        }
    }
}

impl From<PropertyType> for PropertyTypeFilter {
    fn from(value: PropertyType) -> Self {
        PropertyTypeFilter::Only(value)
    }
}

impl FromStr for PropertyTypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") || s.trim().is_empty() {
            return Ok(PropertyTypeFilter::All);
        }
        s.parse::<PropertyType>().map(PropertyTypeFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    PriceAsc,
    PriceDesc,
    Newest,
    Popular,
}

impl SortOrder {
    pub const ALL: [SortOrder; 4] = [
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::Newest,
        SortOrder::Popular,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SortOrder::PriceAsc => "price_asc",
            SortOrder::PriceDesc => "price_desc",
            SortOrder::Newest => "newest",
            SortOrder::Popular => "popular",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.slug() == slug)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slug(s.trim()).ok_or_else(|| format!("unknown sort order '{}'", s))
    }
}

/// Inclusive `[min, max]` bounds. Always stored with `min <= max <= ceiling`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Range {
    min: u64,
    max: u64,
}

impl Range {
    /// Builds a range, swapping out-of-order bounds and clamping both to `ceiling`.
    pub fn normalized(a: u64, b: u64, ceiling: u64) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min: lo.min(ceiling),
            max: hi.min(ceiling),
        }
    }

    pub fn min(&self) -> u64 {
        self.min
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn contains(&self, value: u64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// The complete value of every facet driving a search.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "StoredFilterState")]
pub struct FilterState {
    listing_type: ListingType,
    property_type: PropertyTypeFilter,
    price_range: Range,
    area_range: Range,
    search_term: String,
    sort_order: SortOrder,
}

#[derive(Deserialize)]
struct StoredRange {
    min: u64,
    max: u64,
}

// Deserialized shape; ranges pass through `Range::normalized` on the way in.
#[derive(Deserialize)]
struct StoredFilterState {
    listing_type: ListingType,
    property_type: PropertyTypeFilter,
    price_range: StoredRange,
    area_range: StoredRange,
    search_term: String,
    sort_order: SortOrder,
}

impl From<StoredFilterState> for FilterState {
    fn from(stored: StoredFilterState) -> Self {
        Self {
            listing_type: stored.listing_type,
            property_type: stored.property_type,
            price_range: Range::normalized(
                stored.price_range.min,
                stored.price_range.max,
                PRICE_CEILING,
            ),
            area_range: Range::normalized(
                stored.area_range.min,
                stored.area_range.max,
                AREA_CEILING,
            ),
            search_term: stored.search_term,
            sort_order: stored.sort_order,
        }
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            listing_type: ListingType::All,
            property_type: PropertyTypeFilter::All,
            price_range: Range::normalized(0, PRICE_CEILING, PRICE_CEILING),
            area_range: Range::normalized(0, AREA_CEILING, AREA_CEILING),
            search_term: String::new(),
            sort_order: SortOrder::PriceAsc,
        }
    }
}

impl FilterState {
    pub fn listing_type(&self) -> ListingType {
        self.listing_type
    }

    pub fn property_type(&self) -> PropertyTypeFilter {
        self.property_type
    }

    pub fn price_range(&self) -> Range {
        self.price_range
    }

    pub fn area_range(&self) -> Range {
        self.area_range
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    pub fn set_listing_type(&mut self, listing_type: ListingType) {
        self.listing_type = listing_type;
    }

    pub fn set_property_type(&mut self, property_type: PropertyTypeFilter) {
        self.property_type = property_type;
    }

    pub fn set_price_range(&mut self, min: u64, max: u64) {
        self.price_range = Range::normalized(min, max, PRICE_CEILING);
    }

    pub fn set_area_range(&mut self, min: u64, max: u64) {
        self.area_range = Range::normalized(min, max, AREA_CEILING);
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn set_sort_order(&mut self, sort_order: SortOrder) {
        self.sort_order = sort_order;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Overlays every field the patch carries; absent fields keep their value.
    pub fn apply_patch(&mut self, patch: FilterPatch) {
        if let Some(listing_type) = patch.listing_type {
            self.set_listing_type(listing_type);
        }
        if let Some(property_type) = patch.property_type {
            self.set_property_type(property_type);
        }
        if let Some((min, max)) = patch.price_range {
            self.set_price_range(min, max);
        }
        if let Some((min, max)) = patch.area_range {
            self.set_area_range(min, max);
        }
        if let Some(term) = patch.search_term {
            self.set_search_term(term);
        }
        if let Some(sort_order) = patch.sort_order {
            self.set_sort_order(sort_order);
        }
    }

    pub fn with_patch(mut self, patch: FilterPatch) -> Self {
        self.apply_patch(patch);
        self
    }
}

/// A partial filter state, as recovered from a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub listing_type: Option<ListingType>,
    pub property_type: Option<PropertyTypeFilter>,
    pub price_range: Option<(u64, u64)>,
    pub area_range: Option<(u64, u64)>,
    pub search_term: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl FilterPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
