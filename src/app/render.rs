//! Plain-text, JSON and CSV renderings of search output for the CLI.

use crate::core::engine::Page;
use crate::core::map_view::{MapMarker, MapView};
use crate::domain::model::{format_compact_price, format_full_price, PriceUnit, Property};
use crate::utils::error::Result;
use serde::Serialize;
use std::io::Write;

/// Flat CSV row; optional fields become empty cells.
#[derive(Debug, Serialize)]
struct PropertyRow<'a> {
    id: &'a str,
    title: &'a str,
    price: u64,
    price_unit: PriceUnit,
    location: &'a str,
    property_type: &'static str,
    beds: Option<u32>,
    baths: Option<u32>,
    area: Option<u64>,
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl<'a> From<&'a Property> for PropertyRow<'a> {
    fn from(p: &'a Property) -> Self {
        Self {
            id: &p.id,
            title: &p.title,
            price: p.price,
            price_unit: p.price_unit,
            location: &p.location,
            property_type: p.property_type.label(),
            beds: p.beds,
            baths: p.baths,
            area: p.area,
            latitude: p.coordinates.map(|c| c.latitude),
            longitude: p.coordinates.map(|c| c.longitude),
        }
    }
}

pub fn write_csv<W: Write>(out: W, properties: &[&Property]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for property in properties {
        writer.serialize(PropertyRow::from(*property))?;
    }
    writer.flush()?;
    Ok(())
}

#[derive(Debug, Serialize)]
struct MarkerRow<'a> {
    id: &'a str,
    latitude: f64,
    longitude: f64,
    title: &'a str,
    location: &'a str,
    price_label: &'a str,
}

pub fn write_marker_csv<W: Write>(out: W, markers: &[MapMarker]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for m in markers {
        writer.serialize(MarkerRow {
            id: &m.id,
            latitude: m.position.latitude,
            longitude: m.position.longitude,
            title: &m.title,
            location: &m.location,
            price_label: &m.price_label,
        })?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write, T: Serialize + ?Sized>(mut out: W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

/// One card-style line: `[id] Title | $1.3M | House | Beverly Hills, CA | 5 bd 4 ba 4200 sqft`.
pub fn property_line(p: &Property) -> String {
    let mut price = format_compact_price(p.price);
    if p.price_unit == PriceUnit::Rent {
        price.push_str("/mo");
    }

    let mut specs = Vec::new();
    if let Some(beds) = p.beds {
        specs.push(format!("{} bd", beds));
    }
    if let Some(baths) = p.baths {
        specs.push(format!("{} ba", baths));
    }
    if let Some(area) = p.area {
        specs.push(format!("{} sqft", area));
    }

    let mut line = format!(
        "[{}] {} | {} | {} | {}",
        p.id, p.title, price, p.property_type, p.location
    );
    if !specs.is_empty() {
        line.push_str(" | ");
        line.push_str(&specs.join(" "));
    }
    line
}

pub fn write_page_table<W: Write>(mut out: W, page: &Page<'_>) -> Result<()> {
    let noun = if page.total_items == 1 { "Property" } else { "Properties" };
    writeln!(out, "{} {} Found", page.total_items, noun)?;
    if page.items.is_empty() {
        writeln!(out, "No properties found. Try adjusting your search criteria.")?;
        return Ok(());
    }
    for property in &page.items {
        writeln!(out, "  {}", property_line(property))?;
    }
    writeln!(
        out,
        "Page {} of {}{}{}",
        page.number,
        page.total_pages,
        if page.has_previous { " | previous" } else { "" },
        if page.has_next { " | next" } else { "" }
    )?;
    Ok(())
}

pub fn write_detail<W: Write>(mut out: W, p: &Property) -> Result<()> {
    writeln!(out, "{}", p.title)?;
    writeln!(out, "  Price:     {}", format_full_price(p.price, p.price_unit))?;
    writeln!(out, "  Type:      {}", p.property_type)?;
    writeln!(out, "  Location:  {}", p.location)?;
    if let Some(beds) = p.beds {
        writeln!(out, "  Beds:      {}", beds)?;
    }
    if let Some(baths) = p.baths {
        writeln!(out, "  Baths:     {}", baths)?;
    }
    if let Some(area) = p.area {
        writeln!(out, "  Area:      {} sqft", area)?;
    }
    if let Some(c) = p.coordinates {
        writeln!(out, "  Position:  {:.4}, {:.4}", c.latitude, c.longitude)?;
    }
    writeln!(out, "  Image:     {}", p.image_url)?;
    Ok(())
}

pub fn write_map_table<W: Write>(mut out: W, view: &MapView) -> Result<()> {
    let center = view.center();
    writeln!(
        out,
        "Map centered at {:.4}, {:.4} (zoom {}), {} tiles: {}",
        center.latitude,
        center.longitude,
        view.zoom(),
        view.layer().name(),
        view.layer().tile_url()
    )?;
    writeln!(out, "  {}", view.layer().attribution())?;
    writeln!(out, "{} markers", view.markers().len())?;
    for marker in view.markers() {
        writeln!(out, "  {}", marker_line(marker))?;
    }
    Ok(())
}

pub fn marker_line(marker: &MapMarker) -> String {
    format!(
        "[{}] {:.4}, {:.4} | {} | {} | {}",
        marker.id,
        marker.position.latitude,
        marker.position.longitude,
        marker.title,
        marker.price_label,
        marker.location
    )
}
