use anyhow::Result;
use property_discovery::adapters::inventory::{source_for, BuiltinInventory, JsonFileInventory};
use property_discovery::app::session::TracingNotifier;
use property_discovery::core::query_codec::{decode_state, encode};
use property_discovery::core::{
    FilterState, Inventory, InventorySource, ListingType, PropertyType, PropertyTypeFilter,
    SortOrder,
};
use property_discovery::{DiscoveryEngine, DiscoveryError, SearchSession};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

async fn builtin_engine() -> Result<DiscoveryEngine> {
    Ok(DiscoveryEngine::new(BuiltinInventory.load().await?))
}

fn ids(engine: &DiscoveryEngine, query: &str) -> Vec<String> {
    engine
        .run(&decode_state(query))
        .items()
        .iter()
        .map(|p| p.id.clone())
        .collect()
}

#[tokio::test]
async fn test_rent_filter_sorted_by_price() -> Result<()> {
    let engine = builtin_engine().await?;
    assert_eq!(ids(&engine, "?type=rent"), ["6", "8", "2", "4"]);
    Ok(())
}

#[tokio::test]
async fn test_price_range_queries() -> Result<()> {
    let engine = builtin_engine().await?;

    // Hero search form submits "1000000+" unescaped.
    assert_eq!(ids(&engine, "priceRange=1000000+"), ["1", "7"]);
    assert_eq!(ids(&engine, "priceRange=1000000-%2B"), ["1", "7"]);
    assert_eq!(ids(&engine, "priceRange=0-500000"), ["6", "8", "2", "4", "5"]);
    // Nothing in the catalog sits between 100k and 250k; the 850k plot stays out.
    let mid_range = ids(&engine, "priceRange=100000-250000");
    assert!(!mid_range.iter().any(|id| id == "3"));
    assert!(mid_range.is_empty());
    // Reversed bounds are swapped, not rejected.
    assert_eq!(ids(&engine, "priceRange=500000-0"), ["6", "8", "2", "4", "5"]);
    Ok(())
}

#[tokio::test]
async fn test_price_desc_orders_whole_catalog() -> Result<()> {
    let engine = builtin_engine().await?;
    assert_eq!(
        ids(&engine, "sort=price_desc"),
        ["7", "1", "3", "9", "5", "4", "2", "8", "6"]
    );
    Ok(())
}

#[tokio::test]
async fn test_property_type_and_search_term() -> Result<()> {
    let engine = builtin_engine().await?;
    assert_eq!(ids(&engine, "propertyType=land"), ["3"]);
    assert_eq!(ids(&engine, "location=TAHOE"), ["3"]);
    assert_eq!(ids(&engine, "type=buy&propertyType=house&location=aspen"), ["5"]);
    assert!(ids(&engine, "propertyType=land&type=rent").is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unknown_values_fall_back_to_defaults() -> Result<()> {
    let engine = builtin_engine().await?;
    let all = ids(&engine, "");
    assert_eq!(all.len(), 9);
    assert_eq!(ids(&engine, "type=lease&propertyType=castle&sort=cheapest"), all);
    assert_eq!(ids(&engine, "priceRange=abc-def&utm_source=mail"), all);
    Ok(())
}

#[tokio::test]
async fn test_search_is_idempotent() -> Result<()> {
    let engine = builtin_engine().await?;
    let filter = decode_state("type=buy&priceRange=100000-2000000&sort=popular");
    let first: Vec<_> = engine.run(&filter).items().to_vec();
    let second: Vec<_> = engine.run(&filter).items().to_vec();
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_filter_state_survives_query_round_trip() {
    let mut state = FilterState::default();
    state.set_listing_type(ListingType::Rent);
    state.set_property_type(PropertyTypeFilter::Only(PropertyType::Apartment));
    state.set_price_range(1_000, 6_000);
    state.set_search_term("Chicago, IL");
    state.set_sort_order(SortOrder::Newest);

    let query = encode(&state);
    assert_eq!(decode_state(&query), state);
    assert_eq!(encode(&FilterState::default()), "");
}

#[tokio::test]
async fn test_session_paging_and_share_link() -> Result<()> {
    let engine = builtin_engine().await?;
    let mut session = SearchSession::new(engine, 4, Arc::new(TracingNotifier));
    assert_eq!(session.count(), 9);

    session.set_page(3);
    let page = session.current_page();
    assert_eq!(page.number, 3);
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.items.len(), 1);
    assert!(!page.has_next);

    session.set_listing_type(ListingType::Rent);
    assert_eq!(session.current_page().number, 1);
    assert_eq!(session.apply(), "type=rent");
    Ok(())
}

#[tokio::test]
async fn test_featured_tabs() -> Result<()> {
    let engine = builtin_engine().await?;
    let rent: Vec<_> = engine
        .featured(ListingType::Rent, 3)
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(rent, ["2", "4", "6"]);
    assert_eq!(engine.featured(ListingType::All, 6).len(), 6);
    assert_eq!(engine.featured(ListingType::Sale, 10).len(), 5);
    Ok(())
}

#[tokio::test]
async fn test_catalog_file_source() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"[
  {{"id": "a1", "title": "Harbor Loft", "price": 2400, "priceUnit": "rent",
    "location": "Boston, MA", "propertyType": "apartment", "beds": 1, "baths": 1,
    "area": 700, "imageUrl": "https://example.com/loft.jpg"}},
  {{"id": "a2", "title": "Prairie Acreage", "price": 120000,
    "location": "Lincoln, NE", "propertyType": "Land",
    "imageUrl": "https://example.com/land.jpg", "coordinates": [40.8136, -96.7026]}}
]"#
    )?;

    let path = file.path().to_string_lossy().to_string();
    let source = source_for(Some(path.as_str()));
    assert!(source.describe().contains(&path));

    let inventory = source.load().await?;
    assert_eq!(inventory.len(), 2);
    let engine = DiscoveryEngine::new(inventory);
    assert_eq!(ids(&engine, "type=rent"), ["a1"]);
    assert_eq!(engine.find("a2").map(|p| p.property_type), Some(PropertyType::Land));
    Ok(())
}

#[tokio::test]
async fn test_duplicate_ids_are_rejected() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    write!(
        file,
        r#"[
  {{"id": "x", "title": "One", "price": 1, "location": "A", "propertyType": "House", "imageUrl": ""}},
  {{"id": "x", "title": "Two", "price": 2, "location": "B", "propertyType": "House", "imageUrl": ""}}
]"#
    )?;

    let err = JsonFileInventory::new(file.path()).load().await.unwrap_err();
    assert!(matches!(err, DiscoveryError::CatalogError { .. }));
    Ok(())
}

#[tokio::test]
async fn test_missing_catalog_file_is_io_error() {
    let err = JsonFileInventory::new("/nonexistent/catalog.json")
        .load()
        .await
        .unwrap_err();
    assert!(matches!(err, DiscoveryError::IoError(_)));
}

#[test]
fn test_empty_inventory_yields_no_results() -> Result<()> {
    let engine = DiscoveryEngine::new(Inventory::new(Vec::new())?);
    let results = engine.run(&FilterState::default());
    assert!(results.is_empty());
    assert_eq!(results.page(1, 6).total_pages, 1);
    Ok(())
}
