//! Conversion between [`FilterState`] and URL query strings.
//!
//! | key            | values                                   |
//! |----------------|------------------------------------------|
//! | `type`         | `buy`, `rent`                            |
//! | `propertyType` | `house`, `apartment`, `land`, `commercial`, `all` |
//! | `location`     | free text (search term)                  |
//! | `priceRange`   | `<min>-<max>`, `<min>-+`, `<min>+`       |
//! | `areaRange`    | `<min>-<max>`, `<min>-+`                 |
//! | `sort`         | `price_asc`, `price_desc`, `newest`, `popular` |
//!
//! Decoding never fails: unknown keys, unknown values and unparsable numbers
//! are dropped and the corresponding facet keeps its current value. Encoding
//! omits facets at their default, so the default state encodes to `""`.

use crate::domain::filter::{
    FilterPatch, FilterState, ListingType, PropertyTypeFilter, SortOrder, AREA_CEILING,
    PRICE_CEILING,
};
use crate::domain::model::PropertyType;
use url::form_urlencoded;

pub const KEY_TYPE: &str = "type";
pub const KEY_PROPERTY_TYPE: &str = "propertyType";
pub const KEY_LOCATION: &str = "location";
pub const KEY_PRICE_RANGE: &str = "priceRange";
pub const KEY_AREA_RANGE: &str = "areaRange";
pub const KEY_SORT: &str = "sort";

const OPEN_BOUND: &str = "+";
// An unescaped '+' in a query string arrives as a space after form decoding.
const DECODED_OPEN_BOUND: &str = " ";

pub fn decode(query: &str) -> FilterPatch {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut patch = FilterPatch::default();
    let mut seen: Vec<String> = Vec::new();

    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        // First occurrence of a key wins.
        if seen.iter().any(|k| *k == key) {
            continue;
        }
        seen.push(key.to_string());

        match key.as_ref() {
            KEY_TYPE => patch.listing_type = decode_listing_type(&value),
            KEY_PROPERTY_TYPE => patch.property_type = decode_property_type(&value),
            KEY_LOCATION if !value.is_empty() => patch.search_term = Some(value.into_owned()),
            KEY_PRICE_RANGE => patch.price_range = decode_range(&value, PRICE_CEILING),
            KEY_AREA_RANGE => patch.area_range = decode_range(&value, AREA_CEILING),
            KEY_SORT => patch.sort_order = SortOrder::from_slug(&value),
            _ => {
                tracing::trace!("Ignoring query key '{}'", key);
            }
        }
    }

    patch
}

/// Decodes `query` on top of the default state.
pub fn decode_state(query: &str) -> FilterState {
    FilterState::default().with_patch(decode(query))
}

pub fn encode(state: &FilterState) -> String {
    let defaults = FilterState::default();
    let mut serializer = form_urlencoded::Serializer::new(String::new());

    match state.listing_type() {
        ListingType::All => {}
        ListingType::Sale => {
            serializer.append_pair(KEY_TYPE, "buy");
        }
        ListingType::Rent => {
            serializer.append_pair(KEY_TYPE, "rent");
        }
    }

    if let PropertyTypeFilter::Only(kind) = state.property_type() {
        serializer.append_pair(KEY_PROPERTY_TYPE, kind.slug());
    }

    if !state.search_term().is_empty() {
        serializer.append_pair(KEY_LOCATION, state.search_term());
    }

    let price = state.price_range();
    if price != defaults.price_range() {
        serializer.append_pair(
            KEY_PRICE_RANGE,
            &encode_range(price.min(), price.max(), PRICE_CEILING),
        );
    }

    let area = state.area_range();
    if area != defaults.area_range() {
        serializer.append_pair(
            KEY_AREA_RANGE,
            &encode_range(area.min(), area.max(), AREA_CEILING),
        );
    }

    if state.sort_order() != defaults.sort_order() {
        serializer.append_pair(KEY_SORT, state.sort_order().slug());
    }

    serializer.finish()
}

fn decode_listing_type(value: &str) -> Option<ListingType> {
    match value {
        "buy" => Some(ListingType::Sale),
        "rent" => Some(ListingType::Rent),
        _ => None,
    }
}

fn decode_property_type(value: &str) -> Option<PropertyTypeFilter> {
    if value == "all" {
        return Some(PropertyTypeFilter::All);
    }
    PropertyType::from_slug(value).map(PropertyTypeFilter::Only)
}

/// Parses `<min>-<max>`, `<min>-+` or `<min>+`. Either bound failing to parse
/// discards the whole range.
fn decode_range(value: &str, ceiling: u64) -> Option<(u64, u64)> {
    let (min, max) = match value.split_once('-') {
        Some((min, max)) => (min, max),
        None => {
            let min = value
                .strip_suffix(OPEN_BOUND)
                .or_else(|| value.strip_suffix(DECODED_OPEN_BOUND))?;
            (min, OPEN_BOUND)
        }
    };

    let min = parse_bound(min)?;
    let max = if max == OPEN_BOUND || max == DECODED_OPEN_BOUND {
        ceiling
    } else {
        parse_bound(max)?
    };

    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    Some((lo.min(ceiling), hi.min(ceiling)))
}

fn parse_bound(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

fn encode_range(min: u64, max: u64, ceiling: u64) -> String {
    if max == ceiling {
        format!("{}-{}", min, OPEN_BOUND)
    } else {
        format!("{}-{}", min, max)
    }
}
