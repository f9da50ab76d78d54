//! Listing predicates.
//!
//! A property matches a [`FilterState`] when all five facet clauses hold:
//! listing type, property type, price, area and search term. Each clause is
//! exposed separately so callers (and the map projection) can reuse them.

use crate::domain::filter::{FilterState, ListingType, PropertyTypeFilter, Range};
use crate::domain::model::Property;

pub fn matches(property: &Property, filter: &FilterState) -> bool {
    matches_listing_type(property, filter.listing_type())
        && matches_property_type(property, filter.property_type())
        && matches_price(property, filter.price_range())
        && matches_area(property, filter.area_range())
        && matches_search_term(property, filter.search_term())
}

pub fn matches_listing_type(property: &Property, listing_type: ListingType) -> bool {
    match listing_type {
        ListingType::All => true,
        ListingType::Sale => !property.is_rental(),
        ListingType::Rent => property.is_rental(),
    }
}

pub fn matches_property_type(property: &Property, filter: PropertyTypeFilter) -> bool {
    filter.accepts(property.property_type)
}

pub fn matches_price(property: &Property, range: Range) -> bool {
    range.contains(property.price)
}

/// Properties without an area are never excluded by the area facet.
pub fn matches_area(property: &Property, range: Range) -> bool {
    property.area.is_none_or(|area| range.contains(area))
}

pub fn matches_search_term(property: &Property, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    contains_ignore_case(&property.title, &needle)
        || contains_ignore_case(&property.location, &needle)
}

/// `needle` must already be lowercase.
pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
