use crate::core::matcher::{matches, matches_listing_type};
use crate::core::sorter::compare;
use crate::domain::filter::{FilterState, ListingType};
use crate::domain::inventory::Inventory;
use crate::domain::model::Property;
use serde::Serialize;

/// Inventory positions of the matching properties, in result order.
///
/// `sort_by` is stable, so properties with equal keys keep inventory order.
pub fn rank(inventory: &Inventory, filter: &FilterState) -> Vec<usize> {
    let properties = inventory.properties();
    let mut positions: Vec<usize> = (0..properties.len())
        .filter(|&i| matches(&properties[i], filter))
        .collect();
    positions.sort_by(|&a, &b| compare(&properties[a], &properties[b], filter.sort_order()));
    positions
}

/// Filters `inventory` by `filter` and stable-sorts the matches.
pub fn run<'a>(inventory: &'a Inventory, filter: &FilterState) -> Vec<&'a Property> {
    let properties = inventory.properties();
    rank(inventory, filter)
        .into_iter()
        .map(|i| &properties[i])
        .collect()
}

/// Runs searches against one shared inventory.
#[derive(Debug, Clone)]
pub struct DiscoveryEngine {
    inventory: Inventory,
}

impl DiscoveryEngine {
    pub fn new(inventory: Inventory) -> Self {
        Self { inventory }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn rank(&self, filter: &FilterState) -> Vec<usize> {
        rank(&self.inventory, filter)
    }

    pub fn run(&self, filter: &FilterState) -> SearchResults<'_> {
        let items = run(&self.inventory, filter);
        tracing::debug!(
            "Search matched {} of {} properties (sort: {})",
            items.len(),
            self.inventory.len(),
            filter.sort_order()
        );
        SearchResults { items }
    }

    /// Landing-page listings: listing type only, inventory order, at most `limit`.
    pub fn featured(&self, listing_type: ListingType, limit: usize) -> Vec<&Property> {
        self.inventory
            .properties()
            .iter()
            .filter(|p| matches_listing_type(p, listing_type))
            .take(limit)
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Property> {
        self.inventory.find(id)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<'a> {
    items: Vec<&'a Property>,
}

impl<'a> SearchResults<'a> {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[&'a Property] {
        &self.items
    }

    /// 1-based page of `size` items. Page 0 is treated as page 1 and numbers
    /// past the end land on the last page.
    pub fn page(&self, number: usize, size: usize) -> Page<'a> {
        paginate(&self.items, number, size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a> {
    pub number: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub has_previous: bool,
    pub has_next: bool,
    pub items: Vec<&'a Property>,
}

pub fn paginate<'a>(items: &[&'a Property], number: usize, size: usize) -> Page<'a> {
    let size = size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(size).max(1);
    let number = number.clamp(1, total_pages);
    let start = (number - 1) * size;
    let end = (start + size).min(total_items);

    Page {
        number,
        total_pages,
        total_items,
        has_previous: number > 1,
        has_next: number < total_pages,
        items: items[start..end].to_vec(),
    }
}
