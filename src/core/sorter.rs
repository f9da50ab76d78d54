use crate::domain::filter::SortOrder;
use crate::domain::model::Property;
use std::cmp::Ordering;

pub fn compare(a: &Property, b: &Property, sort_order: SortOrder) -> Ordering {
    match sort_order {
        SortOrder::PriceAsc => a.price.cmp(&b.price),
        SortOrder::PriceDesc => b.price.cmp(&a.price),
        SortOrder::Newest => recency_key(b).cmp(&recency_key(a)),
        SortOrder::Popular => b.area.unwrap_or(0).cmp(&a.area.unwrap_or(0)),
    }
}

// Numeric ids stand in for listing age. Non-numeric ids map to None, which
// orders below every Some and therefore lands last in the descending sort.
fn recency_key(property: &Property) -> Option<u64> {
    property.id.trim().parse().ok()
}
