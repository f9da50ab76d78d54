// Domain layer: listings, facet state and ports. No I/O lives here.

pub mod filter;
pub mod inventory;
pub mod model;
pub mod ports;
