//! Catalog types: products, SKUs, supersessions and the loaded snapshot.

mod facets;
pub(crate) mod product;
mod related;
mod sku;
mod snapshot;
mod supersession;

pub use facets::{CategoryNode, VehicleMake};
pub use product::{Product, StockType};
pub use related::{ProductDetail, RelatedPart, RelatedReason, DEFAULT_RELATED_LIMIT};
pub use sku::base_sku;
pub use snapshot::{Catalog, CHASSIS_FILE, FITMENT_FILE, PRODUCTS_FILE, SUPERSESSION_FILE};
pub use supersession::{SupersessionMatch, SupersessionTable};
