//! Cache capability and process-local TTL map for the parts catalog.
//!
//! Callers depend on the [`Cache`] trait, never on a concrete map, so the
//! expiry policy can be swapped or tested on its own.
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use parts_cache::{Cache, TtlCache};
//!
//! let cache: TtlCache<String, u32> = TtlCache::new(Duration::from_secs(60));
//! cache.set("validate:Bentley:Arnage".to_string(), 7);
//! assert_eq!(cache.get(&"validate:Bentley:Arnage".to_string()), Some(7));
//! ```

mod clock;
mod key;
mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use store::{Cache, TtlCache, DEFAULT_MAX_ENTRIES, DEFAULT_TTL};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, Clock, ManualClock, SystemClock, TtlCache};
}
