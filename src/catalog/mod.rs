//! Catalog - in-memory brand inventories.
//!
//! ## Example
//!
//! ```ignore
//! use car_catalog::catalog::{self, CatalogStore};
//!
//! let store = catalog::load_dir(Path::new("data"), catalog::DEFAULT_FILE_PREFIX)?;
//! let snapshot = store.snapshot()?;
//! let toyotas = snapshot.records_for("Toyota");
//! ```

mod loader;
mod record;
mod store;

use std::fmt;

pub use loader::{
    brand_from_file_name, discover, load_dir, CatalogSource, LoadError, DEFAULT_FILE_PREFIX,
};
pub use record::{canonical_id, CarRecord};
pub(crate) use record::integral;
pub use store::{Brand, Catalog, CatalogStore};

/// Normalize a brand name into a brand key: trimmed and lowercased.
pub fn normalize_brand_key(brand: &str) -> String {
    brand.trim().to_lowercase()
}

/// Error type for store access after startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    LockPoisoned(&'static str),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::LockPoisoned(operation) => {
                write!(f, "catalog lock poisoned during {}", operation)
            }
        }
    }
}

impl std::error::Error for StoreError {}
