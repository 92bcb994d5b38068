//! car_catalog - read-mostly vehicle catalog served from memory.
//!
//! Per-brand inventories are loaded once at startup ([`catalog::load_dir`]),
//! queried through pure functions over a snapshot ([`query`]) and extended at
//! runtime with process-lifetime additions ([`mutation`]).

pub mod catalog;
pub mod config;
pub mod mutation;
pub mod query;

// HTTP boundary (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use catalog::{CarRecord, Catalog, CatalogSource, CatalogStore, LoadError, StoreError};
pub use config::ServerConfig;
pub use mutation::{add_car, MutationError, NewCar, ValidationError};
pub use query::{
    get_car_by_id, list_all, list_by_brand, search, Pagination, QueryError, SearchPredicates,
};
