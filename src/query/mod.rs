//! Query engine - read-only views over a catalog snapshot.
//!
//! Every function here is pure: it borrows a [`Catalog`] snapshot, never
//! mutates it, and returns the same answer for the same snapshot and inputs.
//!
//! ## Example
//!
//! ```ignore
//! use car_catalog::query::{self, Pagination, SearchPredicates};
//!
//! let snapshot = store.snapshot()?;
//! let page = query::search(&snapshot, &SearchPredicates::new().max_price("25000"), Pagination::default());
//! assert_eq!(page.info.total_cars_found, 1);
//! ```

mod filter;
mod pagination;

use std::fmt;

use serde::Serialize;

use crate::catalog::{CarRecord, Catalog};

pub use filter::{Matcher, SearchPredicates};
pub use pagination::{PageStats, Pagination, DEFAULT_LIMIT, DEFAULT_PAGE};

/// Result envelope: count metadata plus the selected records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing<I> {
    pub info: I,
    pub results: Vec<CarRecord>,
}

/// Metadata for the full-catalog and per-brand listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogInfo {
    pub total_cars: usize,
    #[serde(flatten)]
    pub page: Option<PageStats>,
}

/// Metadata for search results. `total_cars_found` counts matches before
/// pagination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchInfo {
    pub total_cars_found: usize,
    #[serde(flatten)]
    pub page: PageStats,
}

pub type CatalogListing = Listing<CatalogInfo>;
pub type SearchListing = Listing<SearchInfo>;

/// Lookup failures. Both map to "not found" at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// No bucket for this brand (name as requested).
    BrandNotFound(String),
    /// The brand exists but holds no record with this id.
    CarNotFound { brand: String, id: String },
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryError::BrandNotFound(brand) => write!(f, "Brand '{}' not found.", brand),
            QueryError::CarNotFound { brand, id } => {
                write!(f, "Car with id '{}' not found in brand '{}'.", id, brand)
            }
        }
    }
}

impl std::error::Error for QueryError {}

/// Every car across every brand.
///
/// `None` disables pagination and returns the whole catalog with only
/// `total_cars` set.
pub fn list_all(catalog: &Catalog, pagination: Option<Pagination>) -> CatalogListing {
    let total_cars = catalog.len();

    match pagination {
        None => Listing {
            info: CatalogInfo {
                total_cars,
                page: None,
            },
            results: catalog.all_records().cloned().collect(),
        },
        Some(pagination) => {
            let range = pagination.range(total_cars);
            let results: Vec<CarRecord> = catalog
                .all_records()
                .skip(range.start)
                .take(range.len())
                .cloned()
                .collect();
            Listing {
                info: CatalogInfo {
                    total_cars,
                    page: Some(pagination.stats(total_cars, results.len())),
                },
                results,
            }
        }
    }
}

/// One brand's full bucket. Not paginated, unlike [`list_all`] and [`search`].
pub fn list_by_brand(catalog: &Catalog, brand: &str) -> Result<CatalogListing, QueryError> {
    let records = catalog
        .records_for(brand)
        .ok_or_else(|| QueryError::BrandNotFound(brand.to_string()))?;

    Ok(Listing {
        info: CatalogInfo {
            total_cars: records.len(),
            page: None,
        },
        results: records.to_vec(),
    })
}

/// First car in `brand` whose id, in string form, equals `id`.
///
/// Ids from different sources may be numbers or strings, so `7` and `"7"`
/// are the same id here.
pub fn get_car_by_id(catalog: &Catalog, brand: &str, id: &str) -> Result<CarRecord, QueryError> {
    let records = catalog
        .records_for(brand)
        .ok_or_else(|| QueryError::BrandNotFound(brand.to_string()))?;

    records
        .iter()
        .find(|car| car.id_key().as_deref() == Some(id))
        .cloned()
        .ok_or_else(|| QueryError::CarNotFound {
            brand: brand.to_string(),
            id: id.to_string(),
        })
}

/// Filter the whole catalog, then paginate the matches.
pub fn search(
    catalog: &Catalog,
    predicates: &SearchPredicates,
    pagination: Pagination,
) -> SearchListing {
    let matcher = predicates.compile();
    let found: Vec<&CarRecord> = catalog
        .all_records()
        .filter(|car| matcher.matches(car))
        .collect();

    let (page, stats) = pagination.apply(&found);
    Listing {
        info: SearchInfo {
            total_cars_found: found.len(),
            page: stats,
        },
        results: page.into_iter().cloned().collect(),
    }
}
