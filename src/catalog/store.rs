//! CatalogStore - process-lifetime, RwLock-guarded brand -> records mapping.
//!
//! Readers take an `Arc<Catalog>` snapshot and iterate it without holding the
//! lock. Writers go through `Arc::make_mut`, so an append made while a reader
//! still holds the previous snapshot copies the catalog instead of mutating
//! under the reader's feet.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::loader::{CatalogSource, LoadError};
use super::normalize_brand_key;
use super::record::CarRecord;
use super::StoreError;
use crate::mutation::IdGenerator;

/// One brand bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Brand {
    key: String,
    records: Vec<CarRecord>,
}

impl Brand {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn records(&self) -> &[CarRecord] {
        &self.records
    }
}

/// Immutable view of the whole catalog at one point in time.
///
/// Brands keep their insertion order; records keep load order followed by
/// append order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    brands: Vec<Brand>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Brand keys in insertion order.
    pub fn brands(&self) -> impl Iterator<Item = &str> {
        self.brands.iter().map(|b| b.key.as_str())
    }

    pub fn brand(&self, brand: &str) -> Option<&Brand> {
        self.index
            .get(&normalize_brand_key(brand))
            .map(|&i| &self.brands[i])
    }

    /// Records of one brand. The key is trimmed and lowercased before lookup.
    pub fn records_for(&self, brand: &str) -> Option<&[CarRecord]> {
        self.brand(brand).map(Brand::records)
    }

    /// Every record, brand by brand, in insertion order.
    pub fn all_records(&self) -> impl Iterator<Item = &CarRecord> {
        self.brands.iter().flat_map(|b| b.records.iter())
    }

    /// Total number of records across all brands.
    pub fn len(&self) -> usize {
        self.brands.iter().map(|b| b.records.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.iter().all(|b| b.records.is_empty())
    }

    fn bucket_mut(&mut self, key: String) -> &mut Vec<CarRecord> {
        let i = match self.index.get(&key).copied() {
            Some(i) => i,
            None => {
                self.brands.push(Brand {
                    key: key.clone(),
                    records: Vec::new(),
                });
                self.index.insert(key, self.brands.len() - 1);
                self.brands.len() - 1
            }
        };
        &mut self.brands[i].records
    }
}

/// Shared handle to the catalog. Clone-friendly via Arc.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    catalog: Arc<RwLock<Arc<Catalog>>>,
    ids: Arc<IdGenerator>,
}

impl CatalogStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from loaded sources in one step.
    ///
    /// All-or-nothing: an empty or duplicate brand key aborts the whole
    /// build and no store is returned.
    pub fn initialize<I>(sources: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = CatalogSource>,
    {
        let mut catalog = Catalog::default();
        for source in sources {
            let key = normalize_brand_key(&source.brand);
            if key.is_empty() {
                return Err(LoadError::EmptyBrand {
                    origin: source.origin,
                });
            }
            if catalog.index.contains_key(&key) {
                return Err(LoadError::DuplicateBrand {
                    brand: key,
                    origin: source.origin,
                });
            }
            debug!(brand = %key, records = source.records.len(), "brand bucket assigned");
            catalog.bucket_mut(key).extend(source.records);
        }

        Ok(Self {
            catalog: Arc::new(RwLock::new(Arc::new(catalog))),
            ids: Arc::new(IdGenerator::new()),
        })
    }

    /// Current snapshot. Later appends never show up in it.
    pub fn snapshot(&self) -> Result<Arc<Catalog>, StoreError> {
        let guard = self
            .catalog
            .read()
            .map_err(|_| StoreError::LockPoisoned("read"))?;
        Ok(Arc::clone(&*guard))
    }

    /// Brand keys in insertion order.
    pub fn all_brands(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.snapshot()?.brands().map(str::to_string).collect())
    }

    /// Copy of one brand's records, or `None` if the brand is unknown.
    pub fn records_for(&self, brand: &str) -> Result<Option<Vec<CarRecord>>, StoreError> {
        Ok(self.snapshot()?.records_for(brand).map(<[CarRecord]>::to_vec))
    }

    /// Append a record to a brand, creating the bucket if needed.
    ///
    /// Ids are not checked for uniqueness. Returns the bucket length after
    /// the append.
    pub fn append(&self, brand: &str, record: CarRecord) -> Result<usize, StoreError> {
        let key = normalize_brand_key(brand);
        let mut guard = self
            .catalog
            .write()
            .map_err(|_| StoreError::LockPoisoned("write"))?;
        let bucket = Arc::make_mut(&mut *guard).bucket_mut(key);
        bucket.push(record);
        Ok(bucket.len())
    }

    pub(crate) fn ids(&self) -> &IdGenerator {
        &self.ids
    }
}
