//! Startup loading of brand inventories from JSON files.
//!
//! A data directory holds one file per brand, named `<prefix><Brand>.json`
//! (e.g. `CarToyota.json`), each containing a JSON array of car objects.
//! Any failure here is fatal: the caller must not serve a partial catalog.

use std::error::Error;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::info;

use super::record::CarRecord;
use super::store::CatalogStore;

/// Default file-name prefix for brand files.
pub const DEFAULT_FILE_PREFIX: &str = "Car";

const SOURCE_EXTENSION: &str = ".json";

/// Error raised while building the catalog at startup.
#[derive(Debug)]
pub enum LoadError {
    /// Reading the directory or a file failed.
    Io { path: PathBuf, source: io::Error },
    /// A source is not valid JSON.
    Parse {
        origin: String,
        source: serde_json::Error,
    },
    /// A source parsed, but its top level is not an array.
    NotAnArray { origin: String },
    /// An array element is not a JSON object.
    NotAnObject { origin: String, index: usize },
    /// The brand key derived from a source is blank.
    EmptyBrand { origin: String },
    /// Two sources normalize to the same brand key.
    DuplicateBrand { brand: String, origin: String },
    /// No source matched at all.
    NoSources { dir: PathBuf, prefix: String },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
            LoadError::Parse { origin, source } => {
                write!(f, "invalid JSON in {}: {}", origin, source)
            }
            LoadError::NotAnArray { origin } => {
                write!(f, "{} does not contain a JSON array of cars", origin)
            }
            LoadError::NotAnObject { origin, index } => {
                write!(f, "{}: entry {} is not a JSON object", origin, index)
            }
            LoadError::EmptyBrand { origin } => {
                write!(f, "{} yields an empty brand name", origin)
            }
            LoadError::DuplicateBrand { brand, origin } => {
                write!(f, "brand '{}' from {} is already loaded", brand, origin)
            }
            LoadError::NoSources { dir, prefix } => write!(
                f,
                "no '{}*{}' files found in {}",
                prefix,
                SOURCE_EXTENSION,
                dir.display()
            ),
        }
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
            LoadError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// One brand's raw inventory, ready to be handed to [`CatalogStore::initialize`].
#[derive(Debug, Clone)]
pub struct CatalogSource {
    /// Brand name as found in the source; normalized by the store.
    pub brand: String,
    pub records: Vec<CarRecord>,
    /// Where the data came from, for error messages.
    pub origin: String,
}

impl CatalogSource {
    pub fn new(brand: impl Into<String>, records: Vec<CarRecord>) -> Self {
        let brand = brand.into();
        Self {
            origin: brand.clone(),
            brand,
            records,
        }
    }

    /// Parse a JSON array of car objects.
    pub fn from_json(
        brand: impl Into<String>,
        origin: impl Into<String>,
        text: &str,
    ) -> Result<Self, LoadError> {
        let origin = origin.into();
        let value: Value = serde_json::from_str(text).map_err(|source| LoadError::Parse {
            origin: origin.clone(),
            source,
        })?;

        let Value::Array(items) = value else {
            return Err(LoadError::NotAnArray { origin });
        };

        let records = items
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                CarRecord::try_from(item).map_err(|_| LoadError::NotAnObject {
                    origin: origin.clone(),
                    index,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            brand: brand.into(),
            records,
            origin,
        })
    }
}

/// Brand name for a file name, or `None` if the file is not a brand source.
///
/// `CarToyota.json` with prefix `Car` gives `Toyota`; normalization to
/// `toyota` happens in the store.
pub fn brand_from_file_name(file_name: &str, prefix: &str) -> Option<String> {
    file_name
        .strip_prefix(prefix)?
        .strip_suffix(SOURCE_EXTENSION)
        .map(str::to_string)
}

/// Read every brand source in `dir`, sorted by file name.
pub fn discover(dir: &Path, prefix: &str) -> Result<Vec<CatalogSource>, LoadError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source| LoadError::Io { path, source }
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_err(dir))? {
        let entry = entry.map_err(io_err(dir))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if let Some(brand) = brand_from_file_name(name, prefix) {
            files.push((name.to_string(), brand, path));
        }
    }
    files.sort_by(|a, b| a.0.cmp(&b.0));

    files
        .into_iter()
        .map(|(_, brand, path)| {
            let text = fs::read_to_string(&path).map_err(io_err(&path))?;
            CatalogSource::from_json(brand, path.display().to_string(), &text)
        })
        .collect()
}

/// Discover, parse and load every brand source in `dir` into a new store.
pub fn load_dir(dir: &Path, prefix: &str) -> Result<CatalogStore, LoadError> {
    let sources = discover(dir, prefix)?;
    if sources.is_empty() {
        return Err(LoadError::NoSources {
            dir: dir.to_path_buf(),
            prefix: prefix.to_string(),
        });
    }

    let brands = sources.len();
    let mut cars = 0;
    for source in &sources {
        cars += source.records.len();
        info!(origin = %source.origin, cars = source.records.len(), "brand data loaded");
    }

    let store = CatalogStore::initialize(sources)?;
    info!(brands, cars, "all car data loaded into memory");
    Ok(store)
}
