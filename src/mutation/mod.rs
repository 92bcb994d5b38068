//! Mutation handler - validated, in-memory-only additions to the catalog.
//!
//! Added cars live until the process exits. Required fields are `title`,
//! `model`, `price` and `brand`; `model` must coerce to an integer and
//! `price` to a finite number, otherwise nothing is stored.

mod id;

use std::error::Error;
use std::fmt;

use serde_json::{Map, Value};
use tracing::info;

use crate::catalog::{integral, normalize_brand_key, CarRecord, CatalogStore, StoreError};

pub use id::IdGenerator;

/// Fields every new car must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["title", "model", "price", "brand"];

/// Rejected input: lists absent fields and fields whose value cannot be used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<String>,
    pub invalid: Vec<String>,
}

impl ValidationError {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.invalid.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.missing.is_empty() {
            write!(f, "Missing required fields: {}.", self.missing.join(", "))?;
        }
        if !self.invalid.is_empty() {
            if !self.missing.is_empty() {
                f.write_str(" ")?;
            }
            write!(f, "Invalid fields: {}.", self.invalid.join(", "))?;
        }
        Ok(())
    }
}

impl Error for ValidationError {}

/// Error type for [`add_car`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    Validation(ValidationError),
    Store(StoreError),
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::Validation(e) => write!(f, "{}", e),
            MutationError::Store(e) => write!(f, "store error: {}", e),
        }
    }
}

impl Error for MutationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MutationError::Validation(e) => Some(e),
            MutationError::Store(e) => Some(e),
        }
    }
}

impl From<ValidationError> for MutationError {
    fn from(err: ValidationError) -> Self {
        MutationError::Validation(err)
    }
}

impl From<StoreError> for MutationError {
    fn from(err: StoreError) -> Self {
        MutationError::Store(err)
    }
}

/// A validated, coerced car ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCar {
    pub title: String,
    pub model: i64,
    pub price: f64,
    pub brand: String,
    /// Every other submitted field, passed through verbatim.
    pub extra: Map<String, Value>,
}

impl NewCar {
    /// Validate a submitted JSON object.
    pub fn from_fields(mut fields: Map<String, Value>) -> Result<Self, ValidationError> {
        let mut err = ValidationError::default();
        let mut take = |name: &str| {
            let value = fields.remove(name).filter(|v| !is_blank(v));
            if value.is_none() {
                err.missing.push(name.to_string());
            }
            value
        };

        let [title, model, price, brand] = REQUIRED_FIELDS.map(|name| take(name));

        let title = title.and_then(|v| text(&v, "title", &mut err));
        let model = model.and_then(|v| coerce_model(&v, &mut err));
        let price = price.and_then(|v| coerce_price(&v, &mut err));
        let brand = brand.and_then(|v| text(&v, "brand", &mut err));

        match (title, model, price, brand) {
            (Some(title), Some(model), Some(price), Some(brand)) if err.is_empty() => Ok(Self {
                title,
                model,
                price,
                brand,
                extra: fields,
            }),
            _ => Err(err),
        }
    }

    /// Normalized bucket this car belongs to.
    pub fn brand_key(&self) -> String {
        normalize_brand_key(&self.brand)
    }

    /// Build the stored record: synthesized id and coerced fields first,
    /// then passthrough fields that do not collide with them.
    pub fn into_record(self, id: u64) -> CarRecord {
        let mut fields = Map::new();
        fields.insert("id".into(), Value::from(id));
        fields.insert("title".into(), Value::String(self.title));
        fields.insert("model".into(), Value::from(self.model));
        fields.insert("price".into(), price_value(self.price));
        fields.insert("brand".into(), Value::String(self.brand));
        for (key, value) in self.extra {
            fields.entry(key).or_insert(value);
        }
        CarRecord::from_map(fields)
    }
}

/// Validate `fields` and append the resulting car to its brand bucket.
///
/// Returns the stored record, including its new `id`. On error the store is
/// left untouched.
pub fn add_car(store: &CatalogStore, fields: Map<String, Value>) -> Result<CarRecord, MutationError> {
    let car = NewCar::from_fields(fields)?;
    let brand = car.brand_key();
    let record = car.into_record(store.ids().next_id());

    let bucket_len = store.append(&brand, record.clone())?;
    info!(
        brand = %brand,
        id = %record.id_key().unwrap_or_default(),
        bucket_len,
        "car added to memory"
    );
    Ok(record)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn text(value: &Value, field: &str, err: &mut ValidationError) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        _ => {
            err.invalid.push(field.to_string());
            None
        }
    }
}

fn coerce_model(value: &Value, err: &mut ValidationError) -> Option<i64> {
    let model = match value {
        Value::Number(_) => integral(value),
        Value::String(s) => serde_json::from_str::<Value>(s.trim())
            .ok()
            .filter(Value::is_number)
            .and_then(|n| integral(&n)),
        _ => None,
    };
    if model.is_none() {
        err.invalid.push("model".into());
    }
    model
}

fn coerce_price(value: &Value, err: &mut ValidationError) -> Option<f64> {
    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|p| p.is_finite());
    if price.is_none() {
        err.invalid.push("price".into());
    }
    price
}

/// Whole prices stay JSON integers so `20000` round-trips as `20000`.
fn price_value(price: f64) -> Value {
    if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
        Value::from(price as i64)
    } else {
        Value::from(price)
    }
}
