//! Search predicates.
//!
//! Every predicate is optional and they combine with AND. Text predicates are
//! case-insensitive substring matches; records lacking the field never match
//! them. Numeric predicates that do not parse match nothing.

use serde::Deserialize;

use crate::catalog::{integral, CarRecord};

/// Raw search criteria as they arrive in a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchPredicates {
    pub title: Option<String>,
    pub model: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
}

impl SearchPredicates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn max_price(mut self, max_price: impl Into<String>) -> Self {
        self.max_price = Some(max_price.into());
        self
    }

    /// Parse the raw criteria once, ahead of a scan.
    pub fn compile(&self) -> Matcher {
        Matcher {
            title: supplied(&self.title).map(str::to_lowercase),
            color: supplied(&self.color).map(str::to_lowercase),
            model: supplied(&self.model).map(|raw| Numeric::parse(raw, parse_model)),
            max_price: supplied(&self.max_price).map(|raw| Numeric::parse(raw, parse_price)),
        }
    }
}

/// Compiled predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct Matcher {
    title: Option<String>,
    color: Option<String>,
    model: Option<Numeric<i64>>,
    max_price: Option<Numeric<f64>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Numeric<T> {
    Value(T),
    Invalid,
}

impl<T> Numeric<T> {
    fn parse(raw: &str, f: fn(&str) -> Option<T>) -> Self {
        f(raw.trim()).map_or(Numeric::Invalid, Numeric::Value)
    }
}

impl Matcher {
    pub fn matches(&self, car: &CarRecord) -> bool {
        if let Some(needle) = &self.title {
            if !contains_folded(car.title(), needle) {
                return false;
            }
        }
        if let Some(needle) = &self.color {
            if !contains_folded(car.color(), needle) {
                return false;
            }
        }
        match self.model {
            Some(Numeric::Invalid) => return false,
            Some(Numeric::Value(model)) if car.model() != Some(model) => return false,
            _ => {}
        }
        match self.max_price {
            Some(Numeric::Invalid) => return false,
            Some(Numeric::Value(max)) if !car.price().is_some_and(|p| p <= max) => return false,
            _ => {}
        }
        true
    }
}

fn supplied(raw: &Option<String>) -> Option<&str> {
    raw.as_deref().filter(|s| !s.is_empty())
}

fn contains_folded(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle))
}

fn parse_model(raw: &str) -> Option<i64> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    integral(&value)
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|p| p.is_finite())
}
