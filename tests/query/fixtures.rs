//! Sample catalogs.

use car_catalog::{CatalogSource, CatalogStore};
use serde_json::{Map, Value};

/// `{toyota: [Corolla 2020 red 20000]}`
pub fn one_toyota() -> CatalogStore {
    CatalogStore::initialize(vec![CatalogSource::from_json(
        "Toyota",
        "one_toyota",
        r#"[{"id":1,"title":"Corolla","model":2020,"color":"red","price":20000}]"#,
    )
    .unwrap()])
    .unwrap()
}

/// Two brands with mixed id types, a duplicate id, a legacy `name` field and
/// a record missing most fields.
pub fn showroom() -> CatalogStore {
    let toyota = CatalogSource::from_json(
        "Toyota",
        "showroom",
        r#"[
            {"id":1,"title":"Corolla","model":2020,"color":"Red","price":20000},
            {"id":2,"title":"Camry","model":2022,"color":"Dark Red","price":28000},
            {"id":3,"title":"Land Cruiser","model":2023,"color":"red","price":85000}
        ]"#,
    )
    .unwrap();
    let honda = CatalogSource::from_json(
        "Honda",
        "showroom",
        r#"[
            {"id":"h-1","name":"Civic","model":2020,"color":"blue","price":22000},
            {"id":7,"title":"Accord","model":2021,"color":"white","price":27000},
            {"id":"7","title":"Accord (dup)","model":2021,"color":"white","price":27500},
            {"id":9}
        ]"#,
    )
    .unwrap();
    CatalogStore::initialize(vec![toyota, honda]).unwrap()
}

pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected a JSON object"),
    }
}
