//! Test server bootstrap.

use axum::Router;
use car_catalog::{http, CatalogSource, CatalogStore};

pub fn sample_store() -> CatalogStore {
    let toyota = CatalogSource::from_json(
        "Toyota",
        "http-tests",
        r#"[
            {"id":1,"title":"Corolla","model":2020,"color":"red","price":20000},
            {"id":2,"title":"Camry","model":2022,"color":"silver","price":28000}
        ]"#,
    )
    .unwrap();
    let bmw = CatalogSource::from_json(
        "BMW",
        "http-tests",
        r#"[{"id":"x5","title":"X5","model":2021,"color":"black","price":60000}]"#,
    )
    .unwrap();
    CatalogStore::initialize(vec![toyota, bmw]).unwrap()
}

/// Bind to port 0 and return the base URL.
pub async fn start_app(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn start_server(store: CatalogStore) -> String {
    start_app(http::router(store)).await
}
