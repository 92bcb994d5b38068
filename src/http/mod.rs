//! HTTP boundary - maps requests to query and mutation calls.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /` - welcome page.
//! - `GET /api/cars/all?pagination=false&page=&limit=` - whole catalog.
//! - `GET /api/cars/search?title=&model=&color=&maxPrice=&page=&limit=` - filtered catalog.
//! - `GET /api/cars/:brand` - one brand, unpaginated.
//! - `GET /api/cars/:brand/:id` - one car.
//! - `POST /api/cars` - add a car (in memory only).
//!
//! Unmatched routes answer 404 and handler panics answer 500, both as JSON.
//!
//! ## Example
//!
//! ```ignore
//! let store = car_catalog::catalog::load_dir(&config.data_dir, &config.file_prefix)?;
//!
//! // Get the router to compose with other axum routes
//! let app = car_catalog::http::router(store.clone());
//!
//! // Or serve directly
//! car_catalog::http::serve(store, config.addr()).await?;
//! ```

mod error;

use std::any::Any;
use std::net::SocketAddr;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::catalog::CatalogStore;
use crate::mutation;
use crate::query::{self, Pagination, SearchPredicates};

pub use error::{ApiError, INTERNAL_ERROR_MESSAGE};

const WELCOME_PAGE: &str =
    "<h1>Car API is ready and running!</h1><p>Try endpoints like /api/cars/all</p>";

/// Build the full application router over `store`.
pub fn router(store: CatalogStore) -> Router {
    boundary(routes().with_state(store))
}

/// Catalog routes, without state or boundary layers.
pub fn routes() -> Router<CatalogStore> {
    Router::new()
        .route("/", get(welcome))
        .route("/api/cars", post(add_car))
        .route("/api/cars/all", get(list_all))
        .route("/api/cars/search", get(search))
        .route("/api/cars/:brand", get(list_by_brand))
        .route("/api/cars/:brand/:id", get(get_car))
}

/// Wrap an app with the outermost boundary: JSON 404 fallback, panic
/// recovery, permissive CORS and request tracing.
///
/// A known path hit with a method it does not serve is answered like an
/// unknown path.
pub fn boundary(app: Router) -> Router {
    app.fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve the catalog over HTTP until Ctrl+C.
pub async fn serve(store: CatalogStore, addr: SocketAddr) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "car catalog listening");
    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown requested"),
        Err(err) => {
            warn!(?err, "failed to install ctrl-c handler, running until killed");
            std::future::pending::<()>().await;
        }
    }
}

/// Raw query-string pairs. Repeated keys never fail a request; the first
/// occurrence wins.
#[derive(Debug)]
struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    fn first(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn pagination(&self) -> Pagination {
        Pagination::from_params(self.first("page"), self.first("limit"))
    }

    /// Only `pagination=false` turns paging off.
    fn paged(&self) -> bool {
        self.first("pagination") != Some("false")
    }

    fn predicates(&self) -> SearchPredicates {
        SearchPredicates {
            title: self.first("title").map(str::to_string),
            model: self.first("model").map(str::to_string),
            color: self.first("color").map(str::to_string),
            max_price: self.first("maxPrice").map(str::to_string),
        }
    }
}

/// `GET /`
async fn welcome() -> Html<&'static str> {
    Html(WELCOME_PAGE)
}

/// `GET /api/cars/all`
async fn list_all(
    State(store): State<CatalogStore>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<query::CatalogListing>, ApiError> {
    let params = QueryParams(params);
    let snapshot = store.snapshot()?;
    let pagination = params.paged().then(|| params.pagination());
    Ok(Json(query::list_all(&snapshot, pagination)))
}

/// `GET /api/cars/search`
async fn search(
    State(store): State<CatalogStore>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<query::SearchListing>, ApiError> {
    let params = QueryParams(params);
    let snapshot = store.snapshot()?;
    Ok(Json(query::search(
        &snapshot,
        &params.predicates(),
        params.pagination(),
    )))
}

/// `GET /api/cars/:brand`
async fn list_by_brand(
    State(store): State<CatalogStore>,
    Path(brand): Path<String>,
) -> Result<Json<query::CatalogListing>, ApiError> {
    let snapshot = store.snapshot()?;
    Ok(Json(query::list_by_brand(&snapshot, &brand)?))
}

/// `GET /api/cars/:brand/:id`
async fn get_car(
    State(store): State<CatalogStore>,
    Path((brand, id)): Path<(String, String)>,
) -> Result<Json<Value>, ApiError> {
    let snapshot = store.snapshot()?;
    let car = query::get_car_by_id(&snapshot, &brand, &id)?;
    Ok(Json(json!({ "success": true, "message": "Car found", "car": car })))
}

/// `POST /api/cars` - body must be a JSON object.
async fn add_car(
    State(store): State<CatalogStore>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(body) = payload?;
    let Value::Object(fields) = body else {
        return Err(ApiError::BadRequest(
            "Request body must be a JSON object.".into(),
        ));
    };

    let car = mutation::add_car(&store, fields)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Car added successfully (in-memory only)", "car": car })),
    ))
}

async fn route_not_found(uri: Uri) -> ApiError {
    ApiError::RouteNotFound(uri.to_string())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    error!(panic = %detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "message": INTERNAL_ERROR_MESSAGE })),
    )
        .into_response()
}
