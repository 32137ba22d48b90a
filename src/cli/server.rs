//! HTTP server mode for paging configured collections

use axum::{
    extract::{Path, RawQuery, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use duckdb::Connection;
use serde::Serialize;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::{CollectionConfig, PagerConfig};
use crate::database::{open_database, run_init, DuckDbScope};
use crate::engine::PageEngine;
use crate::error::{Error, Result};

/// Media type of JSON:API documents
pub const JSONAPI_CONTENT_TYPE: &str = "application/vnd.api+json";

/// App state shared across handlers
#[derive(Clone)]
struct AppState {
    config: Arc<PagerConfig>,
    conn: Arc<Mutex<Connection>>,
}

/// Response wrapper for non-JSON:API endpoints
#[derive(Debug, Serialize)]
struct ApiResponse<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

/// Open the configured database and build the router
pub fn build_router(config: PagerConfig) -> Result<Router> {
    let conn = open_database(&config.database)?;
    run_init(&conn, &config.init)?;

    let state = AppState {
        config: Arc::new(config),
        conn: Arc::new(Mutex::new(conn)),
    };

    // Build CORS layer - allow all origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/health", get(health))
        .route("/collections", get(list_collections))
        .route("/collections/:name", get(get_page))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Start the HTTP server
pub async fn serve(config: PagerConfig, port: u16) -> Result<()> {
    let app = build_router(config)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// List configured collections
async fn list_collections(State(state): State<AppState>) -> impl IntoResponse {
    let collections: Vec<Value> = state
        .config
        .collections
        .iter()
        .map(CollectionConfig::summary)
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({
            "type": "COLLECTIONS",
            "collections": collections
        }))),
    )
}

/// Fetch one page of a collection as a JSON:API document
async fn get_page(
    State(state): State<AppState>,
    Path(name): Path<String>,
    RawQuery(query): RawQuery,
) -> Response {
    let query = query.unwrap_or_default();
    let result = tokio::task::spawn_blocking(move || run_page(&state, &name, &query)).await;

    match result {
        Ok(Ok((status, document))) => jsonapi_response(status, document),
        Ok(Err(e)) => error_response(&e),
        Err(e) => error_response(&Error::Other(format!("Page task failed: {e}"))),
    }
}

/// Run the pipeline against the shared connection
fn run_page(state: &AppState, name: &str, query: &str) -> Result<(u16, Value)> {
    let collection = state.config.collection(name)?;
    let engine = PageEngine::from_collection(collection, state.config.max_page_size);

    let conn = state
        .conn
        .lock()
        .map_err(|_| Error::Other("Database connection lock poisoned".to_string()))?;
    let scope = DuckDbScope::for_collection(&conn, collection)?;

    let outcome = engine.run_query(query, scope, &state.config.collection_url(name))?;
    let status = outcome.status_code();
    Ok((status, outcome.into_document()?))
}

fn jsonapi_response(status: u16, document: Value) -> Response {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (
        status,
        [(header::CONTENT_TYPE, JSONAPI_CONTENT_TYPE)],
        Json(document),
    )
        .into_response()
}

/// Render an infrastructure error as a JSON:API errors document
fn error_response(error: &Error) -> Response {
    let status = error.status_code();
    if status >= 500 {
        tracing::error!("Page request failed: {}", error);
    }

    let title = StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Error");

    jsonapi_response(
        status,
        json!({
            "errors": [{
                "status": status.to_string(),
                "title": title,
                "detail": error.to_string()
            }]
        }),
    )
}
