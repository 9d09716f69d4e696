//! Search gateway HTTP server.
//!
//! Sits between clients and the external index: normalizes raw search
//! parameters, forwards them, and returns the index's response unmodified.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Liveness check |
//! | `GET`  | `/search` | Simple search (`q`, `index`, `limit`, `offset`) |
//! | `POST` | `/search` | Full search (adds filter/sort/projection fields) |
//! | `GET`  | `/indexes` | List indexes as `{uid, primaryKey}` |
//!
//! GET and POST search are two deliberately distinct entry points: GET is
//! the simple, cacheable path and never reads filter or sort fields.
//!
//! # Error Contract
//!
//! Index failures are logged with the query text and index name, and the
//! client sees only a fixed envelope: `500 {"error":"Search failed"}`
//! (`"Failed to get indexes"` for the listing). Internal index detail is
//! never forwarded.

use axum::{
    body::Bytes,
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::http_error::{internal_error, AppError, HealthResponse};
use crate::index_client::IndexClient;
use crate::models::{IndexDescriptor, SearchRequest};

/// Shared gateway state: one immutable index client built at startup,
/// reused across all concurrent handlers.
#[derive(Clone)]
pub struct GatewayState {
    client: Arc<IndexClient>,
    default_index: Arc<str>,
}

/// Build the gateway router.
pub fn gateway_router(config: &Config) -> anyhow::Result<Router> {
    let state = GatewayState {
        client: Arc::new(IndexClient::new(&config.index)?),
        default_index: Arc::from(config.index.default_index.as_str()),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", get(handle_health))
        .route("/search", get(handle_search_get).post(handle_search_post))
        .route("/indexes", get(handle_list_indexes))
        .layer(cors)
        .with_state(state))
}

/// Start the search gateway.
pub async fn run_gateway(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.api_bind.clone();
    let app = gateway_router(config)?;

    tracing::info!("PDF Search API listening on http://{}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handler for `GET /`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse::ok("PDF Search API"))
}

/// Handler for `GET /search`.
///
/// Parameters arrive as an untyped map so that malformed numerics degrade
/// to defaults instead of failing extraction.
async fn handle_search_get(
    State(state): State<GatewayState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, AppError> {
    let req = SearchRequest::from_query_params(&params, &state.default_index);
    execute_search(&state, req).await
}

/// Handler for `POST /search`.
///
/// The body is read as raw bytes and parsed leniently for the same
/// reason; a missing, malformed, or non-object body normalizes to a
/// match-all default request.
async fn handle_search_post(
    State(state): State<GatewayState>,
    body: Bytes,
) -> Result<Json<Value>, AppError> {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let req = SearchRequest::from_body(&body, &state.default_index);
    execute_search(&state, req).await
}

/// Forward a normalized request to the index and pass its response
/// through untouched.
async fn execute_search(state: &GatewayState, req: SearchRequest) -> Result<Json<Value>, AppError> {
    match state.client.search(&req).await {
        Ok(results) => Ok(Json(results)),
        Err(e) => {
            tracing::error!(
                query = %req.query,
                index = %req.index,
                "Search error: {:#}",
                e
            );
            Err(internal_error("Search failed"))
        }
    }
}

/// JSON response body for `GET /indexes`.
#[derive(serde::Serialize)]
struct IndexListResponse {
    indexes: Vec<IndexDescriptor>,
}

/// Handler for `GET /indexes`.
async fn handle_list_indexes(
    State(state): State<GatewayState>,
) -> Result<Json<IndexListResponse>, AppError> {
    match state.client.list_indexes().await {
        Ok(indexes) => Ok(Json(IndexListResponse { indexes })),
        Err(e) => {
            tracing::error!("Get indexes error: {:#}", e);
            Err(internal_error("Failed to get indexes"))
        }
    }
}
