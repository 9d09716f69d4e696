//! Frontend proxy server.
//!
//! Decouples the browser's origin from the gateway's origin: relays a
//! reduced search surface (`q`, `limit`, `offset` only — no filter or
//! sort) to the gateway and hands the upstream status and JSON body back
//! verbatim. Connection detail never reaches the browser; a failed
//! upstream call answers with the fixed `{"error":"Search failed"}`
//! envelope.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::http_error::{internal_error, AppError, HealthResponse};

#[derive(Clone)]
struct FrontendState {
    http: reqwest::Client,
    api_url: Arc<str>,
}

/// Build the frontend proxy router.
pub fn frontend_router(config: &Config) -> anyhow::Result<Router> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.index.timeout_secs))
        .build()?;

    let state = FrontendState {
        http,
        api_url: Arc::from(config.frontend.api_url.trim_end_matches('/')),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Ok(Router::new()
        .route("/", get(handle_health))
        .route("/api/search", get(handle_proxy_search))
        .layer(cors)
        .with_state(state))
}

/// Start the frontend proxy.
pub async fn run_frontend(config: &Config) -> anyhow::Result<()> {
    let bind_addr = config.server.frontend_bind.clone();
    let app = frontend_router(config)?;

    tracing::info!("Frontend proxy listening on http://{}", bind_addr);
    tracing::info!("API URL: {}", config.frontend.api_url);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handler for `GET /`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse::ok("PDF Search Frontend"))
}

/// Handler for `GET /api/search`.
///
/// Forwards exactly `q`, `limit`, and `offset` — unparsed; the gateway's
/// normalizer owns defaulting — and relays the upstream status code and
/// body.
async fn handle_proxy_search(
    State(state): State<FrontendState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, AppError> {
    let url = format!("{}/search", state.api_url);

    let forwarded: Vec<(&str, &str)> = ["q", "limit", "offset"]
        .iter()
        .filter_map(|key| params.get(*key).map(|v| (*key, v.as_str())))
        .collect();

    let response = state
        .http
        .get(&url)
        .query(&forwarded)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("Search proxy error: {}", e);
            internal_error("Search failed")
        })?;

    let status =
        StatusCode::from_u16(response.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);

    let body: Value = response.json().await.map_err(|e| {
        tracing::error!("Search proxy error: {}", e);
        internal_error("Search failed")
    })?;

    Ok((status, Json(body)).into_response())
}
