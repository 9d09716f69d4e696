//! HTTP server for stored blobs (PDFs and thumbnails).
//!
//! One server implementation parameterized by [`BlobKind`]: the document
//! and thumbnail servers differ only in storage root, extension, and
//! media type.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Liveness check |
//! | `GET`  | `/{id}` | Fetch a blob by identifier |
//!
//! # Error Contract
//!
//! Errors use the flat JSON envelope shared by all pdfshelf services:
//!
//! ```json
//! { "error": "Invalid ID" }
//! ```
//!
//! `400` for identifier syntax, `404` for a missing blob, `500` for any
//! filesystem fault other than absence. Identifier validation always runs
//! before a path is built, so traversal-shaped ids never touch the disk.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{Json, Response},
    routing::get,
    Router,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::io::ReaderStream;
use tower_http::cors::{Any, CorsLayer};

use crate::blob::{self, BlobId, BlobKind, RetrieveError};
use crate::config::Config;
use crate::http_error::{bad_request, internal_error, not_found, AppError, HealthResponse};

/// Shared state for one blob server instance.
#[derive(Clone)]
struct BlobState {
    kind: BlobKind,
    root: Arc<PathBuf>,
}

/// Build the router for one blob server. Extracted from [`run_blob_server`]
/// so tests can drive it without binding a socket.
pub fn blob_router(kind: BlobKind, root: PathBuf) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = BlobState {
        kind,
        root: Arc::new(root),
    };

    Router::new()
        .route("/", get(handle_health))
        .route("/{id}", get(handle_get_blob))
        .layer(cors)
        .with_state(state)
}

/// Start a blob server for the given kind.
///
/// Binds to the kind's configured address and serves until the process is
/// terminated.
pub async fn run_blob_server(config: &Config, kind: BlobKind) -> anyhow::Result<()> {
    let (bind_addr, root) = match kind {
        BlobKind::Document => (
            config.server.documents_bind.clone(),
            config.storage.documents_dir.clone(),
        ),
        BlobKind::Thumbnail => (
            config.server.thumbnails_bind.clone(),
            config.storage.thumbnails_dir.clone(),
        ),
    };

    let app = blob_router(kind, root);

    tracing::info!("{} listening on http://{}", kind.server_name(), bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Handler for `GET /`.
async fn handle_health(State(state): State<BlobState>) -> Json<HealthResponse> {
    Json(HealthResponse::ok(state.kind.server_name()))
}

/// Handler for `GET /{id}`.
///
/// Validates the identifier, resolves it under the storage root, and
/// streams the file back without buffering it whole. A client disconnect
/// aborts the stream.
async fn handle_get_blob(
    State(state): State<BlobState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let kind = state.kind;

    let id = BlobId::parse(&id).map_err(|_| bad_request("Invalid ID"))?;

    let path = blob::resolve(&state.root, kind, &id).map_err(|e| match e {
        RetrieveError::NotFound => not_found(format!("{} not found", kind.label())),
        RetrieveError::Io(e) => {
            tracing::error!("Error reading {} {}: {}", kind.label(), id, e);
            internal_error(format!("Failed to read {}", kind.label()))
        }
    })?;

    let file = tokio::fs::File::open(&path).await.map_err(|e| {
        tracing::error!("Error reading {} {}: {}", kind.label(), id, e);
        internal_error(format!("Failed to read {}", kind.label()))
    })?;

    let len = file
        .metadata()
        .await
        .map_err(|e| {
            tracing::error!("Error reading {} {}: {}", kind.label(), id, e);
            internal_error(format!("Failed to read {}", kind.label()))
        })?
        .len();

    let body = Body::from_stream(ReaderStream::new(file));

    let response = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, kind.media_type())
        .header(header::CONTENT_LENGTH, len)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", id.file_name(kind)),
        )
        .body(body)
        .map_err(|e| {
            tracing::error!("Error building {} response: {}", kind.label(), e);
            internal_error(format!("Failed to read {}", kind.label()))
        })?;

    Ok(response)
}
