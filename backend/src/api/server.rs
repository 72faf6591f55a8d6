//! HTTP Server for the integrity API.
//!
//! # API Endpoints
//!
//! | Method | Path                      | Description                                  |
//! |--------|---------------------------|----------------------------------------------|
//! | GET    | `/health`                 | Health check                                 |
//! | GET    | `/api/integrity`          | Analyze the configured snapshot source       |
//! | POST   | `/api/integrity/upload`   | Upload a snapshot JSON file and analyze it   |
//! | GET    | `/api/logs`               | SSE stream for real-time logs                |

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::{header, Method, StatusCode},
    response::{sse::Event, IntoResponse, Json, Response, Sse},
    routing::{get, post},
    Router,
};
use futures::stream::Stream;
use serde_json::{json, Value};
use std::{convert::Infallible, net::SocketAddr, sync::Arc, time::Duration};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt as _;
use tower_http::cors::CorsLayer;

use super::logs::{log_error, log_info, LOG_BROADCASTER};
use super::types::{error_response, AnalysisResponse};
use crate::analysis::{run_analysis, AnalysisOptions};
use crate::config::{AnalysisConfig, ServerConfig, MAX_SNAPSHOT_SIZE};
use crate::error::{AnalysisError, ServerError, ServerResult};
use crate::snapshot::file::parse_snapshot;
use crate::snapshot::{InMemorySnapshot, SnapshotSource};

/// Shared state of the HTTP handlers.
pub struct AppState {
    pub source: Option<SnapshotSource>,
    pub config: AnalysisConfig,
}

impl AppState {
    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            source: config
                .snapshot_source
                .as_deref()
                .map(SnapshotSource::from_location),
            config: config.analysis.clone(),
        }
    }
}

/// Build the API router.
pub fn router(state: Arc<AppState>) -> Router {
    // Permissive CORS: the admin UI is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .expose_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health))
        .route("/health", get(health))
        .route("/api/integrity", get(analyze_configured))
        .route("/api/integrity/upload", post(analyze_upload))
        .route("/api/logs", get(sse_logs))
        .layer(DefaultBodyLimit::max(MAX_SNAPSHOT_SIZE))
        .layer(cors)
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_server(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = Arc::new(AppState::from_config(&config));
    let source = state
        .source
        .as_ref()
        .map(|s| s.describe())
        .unwrap_or_else(|| "none (upload only)".to_string());
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    eprintln!("🚀 Catalog integrity server running on http://localhost:{}", config.port);
    eprintln!("   GET  /api/integrity        - Analyze configured snapshot");
    eprintln!("   POST /api/integrity/upload - Upload snapshot JSON");
    eprintln!("   GET  /api/logs             - SSE log stream");
    eprintln!("   GET  /health               - Health check");
    eprintln!();
    eprintln!("📦 Snapshot source: {}", source);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::Analysis(AnalysisError::Snapshot(_)) => StatusCode::BAD_GATEWAY,
            ServerError::Analysis(AnalysisError::Cancelled(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(error_response(&self.to_string()))).into_response()
    }
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "catalog-integrity",
        "version": env!("CARGO_PKG_VERSION"),
        "snapshotSource": state.source.as_ref().map(|s| s.describe()),
        "primaryLocale": state.config.primary_locale,
        "endpoints": {
            "analyze": "GET /api/integrity",
            "upload": "POST /api/integrity/upload",
            "logs": "GET /api/logs (SSE)"
        }
    }))
}

/// SSE endpoint for real-time log streaming
async fn sse_logs() -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = LOG_BROADCASTER.subscribe();

    let stream = BroadcastStream::new(rx).filter_map(|result| match result {
        Ok(entry) => {
            let json = serde_json::to_string(&entry).ok()?;
            Some(Ok(Event::default().data(json)))
        }
        // Lagged receivers skip what they missed
        Err(_) => None,
    });

    Sse::new(stream).keep_alive(
        axum::response::sse::KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    )
}

/// Analyze the snapshot source configured at startup
async fn analyze_configured(
    State(state): State<Arc<AppState>>,
) -> ServerResult<Json<AnalysisResponse>> {
    let source = state.source.as_ref().ok_or_else(|| {
        ServerError::NotConfigured(
            "no snapshot source configured (set CATALOG_SNAPSHOT or use the upload endpoint)"
                .to_string(),
        )
    })?;

    log_info(format!("📄 NEW RUN: {}", source.describe()));
    let options = AnalysisOptions::new(state.config.clone());
    let report = run_analysis(source, &options).await?;

    Ok(Json(AnalysisResponse::new(report, source.describe())))
}

/// Upload snapshot endpoint
async fn analyze_upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> ServerResult<Json<AnalysisResponse>> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut file_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Multipart error: {}", e)))?
    {
        if field.name() == Some("file") {
            file_name = field.file_name().map(|s| s.to_string());
            file_data = Some(
                field
                    .bytes()
                    .await
                    .map_err(|e| ServerError::BadRequest(format!("Read error: {}", e)))?
                    .to_vec(),
            );
        }
    }

    let bytes = file_data.ok_or_else(|| ServerError::BadRequest("No file provided".to_string()))?;
    let name = file_name.unwrap_or_else(|| "upload".to_string());
    log_info(format!("📄 NEW UPLOAD: {} ({} bytes)", name, bytes.len()));

    // A broken upload is the client's fault, not the store's
    let snapshot = parse_snapshot(&bytes).map_err(|e| {
        log_error(format!("Rejected upload: {}", e));
        ServerError::BadRequest(e.to_string())
    })?;

    let provider = InMemorySnapshot::new(snapshot);
    let options = AnalysisOptions::new(state.config.clone());
    let report = run_analysis(&provider, &options).await?;

    Ok(Json(AnalysisResponse::new(report, format!("upload {}", name))))
}
