use crate::error::ApiError;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use documind_core::{ChatCoordinator, Generator};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub type SharedCoordinator = Arc<ChatCoordinator<Arc<dyn Generator>>>;

const HOME_MESSAGE: &str = "DocuMind API is active (Hybrid Mode) 🧠";
const UPLOAD_FIELD: &str = "file";

#[derive(Debug, Serialize, Deserialize)]
pub struct HomeResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub document_loaded: bool,
    pub source: Option<String>,
    pub chunks_indexed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    pub status: String,
    pub chunks_processed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatRequest {
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}

pub fn create_app(state: SharedCoordinator, max_upload_bytes: usize) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/upload-pdf", post(upload_pdf))
        .route("/chat", post(chat))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: HOME_MESSAGE.to_string(),
    })
}

async fn health(State(state): State<SharedCoordinator>) -> Json<HealthResponse> {
    let snapshot = state.snapshot().await;

    Json(HealthResponse {
        status: "ok".to_string(),
        document_loaded: snapshot.is_some(),
        chunks_indexed: snapshot.as_ref().map_or(0, |s| s.chunks_indexed),
        source: snapshot.map(|s| s.source),
    })
}

async fn upload_pdf(
    State(state): State<SharedCoordinator>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let (filename, bytes) = read_upload(&mut multipart).await?;
    info!(filename = %filename, bytes = bytes.len(), "upload received");

    let report = state.ingest(&filename, bytes).await.map_err(|err| {
        error!(filename = %filename, error = %err, "ingest failed");
        ApiError::from(err)
    })?;

    Ok(Json(UploadResponse {
        status: "success".to_string(),
        chunks_processed: report.chunks_processed,
    }))
}

async fn chat(
    State(state): State<SharedCoordinator>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let answer = state.answer(&request.question).await.map_err(|err| {
        let api_error = ApiError::from(err);
        if api_error.status().is_server_error() {
            error!(error = %api_error.detail(), "chat failed");
        }
        api_error
    })?;

    Ok(Json(ChatResponse { answer }))
}

/// Takes the `file` field, or failing that the first field carrying a file
/// name.
async fn read_upload(multipart: &mut Multipart) -> Result<(String, Vec<u8>), ApiError> {
    let mut fallback = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(err.body_text()))?
    {
        let is_upload_field = field.name() == Some(UPLOAD_FIELD);
        if !is_upload_field && field.file_name().is_none() {
            continue;
        }

        let filename = field.file_name().unwrap_or("upload.pdf").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::bad_request(err.body_text()))?;

        if is_upload_field {
            return Ok((filename, bytes.to_vec()));
        }
        if fallback.is_none() {
            fallback = Some((filename, bytes.to_vec()));
        }
    }

    fallback.ok_or_else(|| ApiError::bad_request("No file uploaded"))
}
