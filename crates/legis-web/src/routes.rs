use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{DefaultBodyLimit, Multipart, State},
    http::header,
    response::{Html, IntoResponse},
    routing::{get, post},
    Form, Json, Router,
};
use legis_analysis::{
    clean::clean_text, extract::extract_text, process, DocumentAnalysis, RefinedAnalysis, Refiner,
};
use serde::Deserialize;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::ApiError;
use crate::render;

#[derive(Clone)]
pub struct AppState {
    pub refiner: Arc<Refiner>,
}

pub fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/analyze", post(analyze_upload))
        .route("/download", post(download))
        .route("/api/analyze", post(api_analyze))
        .route("/api/refine", post(api_refine))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index() -> Html<String> {
    Html(render::placeholder_page())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "service": "legis-web" }))
}

async fn analyze_upload(mut multipart: Multipart) -> Result<Html<String>, ApiError> {
    let mut upload: Option<(Option<String>, Bytes)> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let file_name = field.file_name().map(str::to_string);
            let bytes = field.bytes().await?;
            upload = Some((file_name, bytes));
            break;
        }
    }

    let Some((file_name, bytes)) = upload.filter(|(_, bytes)| !bytes.is_empty()) else {
        return Ok(Html(render::placeholder_page()));
    };
    info!(file_name = ?file_name, bytes = bytes.len(), "pdf uploaded");

    let analysis = analyze_pdf(bytes).await?;
    Ok(Html(render::results_page(file_name.as_deref(), &analysis)))
}

#[derive(Debug, Deserialize)]
struct DownloadForm {
    text: String,
}

async fn download(Form(form): Form<DownloadForm>) -> impl IntoResponse {
    // Browsers submit textarea content with CRLF line breaks; cleaned text is LF only.
    let text = form.text.replace("\r\n", "\n");
    let disposition = format!("attachment; filename=\"{}\"", render::DOWNLOAD_FILE_NAME);
    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    )
}

async fn api_analyze(body: Bytes) -> Result<Json<DocumentAnalysis>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::InvalidRequest("request body must contain a PDF".to_string()));
    }
    Ok(Json(analyze_pdf(body).await?))
}

async fn api_refine(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<RefinedAnalysis>, ApiError> {
    if body.is_empty() {
        return Err(ApiError::InvalidRequest("request body must contain a PDF".to_string()));
    }
    let raw = tokio::task::spawn_blocking(move || extract_text(&body))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    let cleaned = clean_text(&raw);
    let refined = state.refiner.refine(&cleaned).await?;
    Ok(Json(refined))
}

async fn analyze_pdf(bytes: Bytes) -> Result<DocumentAnalysis, ApiError> {
    let analysis = tokio::task::spawn_blocking(move || process(&bytes))
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))??;
    Ok(analysis)
}
