//! HTTP handlers for the Thesis Format API

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use format_engine::{report, severity_summary, Validator};
use restructure_core::{Corrector, Restructurer};
use shared_docx::storage;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

const MAX_FILE_SIZE_MB: usize = 50;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Upload a document, store it, back it up and run a full validation
pub async fn upload(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UploadRequest>,
) -> Result<Json<UploadResponse>, ApiError> {
    // Keep only the final name component; clients may send full paths
    let filename = std::path::Path::new(&req.filename)
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| ApiError::InvalidRequest("No file selected".to_string()))?;

    if !filename.to_lowercase().ends_with(".docx") {
        return Err(ApiError::InvalidRequest(
            "Only .docx files are allowed".to_string(),
        ));
    }

    let content = BASE64
        .decode(&req.content_base64)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid base64 content: {}", e)))?;
    if content.len() > MAX_FILE_SIZE_MB * 1024 * 1024 {
        return Err(ApiError::FileTooLarge(MAX_FILE_SIZE_MB));
    }

    let file_id = Uuid::new_v4().to_string();
    let original_path = state.storage_dir.join(format!("{}_{}", file_id, filename));
    std::fs::write(&original_path, &content)
        .map_err(|e| ApiError::Internal(e.into()))?;

    let backup_path = storage::create_backup(&original_path)?;

    let validator = Validator::new(&state.config);
    let mut result = validator.process(&original_path)?;
    result.backup_path = Some(backup_path);

    tracing::info!("Uploaded document: {} ({})", file_id, filename);

    Ok(Json(UploadResponse {
        success: true,
        file_id,
        filename,
        result,
    }))
}

/// Validate a stored document against the active rule set
pub async fn validate(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<ValidateResponse>, ApiError> {
    let doc_path = find_document(&state, &file_id)?;

    let validator = Validator::new(&state.config);
    let violations = validator.validate_file(&doc_path);
    let summary = severity_summary(&violations);

    Ok(Json(ValidateResponse {
        success: true,
        total_violations: violations.len(),
        severity_summary: summary,
        violations,
    }))
}

/// Apply the requested corrections to a stored document
pub async fn correct(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
    Json(req): Json<CorrectRequest>,
) -> Result<Json<CorrectResponse>, ApiError> {
    let doc_path = find_document(&state, &file_id)?;

    let corrector = Corrector::new(&state.config);
    let outcome = corrector.apply(&doc_path, &req.corrections);

    Ok(Json(CorrectResponse {
        success: true,
        corrections_applied: outcome.applied,
        corrections_failed: outcome.failed,
        corrected_file_path: outcome.corrected_path,
    }))
}

/// Reorder document chapters into canonical order
pub async fn restructure(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
    Json(req): Json<RestructureRequest>,
) -> Result<Json<shared_types::RestructureOutcome>, ApiError> {
    let doc_path = find_document(&state, &file_id)?;

    let restructurer = Restructurer::new(&state.config);
    let outcome = restructurer.restructure(&doc_path, req.options.unwrap_or_default());

    Ok(Json(outcome))
}

/// Preview restructuring changes without writing anything
pub async fn preview_restructure(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<PreviewResponse>, ApiError> {
    let doc_path = find_document(&state, &file_id)?;

    let restructurer = Restructurer::new(&state.config);
    let preview = restructurer.preview(&doc_path);

    Ok(Json(PreviewResponse {
        success: true,
        preview,
    }))
}

/// Generate and download the plain-text compliance report
pub async fn report(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let doc_path = find_document(&state, &file_id)?;

    let doc = shared_docx::load(&doc_path)?;
    let validator = Validator::new(&state.config);
    let violations = validator.validate(&doc);
    let text = report::generate_report(&state.config, &doc.document_info(), &violations);

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"compliance_report_{}.txt\"", file_id),
        ),
    ];
    Ok((headers, text))
}

/// Download the corrected artifact when present, otherwise the original
pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let corrected = state.storage_dir.join(format!("{}_corrected.docx", file_id));
    let (path, download_name) = if corrected.exists() {
        (corrected, format!("corrected_{}.docx", file_id))
    } else {
        let original = find_document(&state, &file_id)?;
        let name = original
            .file_name()
            .and_then(|n| n.to_str())
            .map(|n| n.trim_start_matches(&format!("{}_", file_id)).to_string())
            .unwrap_or_else(|| format!("{}.docx", file_id));
        (original, name)
    };

    let bytes = std::fs::read(&path).map_err(|e| ApiError::Internal(e.into()))?;
    let headers = [
        (
            header::CONTENT_TYPE,
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
                .to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", download_name),
        ),
    ];
    Ok((headers, bytes))
}

/// Report whether a document's artifacts exist, without loading them
pub async fn status(
    State(state): State<Arc<AppState>>,
    Path(file_id): Path<String>,
) -> Result<Json<StatusResponse>, ApiError> {
    let artifacts = storage::artifacts_for_id(&state.storage_dir, &file_id)
        .map_err(|e| ApiError::Internal(e.into()))?;

    if artifacts.is_empty() {
        return Ok(Json(StatusResponse {
            status: "not_found".to_string(),
            files_found: None,
            timestamp: None,
        }));
    }

    Ok(Json(StatusResponse {
        status: "completed".to_string(),
        files_found: Some(artifacts.len()),
        timestamp: Some(chrono::Local::now().to_rfc3339()),
    }))
}

/// Return the active rule set
pub async fn rules(State(state): State<Arc<AppState>>) -> Json<shared_types::RuleConfig> {
    Json(state.config.clone())
}

fn find_document(state: &AppState, file_id: &str) -> Result<PathBuf, ApiError> {
    storage::find_by_id(&state.storage_dir, file_id)
        .map_err(|_| ApiError::DocumentNotFound(file_id.to_string()))
}
