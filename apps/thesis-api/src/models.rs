//! Request/response models for the Thesis Format API

use restructure_core::RestructureOptions;
use serde::{Deserialize, Serialize};
use shared_types::{
    CorrectionRequest, ProcessingResult, RestructurePreview, SeveritySummary, Violation,
};
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
pub struct UploadRequest {
    pub filename: String,
    /// Base64-encoded docx bytes.
    pub content_base64: String,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file_id: String,
    pub filename: String,
    pub result: ProcessingResult,
}

#[derive(Debug, Serialize)]
pub struct ValidateResponse {
    pub success: bool,
    pub violations: Vec<Violation>,
    pub total_violations: usize,
    pub severity_summary: SeveritySummary,
}

#[derive(Debug, Deserialize)]
pub struct CorrectRequest {
    #[serde(default)]
    pub corrections: Vec<CorrectionRequest>,
}

#[derive(Debug, Serialize)]
pub struct CorrectResponse {
    pub success: bool,
    pub corrections_applied: Vec<String>,
    pub corrections_failed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_file_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RestructureRequest {
    #[serde(default)]
    pub options: Option<RestructureOptions>,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub success: bool,
    pub preview: RestructurePreview,
}

/// Processing status derived from which artifacts exist on disk.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub files_found: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
