//! End-to-end flow tests for the thesis API storage and engine wiring.
//!
//! Exercises the same sequence the handlers run: store an upload, back it
//! up, validate, correct, and pick the right artifact for download.

use pretty_assertions::assert_eq;
use std::path::Path;

use format_engine::{severity_summary, Validator};
use restructure_core::Corrector;
use shared_docx::{storage, Alignment, DocxDocument, Paragraph, Run};
use shared_types::RuleConfig;

fn sample_document() -> DocxDocument {
    let mut doc = DocxDocument::new();
    doc.metadata.title = Some("Proposal Tesis".to_string());
    doc.sections[0].margins.top_cm = 2.54;
    doc.sections[0].margins.bottom_cm = 3.0;
    doc.sections[0].margins.left_cm = 4.0;
    doc.sections[0].margins.right_cm = 3.0;

    doc.add_paragraph(Paragraph {
        runs: vec![Run {
            text: "BAB I PENDAHULUAN".to_string(),
            bold: Some(true),
            ..Run::default()
        }],
        alignment: Some(Alignment::Center),
        line_spacing: None,
    });
    doc.add_paragraph(Paragraph {
        runs: vec![Run::text("Latar Belakang penelitian ini jelas.")],
        alignment: Some(Alignment::Justify),
        line_spacing: Some(2.0),
    });
    doc
}

#[test]
fn upload_validate_correct_download_flow() {
    let dir = tempfile::tempdir().unwrap();
    let file_id = "11111111-2222-3333-4444-555555555555";

    // Upload: store as <id>_<name> and create the backup.
    let original_path = dir.path().join(format!("{file_id}_proposal.docx"));
    shared_docx::save(&sample_document(), &original_path).unwrap();
    let backup_path = storage::create_backup(&original_path).unwrap();
    assert!(backup_path.ends_with(format!("{file_id}_backup.docx")));

    // Lookup resolves the original, not the backup.
    let found = storage::find_by_id(dir.path(), file_id).unwrap();
    assert_eq!(found, original_path);

    // Validation reports the wrong top margin.
    let config = RuleConfig::default();
    let validator = Validator::new(&config);
    let result = validator.process(&found).unwrap();
    assert_eq!(result.document_info.title, "Proposal Tesis");
    assert!(result
        .violations
        .iter()
        .any(|v| v.message.starts_with("Top margin")));
    assert_eq!(
        severity_summary(&result.violations).total(),
        result.violations.len()
    );

    // Correction consumes the violations' own correction payloads.
    let corrections: Vec<_> = result
        .auto_correctable
        .iter()
        .filter_map(|v| v.correction.clone())
        .collect();
    assert!(!corrections.is_empty());
    let outcome = Corrector::new(&config).apply(&found, &corrections);
    assert!(outcome.failed.is_empty(), "{:?}", outcome.failed);

    // Download prefers the corrected artifact once it exists.
    let corrected = dir.path().join(format!("{file_id}_corrected.docx"));
    assert_eq!(outcome.corrected_path.as_deref(), Some(corrected.as_path()));
    assert!(corrected.exists());

    // And the corrected artifact is clean of auto-correctable findings.
    let after = validator.validate_file(&corrected);
    assert!(after.iter().all(|v| !v.auto_correctable), "{after:?}");

    // Status sees every artifact: original, backup and corrected.
    let artifacts = storage::artifacts_for_id(dir.path(), file_id).unwrap();
    assert_eq!(artifacts.len(), 3);
    assert!(storage::artifacts_for_id(dir.path(), "unknown-id")
        .unwrap()
        .is_empty());
}

#[test]
fn missing_document_is_reported_as_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let err = storage::find_by_id(dir.path(), "does-not-exist").unwrap_err();
    assert!(matches!(err, shared_docx::DocxError::NotFound(_)));
}

#[test]
fn correction_request_wire_shape_matches_clients() {
    // The correct endpoint accepts the same tagged shape the validator
    // emits; a client can echo violations' corrections verbatim.
    let json = r#"[
        {"type":"margin","margin":"top","value_cm":4.0},
        {"type":"decimal_separator","replace_dots_with_commas":true}
    ]"#;
    let parsed: Vec<shared_types::CorrectionRequest> = serde_json::from_str(json).unwrap();
    assert_eq!(parsed.len(), 2);
    assert_eq!(parsed[0].type_name(), "margin");
    assert_eq!(parsed[1].type_name(), "decimal_separator");
}

#[test]
fn derived_paths_never_collide_with_originals() {
    let original = Path::new("temp/abc_proposal.docx");
    let corrected = storage::derived_path(original, "corrected");
    let restructured = storage::derived_path(original, "restructured");
    assert_ne!(corrected, original);
    assert_ne!(restructured, corrected);
}
