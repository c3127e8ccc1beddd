//! Rule-driven formatting validation for thesis documents.
//!
//! The validator runs a fixed sequence of checks over the in-memory
//! document and returns findings in detection order. Checks never abort the
//! sequence; a document that cannot even be opened yields a single
//! system-error finding instead.

pub mod checks;
pub mod report;

use std::path::Path;

use shared_docx::{DocxDocument, DocxError};
use shared_types::{
    CorrectionOutcome, CorrectionRequest, ProcessingResult, RuleConfig, Severity,
    SeveritySummary, Violation,
};

use restructure_core::Corrector;

/// Validator entry point. Holds only the rule set; every call computes a
/// fresh result.
pub struct Validator<'a> {
    config: &'a RuleConfig,
}

impl<'a> Validator<'a> {
    pub fn new(config: &'a RuleConfig) -> Self {
        Self { config }
    }

    /// Run all checks over an already-loaded document.
    pub fn validate(&self, doc: &DocxDocument) -> Vec<Violation> {
        let mut violations = Vec::new();

        violations.extend(checks::page_setup::check_margins(self.config, doc));
        violations.extend(checks::typography::check_typography(self.config, doc));
        violations.extend(checks::structure::check_required_sections(self.config, doc));
        violations.extend(checks::order::check_chapter_order(self.config, doc));
        violations.extend(checks::headings::check_headings(doc));
        violations.extend(checks::tables::check_table_titles(doc));
        violations.extend(checks::text_format::check_text_formatting(doc));

        tracing::info!(violations = violations.len(), "document validation completed");
        violations
    }

    /// Load and validate a file. An unreadable file becomes a single
    /// system-error finding so callers always get a violation list.
    pub fn validate_file(&self, path: &Path) -> Vec<Violation> {
        match shared_docx::load(path) {
            Ok(doc) => self.validate(&doc),
            Err(e) => vec![Violation::system_error(format!("Validation error: {e}"))],
        }
    }

    /// Full validation bundle for upload and status responses.
    pub fn process(&self, path: &Path) -> Result<ProcessingResult, DocxError> {
        let doc = shared_docx::load(path)?;
        let violations = self.validate(&doc);
        Ok(ProcessingResult {
            document_info: doc.document_info(),
            severity_summary: severity_summary(&violations),
            auto_correctable: auto_correctable(&violations),
            violations,
            backup_path: None,
        })
    }

    /// Validate, then apply every correction the findings carry.
    pub fn apply_all(&self, path: &Path) -> CorrectionOutcome {
        let requests: Vec<CorrectionRequest> = self
            .validate_file(path)
            .into_iter()
            .filter_map(|v| v.correction)
            .collect();
        Corrector::new(self.config).apply(path, &requests)
    }
}

/// Tally violations by severity. Empty input yields all-zero counts.
pub fn severity_summary(violations: &[Violation]) -> SeveritySummary {
    let mut summary = SeveritySummary::default();
    for violation in violations {
        match violation.severity {
            Severity::Error => summary.error += 1,
            Severity::Warning => summary.warning += 1,
            Severity::Suggestion => summary.suggestion += 1,
        }
    }
    summary
}

/// The subset of findings the corrector can act on, in detection order.
pub fn auto_correctable(violations: &[Violation]) -> Vec<Violation> {
    violations
        .iter()
        .filter(|v| v.auto_correctable)
        .cloned()
        .collect()
}
