//! Table caption reminders.

use shared_docx::DocxDocument;
use shared_types::{Severity, Violation, ViolationKind};

/// Caption text cannot be reliably matched to its table from the flat
/// paragraph stream, so every table gets a manual-verification suggestion
/// rather than a hard finding.
pub fn check_table_titles(doc: &DocxDocument) -> Vec<Violation> {
    (0..doc.table_count)
        .map(|table_idx| {
            Violation::manual(
                ViolationKind::TableTitleCheck,
                Severity::Suggestion,
                format!(
                    "Verify that Table {} has proper title format \"Tabel [NUMBER]. [Title]\"",
                    table_idx + 1
                ),
                format!("Table {}", table_idx + 1),
            )
        })
        .collect()
}
