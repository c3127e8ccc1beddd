//! Chapter ordering check, delegating to the structure analyzer.

use restructure_core::analyzer;
use restructure_core::StructureAnalyzer;
use shared_docx::DocxDocument;
use shared_types::{RuleConfig, Severity, Violation, ViolationKind};

/// Surfaces the analyzer's ordering and missing-chapter findings, plus one
/// document-level reordering violation carrying the executable restructure
/// instruction when the chapter sequence is out of order.
pub fn check_chapter_order(config: &RuleConfig, doc: &DocxDocument) -> Vec<Violation> {
    let analysis = StructureAnalyzer::new(config).analyze(doc);
    let mut violations = analysis.structure_issues.clone();

    if analysis.reordering_needed {
        violations.push(Violation::correctable(
            ViolationKind::DocumentReordering,
            Severity::Error,
            "Document chapters are not in the correct order and need to be restructured",
            "Document structure",
            analyzer::reorder_request(&analysis.chapters),
        ));
    }

    violations.extend(analysis.missing_sections);
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_docx::{Paragraph, Run};
    use shared_types::CorrectionRequest;

    fn doc_with(texts: &[&str]) -> DocxDocument {
        let mut doc = DocxDocument::new();
        for text in texts {
            doc.add_paragraph(Paragraph {
                runs: vec![Run::text(*text)],
                ..Paragraph::default()
            });
        }
        doc
    }

    #[test]
    fn test_ordered_document_reports_nothing_beyond_missing() {
        let config = RuleConfig::default();
        let doc = doc_with(&[
            "BAB I PENDAHULUAN",
            "BAB II TINJAUAN PUSTAKA",
            "BAB III METODE PENELITIAN",
        ]);
        assert_eq!(check_chapter_order(&config, &doc), Vec::new());
    }

    #[test]
    fn test_scrambled_document_gets_reordering_violation() {
        let config = RuleConfig::default();
        let doc = doc_with(&[
            "BAB III METODE PENELITIAN",
            "BAB I PENDAHULUAN",
            "BAB II TINJAUAN PUSTAKA",
        ]);

        let violations = check_chapter_order(&config, &doc);
        // One analyzer ordering issue plus the document-level violation.
        assert_eq!(violations.len(), 2);

        let reordering = violations
            .iter()
            .find(|v| v.kind == ViolationKind::DocumentReordering)
            .unwrap();
        assert!(reordering.auto_correctable);
        let Some(CorrectionRequest::DocumentRestructure {
            current_order,
            correct_order,
            ..
        }) = &reordering.correction
        else {
            panic!("expected restructure correction");
        };
        assert_eq!(current_order[0], "METODE PENELITIAN");
        assert_eq!(correct_order[0], "PENDAHULUAN");
    }

    #[test]
    fn test_missing_chapters_surface_through_order_check() {
        let config = RuleConfig::default();
        let doc = doc_with(&["BAB I PENDAHULUAN"]);

        let violations = check_chapter_order(&config, &doc);
        assert_eq!(violations.len(), 2);
        assert!(violations
            .iter()
            .all(|v| v.kind == ViolationKind::MissingChapter));
    }
}
