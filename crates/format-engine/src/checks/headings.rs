//! Chapter heading style checks: alignment, bold, strict format.

use restructure_core::patterns;
use shared_docx::{Alignment, DocxDocument};
use shared_types::{CorrectionRequest, Severity, Violation, ViolationKind};

/// Every `BAB `-prefixed paragraph must be centered with a bold first run.
/// Both defects share the heading-alignment correction, which centers and
/// bolds in one pass. The strict format check is report-only: free-text
/// titles cannot be rewritten safely.
pub fn check_headings(doc: &DocxDocument) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (para_idx, paragraph) in doc.paragraphs.iter().enumerate() {
        let text = paragraph.text().trim().to_string();
        if !text.to_uppercase().starts_with("BAB ") {
            continue;
        }
        let location = format!("Paragraph {}", para_idx + 1);

        if paragraph.alignment != Some(Alignment::Center) {
            violations.push(Violation::correctable(
                ViolationKind::HeadingAlignment,
                Severity::Error,
                format!("Chapter heading \"{text}\" should be center-aligned"),
                location.clone(),
                CorrectionRequest::HeadingAlignment {
                    alignment: "center".to_string(),
                },
            ));
        }

        if let Some(first_run) = paragraph.runs.first() {
            if first_run.bold != Some(true) {
                violations.push(Violation::correctable(
                    ViolationKind::HeadingBold,
                    Severity::Error,
                    format!("Chapter heading \"{text}\" should be bold"),
                    location.clone(),
                    CorrectionRequest::HeadingAlignment {
                        alignment: "center".to_string(),
                    },
                ));
            }
        }

        if !patterns::HEADING_FORMAT.is_match(&text.to_uppercase()) {
            violations.push(Violation::manual(
                ViolationKind::HeadingFormat,
                Severity::Warning,
                format!("Chapter heading format should be \"BAB [ROMAN] [TITLE]\": \"{text}\""),
                location,
            ));
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_docx::{Paragraph, Run};

    fn heading(text: &str, alignment: Option<Alignment>, bold: Option<bool>) -> Paragraph {
        Paragraph {
            runs: vec![Run {
                text: text.to_string(),
                bold,
                ..Run::default()
            }],
            alignment,
            line_spacing: None,
        }
    }

    #[test]
    fn test_well_formed_heading_passes() {
        let mut doc = DocxDocument::new();
        doc.add_paragraph(heading(
            "BAB I PENDAHULUAN",
            Some(Alignment::Center),
            Some(true),
        ));
        assert_eq!(check_headings(&doc), Vec::new());
    }

    #[test]
    fn test_left_aligned_unbolded_heading_flags_both() {
        let mut doc = DocxDocument::new();
        doc.add_paragraph(heading("BAB I PENDAHULUAN", None, None));

        let violations = check_headings(&doc);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].kind, ViolationKind::HeadingAlignment);
        assert_eq!(violations[1].kind, ViolationKind::HeadingBold);
        // Both resolve through the same correction group.
        for v in &violations {
            assert_eq!(
                v.correction,
                Some(CorrectionRequest::HeadingAlignment {
                    alignment: "center".to_string(),
                })
            );
        }
    }

    #[test]
    fn test_malformed_numeral_is_format_warning_only() {
        let mut doc = DocxDocument::new();
        doc.add_paragraph(heading(
            "BAB SATU PENDAHULUAN",
            Some(Alignment::Center),
            Some(true),
        ));

        let violations = check_headings(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::HeadingFormat);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert!(!violations[0].auto_correctable);
    }

    #[test]
    fn test_body_paragraphs_ignored() {
        let mut doc = DocxDocument::new();
        doc.add_paragraph(heading("Babak baru penelitian", None, None));
        doc.add_paragraph(heading("paragraf isi biasa", None, None));
        assert_eq!(check_headings(&doc), Vec::new());
    }
}
