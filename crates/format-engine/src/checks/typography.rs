//! Font family, font size and line spacing checks.

use shared_docx::DocxDocument;
use shared_types::{CorrectionRequest, RuleConfig, Severity, Violation, ViolationKind};

const SPACING_TOLERANCE: f64 = 0.1;

/// Checks every run of every non-empty paragraph. Runs that carry no
/// explicit font or size inherit from the document style and are not
/// flagged.
pub fn check_typography(config: &RuleConfig, doc: &DocxDocument) -> Vec<Violation> {
    let mut violations = Vec::new();
    let expected_font = config.body_font_family();
    let expected_size = config.body_font_size_pt();
    let expected_spacing = config.body_line_spacing();

    for (para_idx, paragraph) in doc.paragraphs.iter().enumerate() {
        if paragraph.is_empty() {
            continue;
        }
        let location = format!("Paragraph {}", para_idx + 1);

        for run in &paragraph.runs {
            if let Some(font_name) = &run.font_name {
                if font_name != expected_font {
                    violations.push(Violation::correctable(
                        ViolationKind::FontError,
                        Severity::Error,
                        format!("{font_name} font used instead of required {expected_font}"),
                        location.clone(),
                        CorrectionRequest::Font {
                            font_name: expected_font.to_string(),
                        },
                    ));
                }
            }

            if let Some(size_pt) = run.size_pt {
                if size_pt != expected_size {
                    violations.push(Violation::correctable(
                        ViolationKind::FontSizeError,
                        Severity::Error,
                        format!(
                            "Font size {size_pt}pt used instead of required {expected_size}pt"
                        ),
                        location.clone(),
                        CorrectionRequest::FontSize {
                            size_pt: expected_size,
                        },
                    ));
                }
            }
        }

        if let Some(spacing) = paragraph.line_spacing {
            if (spacing - expected_spacing).abs() > SPACING_TOLERANCE {
                violations.push(Violation::correctable(
                    ViolationKind::LineSpacingError,
                    Severity::Error,
                    format!(
                        "{spacing} spacing used instead of required {expected_spacing} \
                         line spacing"
                    ),
                    location,
                    CorrectionRequest::LineSpacing {
                        spacing: expected_spacing,
                    },
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_docx::{Paragraph, Run};

    fn paragraph_with_run(run: Run) -> Paragraph {
        Paragraph {
            runs: vec![run],
            ..Paragraph::default()
        }
    }

    #[test]
    fn test_unstyled_runs_are_not_flagged() {
        let config = RuleConfig::default();
        let mut doc = DocxDocument::new();
        doc.add_paragraph(paragraph_with_run(Run::text("teks tanpa gaya eksplisit")));
        assert_eq!(check_typography(&config, &doc), Vec::new());
    }

    #[test]
    fn test_wrong_font_and_size_flagged_per_run() {
        let config = RuleConfig::default();
        let mut doc = DocxDocument::new();
        doc.add_paragraph(paragraph_with_run(Run {
            text: "teks".to_string(),
            font_name: Some("Arial".to_string()),
            size_pt: Some(11.0),
            bold: None,
            italic: None,
        }));

        let violations = check_typography(&config, &doc);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].kind, ViolationKind::FontError);
        assert_eq!(
            violations[0].message,
            "Arial font used instead of required Times New Roman"
        );
        assert_eq!(violations[1].kind, ViolationKind::FontSizeError);
        assert_eq!(violations[1].location.as_deref(), Some("Paragraph 1"));
    }

    #[test]
    fn test_line_spacing_tolerance() {
        let config = RuleConfig::default();
        let mut doc = DocxDocument::new();
        let mut close = paragraph_with_run(Run::text("dekat"));
        close.line_spacing = Some(1.95);
        doc.add_paragraph(close);
        let mut off = paragraph_with_run(Run::text("jauh"));
        off.line_spacing = Some(1.5);
        doc.add_paragraph(off);

        let violations = check_typography(&config, &doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::LineSpacingError);
        assert_eq!(violations[0].location.as_deref(), Some("Paragraph 2"));
        assert_eq!(
            violations[0].correction,
            Some(CorrectionRequest::LineSpacing { spacing: 2.0 })
        );
    }

    #[test]
    fn test_empty_paragraphs_skipped() {
        let config = RuleConfig::default();
        let mut doc = DocxDocument::new();
        let mut empty = paragraph_with_run(Run {
            text: "   ".to_string(),
            font_name: Some("Arial".to_string()),
            ..Run::default()
        });
        empty.line_spacing = Some(1.0);
        doc.add_paragraph(empty);
        assert_eq!(check_typography(&config, &doc), Vec::new());
    }
}
