//! Numeric writing-convention checks.

use restructure_core::patterns;
use shared_docx::DocxDocument;
use shared_types::{CorrectionRequest, Severity, Violation, ViolationKind};

/// Flags digits opening a sentence (should be spelled out, manual fix) and
/// dot decimal separators (auto-correctable to the comma convention, one
/// finding per paragraph).
pub fn check_text_formatting(doc: &DocxDocument) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (para_idx, paragraph) in doc.paragraphs.iter().enumerate() {
        let text = paragraph.text();

        for (sentence_idx, sentence) in text.split(". ").enumerate() {
            let sentence = sentence.trim();
            if patterns::SENTENCE_STARTS_WITH_DIGIT.is_match(sentence) {
                let excerpt: String = sentence.chars().take(20).collect();
                violations.push(Violation::manual(
                    ViolationKind::NumberStartSentence,
                    Severity::Warning,
                    format!("Number at sentence start should be written as words: \"{excerpt}...\""),
                    format!("Paragraph {}, Sentence {}", para_idx + 1, sentence_idx + 1),
                ));
            }
        }

        if patterns::DECIMAL_NUMBER.is_match(&text) {
            violations.push(Violation::correctable(
                ViolationKind::DecimalSeparator,
                Severity::Warning,
                "Use comma (,) as decimal separator, not period (.)",
                format!("Paragraph {}", para_idx + 1),
                CorrectionRequest::DecimalSeparator {
                    replace_dots_with_commas: true,
                },
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
    fn test_digit_opening_sentence_flagged() {
        let doc = doc_with(&["Pengamatan dilakukan dua kali. 25 sampel diambil setiap sesi."]);

        let violations = check_text_formatting(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::NumberStartSentence);
        assert_eq!(
            violations[0].location.as_deref(),
            Some("Paragraph 1, Sentence 2")
        );
        assert!(violations[0].message.contains("25 sampel"));
        assert!(!violations[0].auto_correctable);
    }

    #[test]
    fn test_decimal_flagged_once_per_paragraph() {
        let doc = doc_with(&["suhu 36.5 hingga 37.2 derajat", "teks tanpa angka"]);

        let violations = check_text_formatting(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::DecimalSeparator);
        assert_eq!(
            violations[0].correction,
            Some(CorrectionRequest::DecimalSeparator {
                replace_dots_with_commas: true,
            })
        );
    }

    #[test]
    fn test_detection_is_broader_than_rewrite() {
        // Version numbers are detected here even though the corrector will
        // leave them untouched; the warning asks for review either way.
        let doc = doc_with(&["aplikasi versi 2.0.1"]);
        let violations = check_text_formatting(&doc);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].kind, ViolationKind::DecimalSeparator);
    }

    #[test]
    fn test_clean_text_passes() {
        let doc = doc_with(&["Dua puluh lima sampel diambil. Semua valid."]);
        assert_eq!(check_text_formatting(&doc), Vec::new());
    }
}
