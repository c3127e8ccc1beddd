//! Required section and subsection presence checks.

use shared_docx::DocxDocument;
use shared_types::{RuleConfig, Severity, Violation, ViolationKind};

/// Required chapters match case-insensitively against detected headings;
/// required subsections match as literal substrings anywhere in the
/// document once their chapter is present.
pub fn check_required_sections(config: &RuleConfig, doc: &DocxDocument) -> Vec<Violation> {
    let mut violations = Vec::new();

    let chapter_headings: Vec<String> = doc
        .paragraphs
        .iter()
        .map(|p| p.text().trim().to_uppercase())
        .filter(|text| text.starts_with("BAB "))
        .collect();

    let rules = &config.document_types.proposal;
    for required in &rules.required_sections {
        let wanted = required.to_uppercase();
        let found = chapter_headings.iter().any(|h| h.contains(&wanted));
        if !found {
            violations.push(Violation::manual(
                ViolationKind::StructureError,
                Severity::Error,
                format!("Missing required section '{required}'"),
                "Document structure",
            ));
        }
    }

    for (chapter, subsections) in &rules.subsections {
        let chapter_upper = chapter.to_uppercase();
        let chapter_found = chapter_headings.iter().any(|h| h.contains(&chapter_upper));
        if !chapter_found {
            continue;
        }

        for subsection in subsections {
            let found = doc
                .paragraphs
                .iter()
                .any(|p| p.text().contains(subsection.as_str()));
            if !found {
                violations.push(Violation::manual(
                    ViolationKind::SubsectionMissing,
                    Severity::Warning,
                    format!("Missing subsection '{subsection}' in {chapter}"),
                    chapter.clone(),
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
    fn test_missing_required_section_is_error() {
        let config = RuleConfig::default();
        let doc = doc_with(&["BAB I PENDAHULUAN", "BAB II TINJAUAN PUSTAKA"]);

        let violations = check_required_sections(&config, &doc);
        let missing: Vec<&Violation> = violations
            .iter()
            .filter(|v| v.kind == ViolationKind::StructureError)
            .collect();
        assert_eq!(missing.len(), 1);
        assert_eq!(
            missing[0].message,
            "Missing required section 'BAB III METODE PENELITIAN'"
        );
    }

    #[test]
    fn test_subsections_only_required_when_chapter_present() {
        let config = RuleConfig::default();
        // Only PENDAHULUAN exists; its subsections are all absent.
        let doc = doc_with(&["BAB I PENDAHULUAN", "isi bab"]);

        let violations = check_required_sections(&config, &doc);
        let subsection_warnings: Vec<&Violation> = violations
            .iter()
            .filter(|v| v.kind == ViolationKind::SubsectionMissing)
            .collect();
        assert_eq!(subsection_warnings.len(), 4);
        assert_eq!(subsection_warnings[0].severity, Severity::Warning);
        assert_eq!(subsection_warnings[0].location.as_deref(), Some("PENDAHULUAN"));
        // No warnings for chapters that are themselves missing.
        assert!(!violations
            .iter()
            .any(|v| v.message.contains("Landasan Teori")));
    }

    #[test]
    fn test_subsection_satisfied_by_substring_anywhere() {
        let config = RuleConfig::default();
        let doc = doc_with(&[
            "BAB I PENDAHULUAN",
            "1.1 Latar Belakang",
            "1.2 Rumusan Masalah",
            "1.3 Tujuan Penelitian",
            "1.4 Manfaat Penelitian",
        ]);

        let violations = check_required_sections(&config, &doc);
        assert!(!violations
            .iter()
            .any(|v| v.kind == ViolationKind::SubsectionMissing));
    }
}
