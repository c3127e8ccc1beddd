//! Builds the logical chapter/subsection index of a document.

use shared_docx::DocxDocument;
use shared_types::{
    ChapterInfo, CorrectionRequest, RuleConfig, Severity, StructureAnalysis, SubsectionInfo,
    Violation, ViolationKind,
};

use crate::patterns;
use crate::roman;

/// Scans paragraph text for chapter headings and subsections and derives
/// ordering/missing-section defects. Stateless apart from the rule set;
/// every call computes a fresh analysis.
pub struct StructureAnalyzer<'a> {
    config: &'a RuleConfig,
}

impl<'a> StructureAnalyzer<'a> {
    pub fn new(config: &'a RuleConfig) -> Self {
        Self { config }
    }

    pub fn analyze(&self, doc: &DocxDocument) -> StructureAnalysis {
        let mut analysis = StructureAnalysis::default();

        for (paragraph_index, paragraph) in doc.paragraphs.iter().enumerate() {
            let text = paragraph.text().trim().to_uppercase();
            let Some(caps) = patterns::CHAPTER_HEADING.captures(&text) else {
                continue;
            };
            let roman_numeral = caps[1].to_string();
            let title = caps[2].trim().to_string();
            let chapter_number = roman::roman_to_int(&roman_numeral);

            analysis.chapters.push(ChapterInfo {
                paragraph_index,
                chapter_number,
                title,
                full_text: text.clone(),
                roman_numeral,
                subsections: Vec::new(),
            });
        }

        self.check_ordering(&mut analysis);
        self.check_required_chapters(&mut analysis);
        extract_subsections(doc, &mut analysis.chapters);

        tracing::debug!(
            chapters = analysis.chapters.len(),
            reordering_needed = analysis.reordering_needed,
            "structure analysis complete"
        );
        analysis
    }

    fn check_ordering(&self, analysis: &mut StructureAnalysis) {
        if analysis.chapters.len() < 2 {
            return;
        }

        let numbers: Vec<u32> = analysis.chapters.iter().map(|c| c.chapter_number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        if numbers == sorted {
            return;
        }

        analysis.reordering_needed = true;
        analysis.structure_issues.push(Violation::correctable(
            ViolationKind::ChapterOrder,
            Severity::Error,
            format!(
                "Chapters are not in correct order: found {:?}, should be {:?}",
                numbers, sorted
            ),
            "Document structure",
            reorder_request(&analysis.chapters),
        ));
    }

    fn check_required_chapters(&self, analysis: &mut StructureAnalysis) {
        for required in &self.config.document_types.proposal.required_sections {
            let wanted = patterns::REQUIRED_SECTION_PREFIX
                .replace(required.trim(), "")
                .to_uppercase();
            let found = analysis
                .chapters
                .iter()
                .any(|chapter| chapter.title.contains(wanted.as_str()));

            if !found {
                analysis.missing_sections.push(Violation::manual(
                    ViolationKind::MissingChapter,
                    Severity::Error,
                    format!("Missing required chapter: {required}"),
                    "Document structure",
                ));
            }
        }
    }
}

/// Executable reorder instruction listing found and canonical title orders.
pub fn reorder_request(chapters: &[ChapterInfo]) -> CorrectionRequest {
    let current_order: Vec<String> = chapters.iter().map(|c| c.title.clone()).collect();
    let mut sorted: Vec<&ChapterInfo> = chapters.iter().collect();
    sorted.sort_by_key(|c| c.chapter_number);
    let correct_order: Vec<String> = sorted.iter().map(|c| c.title.clone()).collect();

    CorrectionRequest::DocumentRestructure {
        action: "reorder_chapters".to_string(),
        current_order,
        correct_order,
    }
}

/// Attribute subsection headings to the chapter whose heading most recently
/// preceded them.
fn extract_subsections(doc: &DocxDocument, chapters: &mut [ChapterInfo]) {
    let mut current_chapter: Option<usize> = None;

    for (paragraph_index, paragraph) in doc.paragraphs.iter().enumerate() {
        let text = paragraph.text().trim().to_string();

        if patterns::CHAPTER_PREFIX.is_match(&text.to_uppercase()) {
            current_chapter = Some(current_chapter.map_or(0, |idx| idx + 1));
            continue;
        }

        let Some(caps) = patterns::SUBSECTION.captures(&text) else {
            continue;
        };
        if let Some(chapter) = current_chapter.and_then(|idx| chapters.get_mut(idx)) {
            chapter.subsections.push(SubsectionInfo {
                paragraph_index,
                number: caps[1].to_string(),
                title: caps[2].to_string(),
                full_text: text,
            });
        }
    }
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
    fn test_detects_chapters_in_source_order() {
        let config = RuleConfig::default();
        let analyzer = StructureAnalyzer::new(&config);
        let doc = doc_with(&[
            "BAB I PENDAHULUAN",
            "isi bab satu",
            "BAB II TINJAUAN PUSTAKA",
            "BAB III METODE PENELITIAN",
        ]);

        let analysis = analyzer.analyze(&doc);
        assert_eq!(analysis.chapters.len(), 3);
        assert_eq!(analysis.chapters[0].chapter_number, 1);
        assert_eq!(analysis.chapters[1].title, "TINJAUAN PUSTAKA");
        assert_eq!(analysis.chapters[2].paragraph_index, 3);
        assert!(!analysis.reordering_needed);
        assert!(analysis.missing_sections.is_empty());
    }

    #[test]
    fn test_scrambled_order_flags_reordering() {
        let config = RuleConfig::default();
        let analyzer = StructureAnalyzer::new(&config);
        let doc = doc_with(&[
            "BAB II TINJAUAN PUSTAKA",
            "BAB I PENDAHULUAN",
            "BAB III METODE PENELITIAN",
        ]);

        let analysis = analyzer.analyze(&doc);
        assert!(analysis.reordering_needed);
        assert_eq!(analysis.structure_issues.len(), 1);

        let issue = &analysis.structure_issues[0];
        assert_eq!(issue.kind, ViolationKind::ChapterOrder);
        assert!(issue.auto_correctable);
        let Some(CorrectionRequest::DocumentRestructure { correct_order, .. }) =
            issue.correction.as_ref()
        else {
            panic!("expected restructure correction");
        };
        assert_eq!(
            correct_order,
            &vec![
                "PENDAHULUAN".to_string(),
                "TINJAUAN PUSTAKA".to_string(),
                "METODE PENELITIAN".to_string()
            ]
        );
    }

    #[test]
    fn test_missing_chapter_reported_independently_of_order() {
        let config = RuleConfig::default();
        let analyzer = StructureAnalyzer::new(&config);
        let doc = doc_with(&["BAB I PENDAHULUAN", "BAB II TINJAUAN PUSTAKA"]);

        let analysis = analyzer.analyze(&doc);
        assert!(!analysis.reordering_needed);
        assert_eq!(analysis.missing_sections.len(), 1);

        let missing = &analysis.missing_sections[0];
        assert_eq!(missing.kind, ViolationKind::MissingChapter);
        assert!(!missing.auto_correctable);
        assert!(missing.message.contains("BAB III METODE PENELITIAN"));
    }

    #[test]
    fn test_subsections_attach_to_preceding_chapter() {
        let config = RuleConfig::default();
        let analyzer = StructureAnalyzer::new(&config);
        let doc = doc_with(&[
            "BAB I PENDAHULUAN",
            "1.1 Latar Belakang",
            "isi latar belakang",
            "1.2 Rumusan Masalah",
            "BAB II TINJAUAN PUSTAKA",
            "2.1 Landasan Teori",
        ]);

        let analysis = analyzer.analyze(&doc);
        assert_eq!(analysis.chapters[0].subsections.len(), 2);
        assert_eq!(analysis.chapters[0].subsections[1].number, "1.2");
        assert_eq!(analysis.chapters[0].subsections[1].title, "Rumusan Masalah");
        assert_eq!(analysis.chapters[1].subsections.len(), 1);
        assert_eq!(analysis.chapters[1].subsections[0].paragraph_index, 5);
    }

    #[test]
    fn test_empty_document_yields_empty_analysis() {
        let config = RuleConfig::default();
        let analyzer = StructureAnalyzer::new(&config);
        let analysis = analyzer.analyze(&DocxDocument::new());

        assert!(analysis.chapters.is_empty());
        assert!(!analysis.reordering_needed);
        assert!(analysis.structure_issues.is_empty());
        // Every required chapter is missing from an empty document.
        assert_eq!(analysis.missing_sections.len(), 3);
    }

    #[test]
    fn test_single_chapter_trivially_ordered() {
        let config = RuleConfig::default();
        let analyzer = StructureAnalyzer::new(&config);
        let doc = doc_with(&["BAB II TINJAUAN PUSTAKA"]);

        let analysis = analyzer.analyze(&doc);
        assert!(!analysis.reordering_needed);
        assert!(analysis.structure_issues.is_empty());
    }
}
