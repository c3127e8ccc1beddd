//! Rebuilds a document with chapters in canonical order.

use std::path::Path;

use serde::{Deserialize, Serialize};
use shared_docx::{storage, Alignment, DocxDocument, Paragraph, Run};
use shared_types::{
    ChapterInfo, ChapterOrderEntry, RestructureOutcome, RestructurePreview, RuleConfig,
};

use crate::analyzer::StructureAnalyzer;
use crate::patterns;
use crate::roman;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RestructureOptions {
    pub reorder_chapters: bool,
}

impl Default for RestructureOptions {
    fn default() -> Self {
        Self {
            reorder_chapters: true,
        }
    }
}

/// Rewrites a document's chapter sequence into ascending order, preserving
/// run-level formatting of copied content. A document that is already in
/// order is left untouched: no artifact is written.
pub struct Restructurer<'a> {
    config: &'a RuleConfig,
    analyzer: StructureAnalyzer<'a>,
}

impl<'a> Restructurer<'a> {
    pub fn new(config: &'a RuleConfig) -> Self {
        Self {
            config,
            analyzer: StructureAnalyzer::new(config),
        }
    }

    pub fn analyze(&self, doc: &DocxDocument) -> shared_types::StructureAnalysis {
        self.analyzer.analyze(doc)
    }

    pub fn restructure(&self, path: &Path, options: RestructureOptions) -> RestructureOutcome {
        let source = match shared_docx::load(path) {
            Ok(doc) => doc,
            Err(e) => return failure(format!("Restructuring failed: {e}")),
        };

        let analysis = self.analyzer.analyze(&source);
        let original_order: Vec<String> =
            analysis.chapters.iter().map(|c| c.title.clone()).collect();

        if !options.reorder_chapters {
            return RestructureOutcome {
                success: true,
                message: "No restructuring actions requested".to_string(),
                changes_applied: Vec::new(),
                corrected_order: original_order.clone(),
                original_order,
                restructured_path: None,
            };
        }

        if !analysis.reordering_needed {
            return RestructureOutcome {
                success: true,
                message: "Document structure is already correct".to_string(),
                changes_applied: Vec::new(),
                corrected_order: original_order.clone(),
                original_order,
                restructured_path: None,
            };
        }

        let mut sorted_chapters: Vec<&ChapterInfo> = analysis.chapters.iter().collect();
        sorted_chapters.sort_by_key(|c| c.chapter_number);
        let corrected_order: Vec<String> =
            sorted_chapters.iter().map(|c| c.title.clone()).collect();

        let mut target = DocxDocument::new();
        target.metadata = source.metadata.clone();

        let mut changes_applied = Vec::new();
        for chapter in &sorted_chapters {
            target.add_paragraph(self.corrected_heading(chapter));
            changes_applied.push(format!("Reordered chapter: {}", chapter.title));

            let body_start = target.paragraphs.len();
            copy_chapter_span(&source, &mut target, chapter, &analysis.chapters);
            self.renumber_subsections(&mut target, body_start, chapter.chapter_number);
        }

        let restructured_path = storage::derived_path(path, "restructured");
        if let Err(e) = shared_docx::save(&target, &restructured_path) {
            return failure(format!("Restructuring failed: {e}"));
        }

        tracing::info!(
            path = %restructured_path.display(),
            chapters = sorted_chapters.len(),
            "document restructured"
        );
        RestructureOutcome {
            success: true,
            message: format!(
                "Document successfully restructured with {} changes",
                changes_applied.len()
            ),
            changes_applied,
            original_order,
            corrected_order,
            restructured_path: Some(restructured_path),
        }
    }

    /// Read-only variant for confirmation flows; never writes.
    pub fn preview(&self, path: &Path) -> RestructurePreview {
        let source = match shared_docx::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                return RestructurePreview {
                    preview_available: false,
                    message: Some(format!("Preview generation failed: {e}")),
                    current_order: Vec::new(),
                    corrected_order: Vec::new(),
                    changes_needed: 0,
                    structure_issues: Vec::new(),
                }
            }
        };

        let analysis = self.analyzer.analyze(&source);
        if !analysis.reordering_needed {
            return RestructurePreview {
                preview_available: false,
                message: Some("No restructuring needed".to_string()),
                current_order: Vec::new(),
                corrected_order: Vec::new(),
                changes_needed: 0,
                structure_issues: analysis.structure_issues,
            };
        }

        let current_order: Vec<ChapterOrderEntry> = analysis
            .chapters
            .iter()
            .map(|c| ChapterOrderEntry {
                roman: c.roman_numeral.clone(),
                title: c.title.clone(),
                number: c.chapter_number,
            })
            .collect();

        let mut sorted_chapters: Vec<&ChapterInfo> = analysis.chapters.iter().collect();
        sorted_chapters.sort_by_key(|c| c.chapter_number);
        let corrected_order: Vec<ChapterOrderEntry> = sorted_chapters
            .iter()
            .map(|c| ChapterOrderEntry {
                roman: roman::int_to_roman(c.chapter_number),
                title: c.title.clone(),
                number: c.chapter_number,
            })
            .collect();

        RestructurePreview {
            preview_available: true,
            message: None,
            changes_needed: analysis.chapters.len(),
            current_order,
            corrected_order,
            structure_issues: analysis.structure_issues,
        }
    }

    /// Heading rebuilt from the canonical numeral, in the configured body
    /// font: bold, centered.
    fn corrected_heading(&self, chapter: &ChapterInfo) -> Paragraph {
        let canonical_roman = roman::int_to_roman(chapter.chapter_number);
        Paragraph {
            runs: vec![Run {
                text: format!("BAB {} {}", canonical_roman, chapter.title),
                font_name: Some(self.config.body_font_family().to_string()),
                size_pt: Some(self.config.body_font_size_pt()),
                bold: Some(true),
                italic: None,
            }],
            alignment: Some(Alignment::Center),
            line_spacing: None,
        }
    }

    /// Rewrite `x.y` subsection prefixes in the freshly copied body so the
    /// leading component matches the chapter's number. Rewriting collapses
    /// the paragraph to a single run; prior run formatting there is lost.
    fn renumber_subsections(
        &self,
        target: &mut DocxDocument,
        body_start: usize,
        chapter_number: u32,
    ) {
        let mut counter = 1u32;

        for paragraph in target.paragraphs.iter_mut().skip(body_start) {
            let text = paragraph.text().trim().to_string();
            let Some(caps) = patterns::SUBSECTION_NUMBER.captures(&text) else {
                continue;
            };
            let current: u32 = match caps[1].parse() {
                Ok(n) => n,
                Err(_) => continue,
            };
            if current == chapter_number {
                continue;
            }

            let new_text = format!("{}.{} {}", chapter_number, counter, &caps[3]);
            paragraph.runs = vec![Run {
                text: new_text,
                font_name: Some(self.config.body_font_family().to_string()),
                size_pt: Some(self.config.body_font_size_pt()),
                bold: None,
                italic: None,
            }];
            counter += 1;
        }
    }
}

fn failure(message: String) -> RestructureOutcome {
    RestructureOutcome {
        success: false,
        message,
        changes_applied: Vec::new(),
        original_order: Vec::new(),
        corrected_order: Vec::new(),
        restructured_path: None,
    }
}

/// Copy the paragraphs strictly between a chapter's heading and the next
/// heading found in the original analysis, dropping empty paragraphs and
/// preserving per-run formatting.
fn copy_chapter_span(
    source: &DocxDocument,
    target: &mut DocxDocument,
    chapter: &ChapterInfo,
    all_chapters: &[ChapterInfo],
) {
    let start = chapter.paragraph_index;
    let end = all_chapters
        .iter()
        .map(|c| c.paragraph_index)
        .filter(|&idx| idx > start)
        .min()
        .unwrap_or(source.paragraphs.len());

    for paragraph in &source.paragraphs[start + 1..end] {
        if paragraph.is_empty() {
            continue;
        }
        target.add_paragraph(Paragraph {
            runs: paragraph.runs.clone(),
            alignment: paragraph.alignment,
            line_spacing: None,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_docx::DocMetadata;

    fn chapter_paragraph(text: &str) -> Paragraph {
        Paragraph {
            runs: vec![Run {
                text: text.to_string(),
                bold: Some(true),
                ..Run::default()
            }],
            alignment: Some(Alignment::Center),
            line_spacing: None,
        }
    }

    fn body_paragraph(text: &str) -> Paragraph {
        Paragraph {
            runs: vec![Run::text(text)],
            alignment: Some(Alignment::Justify),
            line_spacing: Some(2.0),
        }
    }

    fn scrambled_document() -> DocxDocument {
        let mut doc = DocxDocument::new();
        doc.metadata = DocMetadata {
            title: Some("Proposal".to_string()),
            author: Some("Rahmat".to_string()),
        };
        doc.add_paragraph(chapter_paragraph("BAB II TINJAUAN PUSTAKA"));
        doc.add_paragraph(body_paragraph("2.1 Landasan Teori"));
        // Styled body run, must come through the reorder untouched.
        let mut teori = body_paragraph("uraian teori");
        teori.runs[0].font_name = Some("Courier New".to_string());
        teori.runs[0].size_pt = Some(10.0);
        teori.runs[0].italic = Some(true);
        doc.add_paragraph(teori);
        doc.add_paragraph(chapter_paragraph("BAB I PENDAHULUAN"));
        doc.add_paragraph(body_paragraph("1.1 Latar Belakang"));
        doc.add_paragraph(Paragraph::default()); // dropped on copy
        doc.add_paragraph(body_paragraph("uraian latar belakang"));
        doc.add_paragraph(chapter_paragraph("BAB III METODE PENELITIAN"));
        doc.add_paragraph(body_paragraph("3.1 Jenis Penelitian"));
        doc
    }

    fn write_docx(doc: &DocxDocument, dir: &Path, name: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        shared_docx::save(doc, &path).unwrap();
        path
    }

    #[test]
    fn test_restructure_is_noop_on_ordered_document() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = DocxDocument::new();
        doc.add_paragraph(chapter_paragraph("BAB I PENDAHULUAN"));
        doc.add_paragraph(body_paragraph("isi"));
        doc.add_paragraph(chapter_paragraph("BAB II TINJAUAN PUSTAKA"));
        let path = write_docx(&doc, dir.path(), "abc_proposal.docx");

        let config = RuleConfig::default();
        let restructurer = Restructurer::new(&config);
        let outcome = restructurer.restructure(&path, RestructureOptions::default());

        assert!(outcome.success);
        assert!(outcome.changes_applied.is_empty());
        assert_eq!(outcome.restructured_path, None);
        assert!(!dir.path().join("abc_restructured.docx").exists());
    }

    #[test]
    fn test_restructure_sorts_scrambled_chapters() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_docx(&scrambled_document(), dir.path(), "abc_proposal.docx");

        let config = RuleConfig::default();
        let restructurer = Restructurer::new(&config);
        let outcome = restructurer.restructure(&path, RestructureOptions::default());

        assert!(outcome.success, "{}", outcome.message);
        assert_eq!(
            outcome.original_order,
            vec!["TINJAUAN PUSTAKA", "PENDAHULUAN", "METODE PENELITIAN"]
        );
        assert_eq!(
            outcome.corrected_order,
            vec!["PENDAHULUAN", "TINJAUAN PUSTAKA", "METODE PENELITIAN"]
        );
        assert_eq!(outcome.changes_applied.len(), 3);

        let restructured =
            shared_docx::load(outcome.restructured_path.as_ref().unwrap()).unwrap();
        let texts: Vec<String> = restructured.paragraphs.iter().map(|p| p.text()).collect();
        assert_eq!(
            texts,
            vec![
                "BAB I PENDAHULUAN",
                "1.1 Latar Belakang",
                "uraian latar belakang",
                "BAB II TINJAUAN PUSTAKA",
                "2.1 Landasan Teori",
                "uraian teori",
                "BAB III METODE PENELITIAN",
                "3.1 Jenis Penelitian",
            ]
        );
        // Metadata follows the document.
        assert_eq!(restructured.metadata.title.as_deref(), Some("Proposal"));
        // Canonical headings are bold and centered.
        assert_eq!(restructured.paragraphs[0].alignment, Some(Alignment::Center));
        assert_eq!(restructured.paragraphs[0].runs[0].bold, Some(true));
        // Copied body runs keep their alignment.
        assert_eq!(restructured.paragraphs[2].alignment, Some(Alignment::Justify));
        // And their run formatting: the styled "uraian teori" run moved to
        // index 5 with family, size and italic intact.
        let styled = &restructured.paragraphs[5].runs[0];
        assert_eq!(styled.text, "uraian teori");
        assert_eq!(styled.font_name.as_deref(), Some("Courier New"));
        assert_eq!(styled.size_pt, Some(10.0));
        assert_eq!(styled.italic, Some(true));
        assert_eq!(styled.bold, None);
    }

    #[test]
    fn test_restructure_renumbers_mismatched_subsections() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = DocxDocument::new();
        // Chapter labeled III but containing subsections numbered for 1.
        doc.add_paragraph(chapter_paragraph("BAB III METODE PENELITIAN"));
        doc.add_paragraph(body_paragraph("1.1 Jenis Penelitian"));
        doc.add_paragraph(body_paragraph("1.2 Lokasi dan Waktu Penelitian"));
        doc.add_paragraph(chapter_paragraph("BAB I PENDAHULUAN"));
        doc.add_paragraph(body_paragraph("1.1 Latar Belakang"));
        let path = write_docx(&doc, dir.path(), "abc_proposal.docx");

        let config = RuleConfig::default();
        let restructurer = Restructurer::new(&config);
        let outcome = restructurer.restructure(&path, RestructureOptions::default());
        assert!(outcome.success, "{}", outcome.message);

        let restructured =
            shared_docx::load(outcome.restructured_path.as_ref().unwrap()).unwrap();
        let texts: Vec<String> = restructured.paragraphs.iter().map(|p| p.text()).collect();
        assert_eq!(
            texts,
            vec![
                "BAB I PENDAHULUAN",
                "1.1 Latar Belakang",
                "BAB III METODE PENELITIAN",
                "3.1 Jenis Penelitian",
                "3.2 Lokasi dan Waktu Penelitian",
            ]
        );
    }

    #[test]
    fn test_restructure_unreadable_source_fails_cleanly() {
        let config = RuleConfig::default();
        let restructurer = Restructurer::new(&config);
        let outcome = restructurer.restructure(
            Path::new("/nonexistent/abc_proposal.docx"),
            RestructureOptions::default(),
        );
        assert!(!outcome.success);
        assert!(outcome.restructured_path.is_none());
        assert!(outcome.message.contains("Restructuring failed"));
    }

    #[test]
    fn test_preview_reports_orders_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_docx(&scrambled_document(), dir.path(), "abc_proposal.docx");

        let config = RuleConfig::default();
        let restructurer = Restructurer::new(&config);
        let preview = restructurer.preview(&path);

        assert!(preview.preview_available);
        assert_eq!(preview.changes_needed, 3);
        assert_eq!(preview.current_order[0].roman, "II");
        assert_eq!(preview.corrected_order[0].roman, "I");
        assert_eq!(preview.corrected_order[0].title, "PENDAHULUAN");
        assert!(!dir.path().join("abc_restructured.docx").exists());
    }

    #[test]
    fn test_preview_unavailable_when_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = DocxDocument::new();
        doc.add_paragraph(chapter_paragraph("BAB I PENDAHULUAN"));
        let path = write_docx(&doc, dir.path(), "abc_proposal.docx");

        let config = RuleConfig::default();
        let restructurer = Restructurer::new(&config);
        let preview = restructurer.preview(&path);

        assert!(!preview.preview_available);
        assert_eq!(preview.message.as_deref(), Some("No restructuring needed"));
    }
}
