//! Best-effort application of executable correction requests.

use std::collections::HashMap;
use std::path::Path;

use shared_docx::{storage, Alignment, DocxDocument, Run};
use shared_types::{CorrectionOutcome, CorrectionRequest, MarginSide, RuleConfig};

use crate::patterns;
use crate::restructurer::{RestructureOptions, Restructurer};

/// Group application order. Restructuring runs first so every later group
/// operates on the reordered document instead of being thrown away by it.
const GROUP_ORDER: [&str; 7] = [
    "document_restructure",
    "margin",
    "font",
    "font_size",
    "line_spacing",
    "heading_alignment",
    "decimal_separator",
];

/// Applies correction requests grouped by type, isolating failures so one
/// broken group never blocks the rest. The corrected artifact always
/// reflects exactly the groups reported as applied.
pub struct Corrector<'a> {
    config: &'a RuleConfig,
    restructurer: Restructurer<'a>,
}

impl<'a> Corrector<'a> {
    pub fn new(config: &'a RuleConfig) -> Self {
        Self {
            config,
            restructurer: Restructurer::new(config),
        }
    }

    pub fn apply(&self, path: &Path, requests: &[CorrectionRequest]) -> CorrectionOutcome {
        let mut outcome = CorrectionOutcome {
            applied: Vec::new(),
            failed: Vec::new(),
            corrected_path: None,
        };

        let mut doc = match shared_docx::load(path) {
            Ok(doc) => doc,
            Err(e) => {
                outcome.failed.push(format!("Loading document failed: {e}"));
                return outcome;
            }
        };

        let mut groups: HashMap<&'static str, Vec<&CorrectionRequest>> = HashMap::new();
        for request in requests {
            groups.entry(request.type_name()).or_default().push(request);
        }

        for group_name in GROUP_ORDER {
            let Some(group) = groups.get(group_name) else {
                continue;
            };
            match group_name {
                "document_restructure" => self.apply_restructure(path, &mut doc, &mut outcome),
                "margin" => apply_margins(&mut doc, group, &mut outcome),
                "font" => self.apply_font(&mut doc, group, &mut outcome),
                "font_size" => self.apply_font_size(&mut doc, group, &mut outcome),
                "line_spacing" => self.apply_line_spacing(&mut doc, group, &mut outcome),
                "heading_alignment" => apply_heading_alignment(&mut doc, &mut outcome),
                "decimal_separator" => apply_decimal_separators(&mut doc, &mut outcome),
                _ => unreachable!("group order only names known types"),
            }
        }

        let corrected_path = storage::derived_path(path, "corrected");
        match shared_docx::save(&doc, &corrected_path) {
            Ok(()) => {
                tracing::info!(
                    path = %corrected_path.display(),
                    applied = outcome.applied.len(),
                    failed = outcome.failed.len(),
                    "corrections saved"
                );
                outcome.corrected_path = Some(corrected_path);
            }
            Err(e) => {
                outcome
                    .failed
                    .push(format!("Saving corrected document failed: {e}"));
            }
        }
        outcome
    }

    /// Run the restructurer against the original file and, when it produced
    /// an artifact, swap the working document for the reordered one so the
    /// remaining groups apply on top of it.
    fn apply_restructure(
        &self,
        path: &Path,
        doc: &mut DocxDocument,
        outcome: &mut CorrectionOutcome,
    ) {
        let result = self
            .restructurer
            .restructure(path, RestructureOptions::default());
        if !result.success {
            outcome.failed.push(result.message);
            return;
        }

        if let Some(restructured_path) = &result.restructured_path {
            match shared_docx::load(restructured_path) {
                Ok(reordered) => *doc = reordered,
                Err(e) => {
                    outcome
                        .failed
                        .push(format!("Reloading restructured document failed: {e}"));
                    return;
                }
            }
        }
        outcome.applied.push(result.message);
    }

    fn apply_font(
        &self,
        doc: &mut DocxDocument,
        group: &[&CorrectionRequest],
        outcome: &mut CorrectionOutcome,
    ) {
        let font_name = group
            .iter()
            .find_map(|r| match r {
                CorrectionRequest::Font { font_name } => Some(font_name.clone()),
                _ => None,
            })
            .unwrap_or_else(|| self.config.body_font_family().to_string());

        for paragraph in &mut doc.paragraphs {
            for run in &mut paragraph.runs {
                run.font_name = Some(font_name.clone());
            }
        }
        outcome
            .applied
            .push(format!("Set font to {font_name} for all text"));
    }

    fn apply_font_size(
        &self,
        doc: &mut DocxDocument,
        group: &[&CorrectionRequest],
        outcome: &mut CorrectionOutcome,
    ) {
        let size_pt = group
            .iter()
            .find_map(|r| match r {
                CorrectionRequest::FontSize { size_pt } => Some(*size_pt),
                _ => None,
            })
            .unwrap_or_else(|| self.config.body_font_size_pt());

        for paragraph in &mut doc.paragraphs {
            for run in &mut paragraph.runs {
                run.size_pt = Some(size_pt);
            }
        }
        outcome
            .applied
            .push(format!("Set font size to {size_pt}pt for all text"));
    }

    fn apply_line_spacing(
        &self,
        doc: &mut DocxDocument,
        group: &[&CorrectionRequest],
        outcome: &mut CorrectionOutcome,
    ) {
        let spacing = group
            .iter()
            .find_map(|r| match r {
                CorrectionRequest::LineSpacing { spacing } => Some(*spacing),
                _ => None,
            })
            .unwrap_or_else(|| self.config.body_line_spacing());

        // Unlike fonts this is not a blanket pass: only non-empty
        // paragraphs with an explicit, differing spacing are touched.
        let mut count = 0;
        for paragraph in &mut doc.paragraphs {
            if paragraph.is_empty() {
                continue;
            }
            if let Some(current) = paragraph.line_spacing {
                if (current - spacing).abs() > 0.1 {
                    paragraph.line_spacing = Some(spacing);
                    count += 1;
                }
            }
        }
        outcome
            .applied
            .push(format!("Set line spacing to {spacing} for {count} paragraphs"));
    }
}

fn apply_margins(
    doc: &mut DocxDocument,
    group: &[&CorrectionRequest],
    outcome: &mut CorrectionOutcome,
) {
    for request in group {
        let CorrectionRequest::Margin { margin, value_cm } = request else {
            continue;
        };
        for section in &mut doc.sections {
            match margin {
                MarginSide::Top => section.margins.top_cm = *value_cm,
                MarginSide::Bottom => section.margins.bottom_cm = *value_cm,
                MarginSide::Left => section.margins.left_cm = *value_cm,
                MarginSide::Right => section.margins.right_cm = *value_cm,
            }
        }
        outcome.applied.push(format!(
            "Set {} margin to {value_cm}cm",
            margin.as_str()
        ));
    }
}

/// Center every chapter heading and make all of its runs bold. The two
/// heading defects share one correction group.
fn apply_heading_alignment(doc: &mut DocxDocument, outcome: &mut CorrectionOutcome) {
    let mut count = 0;
    for paragraph in &mut doc.paragraphs {
        let text = paragraph.text().trim().to_uppercase();
        if !patterns::CHAPTER_PREFIX.is_match(&text) {
            continue;
        }
        paragraph.alignment = Some(Alignment::Center);
        for run in &mut paragraph.runs {
            run.bold = Some(true);
        }
        count += 1;
    }
    outcome
        .applied
        .push(format!("Centered and bolded {count} chapter headings"));
}

/// Replace dot decimal separators paragraph by paragraph. A rewritten
/// paragraph collapses to a single run; untouched paragraphs keep their
/// run structure.
fn apply_decimal_separators(doc: &mut DocxDocument, outcome: &mut CorrectionOutcome) {
    let mut count = 0;
    for paragraph in &mut doc.paragraphs {
        let text = paragraph.text();
        let fixed = patterns::fix_decimal_separators(&text);
        if fixed == text {
            continue;
        }
        paragraph.runs = vec![Run::text(fixed)];
        count += 1;
    }
    outcome
        .applied
        .push(format!("Replaced decimal separators in {count} paragraphs"));
}
