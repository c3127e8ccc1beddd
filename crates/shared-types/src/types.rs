use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How serious a detected deviation is for the compliance verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Suggestion,
}

/// Category of a detected deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MarginError,
    FontError,
    FontSizeError,
    LineSpacingError,
    StructureError,
    SubsectionMissing,
    MissingChapter,
    ChapterOrder,
    DocumentReordering,
    HeadingAlignment,
    HeadingBold,
    HeadingFormat,
    TableTitleCheck,
    NumberStartSentence,
    DecimalSeparator,
    SystemError,
}

/// One detected deviation from the configured formatting rules.
///
/// Produced in detection order; immutable once emitted. When
/// `auto_correctable` is set, `correction` carries an instruction the
/// corrector can execute without any further lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    pub kind: ViolationKind,
    pub severity: Severity,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub auto_correctable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<CorrectionRequest>,
}

impl Violation {
    /// A finding that cannot be fixed automatically.
    pub fn manual(
        kind: ViolationKind,
        severity: Severity,
        message: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            location: Some(location.into()),
            auto_correctable: false,
            correction: None,
        }
    }

    /// A finding paired with an executable correction.
    pub fn correctable(
        kind: ViolationKind,
        severity: Severity,
        message: impl Into<String>,
        location: impl Into<String>,
        correction: CorrectionRequest,
    ) -> Self {
        Self {
            kind,
            severity,
            message: message.into(),
            location: Some(location.into()),
            auto_correctable: true,
            correction: Some(correction),
        }
    }

    /// A contained failure of one validation phase, surfaced as a finding
    /// so the remaining phases still report.
    pub fn system_error(message: impl Into<String>) -> Self {
        Self {
            kind: ViolationKind::SystemError,
            severity: Severity::Error,
            message: message.into(),
            location: None,
            auto_correctable: false,
            correction: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginSide {
    Top,
    Bottom,
    Left,
    Right,
}

impl MarginSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            MarginSide::Top => "top",
            MarginSide::Bottom => "bottom",
            MarginSide::Left => "left",
            MarginSide::Right => "right",
        }
    }
}

/// Executable instruction resolving one auto-correctable violation.
///
/// This is the contract between detection and remediation; the wire shape
/// (tagged by `type`) is fixed for the HTTP boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CorrectionRequest {
    Margin {
        margin: MarginSide,
        value_cm: f64,
    },
    Font {
        font_name: String,
    },
    FontSize {
        size_pt: f64,
    },
    LineSpacing {
        spacing: f64,
    },
    HeadingAlignment {
        alignment: String,
    },
    DecimalSeparator {
        replace_dots_with_commas: bool,
    },
    DocumentRestructure {
        action: String,
        current_order: Vec<String>,
        correct_order: Vec<String>,
    },
}

impl CorrectionRequest {
    /// Grouping key used by the corrector; matches the serde tag.
    pub fn type_name(&self) -> &'static str {
        match self {
            CorrectionRequest::Margin { .. } => "margin",
            CorrectionRequest::Font { .. } => "font",
            CorrectionRequest::FontSize { .. } => "font_size",
            CorrectionRequest::LineSpacing { .. } => "line_spacing",
            CorrectionRequest::HeadingAlignment { .. } => "heading_alignment",
            CorrectionRequest::DecimalSeparator { .. } => "decimal_separator",
            CorrectionRequest::DocumentRestructure { .. } => "document_restructure",
        }
    }
}

/// A chapter heading found in the document, with its body position.
///
/// Invariant: `chapter_number` is the numeral value of `roman_numeral`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterInfo {
    pub paragraph_index: usize,
    pub roman_numeral: String,
    pub chapter_number: u32,
    pub title: String,
    pub full_text: String,
    pub subsections: Vec<SubsectionInfo>,
}

/// A numbered or lettered sub-heading inside a chapter span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubsectionInfo {
    pub paragraph_index: usize,
    pub number: String,
    pub title: String,
    pub full_text: String,
}

/// Result of one structural scan over a document. Computed fresh per call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructureAnalysis {
    /// Chapters in source order (pre-sort).
    pub chapters: Vec<ChapterInfo>,
    pub structure_issues: Vec<Violation>,
    pub reordering_needed: bool,
    pub missing_sections: Vec<Violation>,
    pub extra_sections: Vec<String>,
}

/// Violation tallies by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeveritySummary {
    pub error: usize,
    pub warning: usize,
    pub suggestion: usize,
}

impl SeveritySummary {
    pub fn total(&self) -> usize {
        self.error + self.warning + self.suggestion
    }
}

/// Basic document facts shown in reports and upload responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentInfo {
    pub title: String,
    pub author: String,
    pub paragraph_count: usize,
    pub table_count: usize,
    pub estimated_word_count: usize,
}

/// Upload-time bundle: validation outcome plus document facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingResult {
    pub document_info: DocumentInfo,
    pub violations: Vec<Violation>,
    pub severity_summary: SeveritySummary,
    pub auto_correctable: Vec<Violation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_path: Option<PathBuf>,
}

/// Best-effort correction outcome: whichever groups succeeded are in the
/// saved artifact, failures are reported alongside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectionOutcome {
    pub applied: Vec<String>,
    pub failed: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestructureOutcome {
    pub success: bool,
    pub message: String,
    pub changes_applied: Vec<String>,
    pub original_order: Vec<String>,
    pub corrected_order: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restructured_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChapterOrderEntry {
    pub roman: String,
    pub title: String,
    pub number: u32,
}

/// Read-only restructuring preview for confirmation flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestructurePreview {
    pub preview_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub current_order: Vec<ChapterOrderEntry>,
    pub corrected_order: Vec<ChapterOrderEntry>,
    pub changes_needed: usize,
    pub structure_issues: Vec<Violation>,
}
