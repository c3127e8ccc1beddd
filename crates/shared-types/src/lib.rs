pub mod config;
pub mod types;

pub use config::RuleConfig;
pub use types::{
    ChapterInfo, ChapterOrderEntry, CorrectionOutcome, CorrectionRequest, DocumentInfo,
    MarginSide, ProcessingResult, RestructureOutcome, RestructurePreview, Severity,
    SeveritySummary, StructureAnalysis, SubsectionInfo, Violation, ViolationKind,
};
