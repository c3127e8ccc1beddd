//! Structural analysis, chapter reordering and correction engine.
//!
//! The structural "parser" is a small fixed grammar of regex patterns over
//! paragraph text (see [`patterns`]); everything else is built on top of the
//! analysis it produces. Components here are leaves: the validator in
//! `format-engine` depends on them, never the reverse.

pub mod analyzer;
pub mod corrector;
pub mod patterns;
pub mod restructurer;
pub mod roman;

pub use analyzer::StructureAnalyzer;
pub use corrector::Corrector;
pub use restructurer::{RestructureOptions, Restructurer};
