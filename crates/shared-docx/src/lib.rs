//! Word document model and minimal OOXML codec.
//!
//! Exposes the subset of a `.docx` package the formatting engine needs:
//! paragraphs with run-level formatting, section page margins, table count
//! and core title/author metadata. Reading and writing go through a small
//! zip + quick-xml codec rather than a full WordprocessingML implementation;
//! unsupported markup is dropped on write, so a load/save cycle is not a
//! byte-for-byte round trip of arbitrary documents.

pub mod error;
pub mod model;
pub mod read;
pub mod storage;
pub mod write;

pub use error::DocxError;
pub use model::{Alignment, DocMetadata, DocxDocument, Margins, Paragraph, Run, Section};
pub use read::load;
pub use write::save;
