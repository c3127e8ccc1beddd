//! Individual rule checks. Each check takes the loaded document and returns
//! its findings independently of the others; the validator concatenates
//! them in pipeline order.

pub mod headings;
pub mod order;
pub mod page_setup;
pub mod structure;
pub mod tables;
pub mod text_format;
pub mod typography;
