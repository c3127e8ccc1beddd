//! Owned in-memory representation of a word-processing document.

use serde::{Deserialize, Serialize};
use shared_types::DocumentInfo;

/// Twentieths of a point per centimeter, the OOXML page-margin unit.
pub const TWIPS_PER_CM: f64 = 567.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub text: String,
    pub font_name: Option<String>,
    pub size_pt: Option<f64>,
    pub bold: Option<bool>,
    pub italic: Option<bool>,
}

impl Run {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Option<Alignment>,
    pub line_spacing: Option<f64>,
}

impl Paragraph {
    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.text().trim().is_empty()
    }
}

/// Page margins in centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top_cm: f64,
    pub bottom_cm: f64,
    pub left_cm: f64,
    pub right_cm: f64,
}

impl Default for Margins {
    fn default() -> Self {
        // Word's default page setup: one inch on every side.
        Self {
            top_cm: 2.54,
            bottom_cm: 2.54,
            left_cm: 2.54,
            right_cm: 2.54,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub margins: Margins,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocMetadata {
    pub title: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocxDocument {
    pub metadata: DocMetadata,
    pub paragraphs: Vec<Paragraph>,
    pub sections: Vec<Section>,
    pub table_count: usize,
}

impl DocxDocument {
    /// Blank document with a single default section.
    pub fn new() -> Self {
        Self {
            sections: vec![Section::default()],
            ..Self::default()
        }
    }

    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.paragraphs.push(paragraph);
    }

    pub fn document_info(&self) -> DocumentInfo {
        let estimated_word_count = self
            .paragraphs
            .iter()
            .map(|p| p.text().split_whitespace().count())
            .sum();

        DocumentInfo {
            title: self
                .metadata
                .title
                .clone()
                .unwrap_or_else(|| "Untitled".to_string()),
            author: self
                .metadata
                .author
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
            paragraph_count: self.paragraphs.len(),
            table_count: self.table_count,
            estimated_word_count,
        }
    }
}
