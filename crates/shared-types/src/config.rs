//! Declarative formatting rule set.
//!
//! Loaded once (typically from YAML), then passed by reference into every
//! component. Nothing mutates it after construction.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::MarginSide;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    #[serde(default)]
    pub page_setup: PageSetup,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default)]
    pub document_types: DocumentTypes,
    #[serde(default)]
    pub university: University,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageSetup {
    #[serde(default)]
    pub margins: MarginRules,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginRules {
    pub top: String,
    pub bottom: String,
    pub left: String,
    pub right: String,
}

impl Default for MarginRules {
    fn default() -> Self {
        Self {
            top: "4cm".to_string(),
            bottom: "3cm".to_string(),
            left: "4cm".to_string(),
            right: "3cm".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Typography {
    #[serde(default)]
    pub body_font: BodyFont,
    #[serde(default)]
    pub line_spacing: LineSpacingRules,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            body_font: BodyFont::default(),
            line_spacing: LineSpacingRules::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyFont {
    pub family: String,
    /// Point size with unit suffix, e.g. "12pt".
    pub size: String,
}

impl Default for BodyFont {
    fn default() -> Self {
        Self {
            family: "Times New Roman".to_string(),
            size: "12pt".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSpacingRules {
    pub body_text: f64,
}

impl Default for LineSpacingRules {
    fn default() -> Self {
        Self { body_text: 2.0 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentTypes {
    #[serde(default)]
    pub proposal: ProposalRules,
}

impl Default for DocumentTypes {
    fn default() -> Self {
        Self {
            proposal: ProposalRules::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProposalRules {
    /// Canonical chapter headings, in required order.
    pub required_sections: Vec<String>,
    /// Required subsection titles per chapter title.
    pub subsections: BTreeMap<String, Vec<String>>,
}

impl Default for ProposalRules {
    fn default() -> Self {
        let mut subsections = BTreeMap::new();
        subsections.insert(
            "PENDAHULUAN".to_string(),
            vec![
                "Latar Belakang".to_string(),
                "Rumusan Masalah".to_string(),
                "Tujuan Penelitian".to_string(),
                "Manfaat Penelitian".to_string(),
            ],
        );
        subsections.insert(
            "TINJAUAN PUSTAKA".to_string(),
            vec!["Landasan Teori".to_string(), "Kerangka Pikir".to_string()],
        );
        subsections.insert(
            "METODE PENELITIAN".to_string(),
            vec![
                "Jenis Penelitian".to_string(),
                "Lokasi dan Waktu Penelitian".to_string(),
                "Teknik Pengumpulan Data".to_string(),
            ],
        );

        Self {
            required_sections: vec![
                "BAB I PENDAHULUAN".to_string(),
                "BAB II TINJAUAN PUSTAKA".to_string(),
                "BAB III METODE PENELITIAN".to_string(),
            ],
            subsections,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct University {
    pub name: String,
    pub abbreviation: String,
    pub guidelines: String,
}

impl Default for University {
    fn default() -> Self {
        Self {
            name: "Universitas Muhammadiyah Makassar".to_string(),
            abbreviation: "UNISMUH".to_string(),
            guidelines: "Pedoman Penulisan Tesis Program Pascasarjana UNISMUH Makassar"
                .to_string(),
        }
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            page_setup: PageSetup::default(),
            typography: Typography::default(),
            document_types: DocumentTypes::default(),
            university: University::default(),
        }
    }
}

impl RuleConfig {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading rule config {}", path.as_ref().display()))?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("parsing rule config YAML")
    }

    /// Configured margin for one side, in centimeters.
    pub fn margin_cm(&self, side: MarginSide) -> f64 {
        let raw = match side {
            MarginSide::Top => &self.page_setup.margins.top,
            MarginSide::Bottom => &self.page_setup.margins.bottom,
            MarginSide::Left => &self.page_setup.margins.left,
            MarginSide::Right => &self.page_setup.margins.right,
        };
        parse_unit(raw, "cm")
    }

    /// Configured body font size in points.
    pub fn body_font_size_pt(&self) -> f64 {
        parse_unit(&self.typography.body_font.size, "pt")
    }

    pub fn body_font_family(&self) -> &str {
        &self.typography.body_font.family
    }

    pub fn body_line_spacing(&self) -> f64 {
        self.typography.line_spacing.body_text
    }
}

fn parse_unit(raw: &str, suffix: &str) -> f64 {
    raw.trim()
        .trim_end_matches(suffix)
        .trim()
        .parse()
        .unwrap_or(0.0)
}
