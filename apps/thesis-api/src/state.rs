//! Application state for the Thesis Format API

use anyhow::{Context, Result};
use shared_types::RuleConfig;
use std::path::PathBuf;

pub struct AppState {
    pub config: RuleConfig,
    pub storage_dir: PathBuf,
}

impl AppState {
    pub fn new() -> Result<Self> {
        // Rule file from env or built-in defaults
        let config = match std::env::var("RULES_FILE") {
            Ok(path) => RuleConfig::from_yaml_file(&path)
                .with_context(|| format!("loading rule config {path}"))?,
            Err(_) => RuleConfig::default(),
        };

        let storage_dir = std::env::var("STORAGE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("temp"));
        std::fs::create_dir_all(&storage_dir)
            .with_context(|| format!("creating storage dir {}", storage_dir.display()))?;

        tracing::info!(storage_dir = %storage_dir.display(), "storage ready");
        Ok(Self {
            config,
            storage_dir,
        })
    }
}
