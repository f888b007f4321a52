//! Application configuration management

use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::document::TemplateSeed;

/// Environment variable overriding the document storage directory
pub const DATA_DIR_ENV: &str = "TRABALHOS_DATA_DIR";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Storage settings
    pub storage: StorageConfig,
    /// Print/export settings
    pub export: ExportConfig,
    /// Editor settings
    pub editor: EditorConfig,
    /// Seed content for new documents
    pub template: TemplateSeed,
}

/// Where the document record lives
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory; defaults to the platform data dir
    pub data_dir: Option<PathBuf>,
}

/// Print/export settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Page margin in millimetres
    pub margin_mm: u32,
    /// Image shown at the top of the paper
    pub logo_path: Option<PathBuf>,
    /// Directory for generated print files; defaults to the platform cache dir
    pub output_dir: Option<PathBuf>,
}

/// Editor-specific settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font size in pixels
    pub font_size: f32,
    /// Show the live preview next to the form
    pub show_preview: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            margin_mm: 16,
            logo_path: None,
            output_dir: None,
        }
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            font_size: 14.0,
            show_preview: true,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "trabalhos", "Trabalhos")
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Result<Self> {
        let path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(Self::load_from(&path)?.with_env_overrides())
    }

    /// Apply environment variable overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_data_dir_override(std::env::var(DATA_DIR_ENV).ok())
    }

    fn with_data_dir_override(mut self, dir: Option<String>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.is_empty()) {
            self.storage.data_dir = Some(PathBuf::from(dir));
        }
        self
    }

    /// Load configuration from a specific file, defaults if it is missing
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;

        tracing::info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Directory holding the persisted document
    pub fn data_dir(&self) -> PathBuf {
        self.storage.data_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.data_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Directory for generated print documents
    pub fn output_dir(&self) -> PathBuf {
        self.export.output_dir.clone().unwrap_or_else(|| {
            project_dirs()
                .map(|dirs| dirs.cache_dir().join("print"))
                .unwrap_or_else(|| std::env::temp_dir().join("trabalhos-print"))
        })
    }
}
