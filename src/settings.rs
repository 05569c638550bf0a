use crate::dashboard::config::GridConfig;
use crate::dashboard::persist::STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Settings {
    /// When enabled the application initialises the logger at debug level.
    #[serde(default)]
    pub debug_logging: bool,
    /// Write log output to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<String>,
    /// Folder holding the storage slots. Defaults to the folder of the
    /// settings file.
    #[serde(default)]
    pub storage_dir: Option<String>,
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Row height of the grid in pixels.
    #[serde(default = "default_row_height")]
    pub row_height: u32,
    /// Gap between grid cells in pixels.
    #[serde(default = "default_gap")]
    pub gap: u32,
    /// Pointer travel in pixels before a press turns into a drag.
    #[serde(default = "default_drag_activation_distance")]
    pub drag_activation_distance: f32,
}

fn default_storage_key() -> String {
    STORAGE_KEY.to_string()
}

fn default_row_height() -> u32 {
    GridConfig::default().row_height
}

fn default_gap() -> u32 {
    GridConfig::default().gap
}

fn default_drag_activation_distance() -> f32 {
    8.0
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug_logging: false,
            log_file: None,
            storage_dir: None,
            storage_key: default_storage_key(),
            row_height: default_row_height(),
            gap: default_gap(),
            drag_activation_distance: default_drag_activation_distance(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn grid(&self) -> GridConfig {
        let row_height = if self.row_height == 0 {
            tracing::warn!("row_height of 0 is invalid; using default");
            default_row_height()
        } else {
            self.row_height
        };
        GridConfig {
            row_height,
            gap: self.gap,
            ..GridConfig::default()
        }
    }

    /// Folder for file storage, relative paths resolved against the folder
    /// containing `settings_path`.
    pub fn storage_path(&self, settings_path: &Path) -> PathBuf {
        let base = settings_path.parent().unwrap_or_else(|| Path::new("."));
        match &self.storage_dir {
            Some(dir) if Path::new(dir).is_absolute() => PathBuf::from(dir),
            Some(dir) => base.join(dir),
            None => base.to_path_buf(),
        }
    }

    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.as_ref().map(PathBuf::from)
    }

    pub fn drag_activation_distance(&self) -> f32 {
        if self.drag_activation_distance.is_finite() && self.drag_activation_distance >= 0.0 {
            self.drag_activation_distance
        } else {
            tracing::warn!(
                "drag_activation_distance {} is invalid; using default",
                self.drag_activation_distance
            );
            default_drag_activation_distance()
        }
    }
}
