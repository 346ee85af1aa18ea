//! Host settings for the amefuri terminal rain.
//!
//! Settings live in `config.toml` under the platform config directory.
//! A missing file yields the defaults; every field is optional.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use color_eyre::eyre::{Result, WrapErr};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Name of the settings file inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Settings of the terminal host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Time between frames of the host loop.
    pub frame_interval_ms: u64,
    /// Pixels per terminal cell, horizontally.
    pub cell_width: f32,
    /// Pixels per terminal cell, vertically.
    pub cell_height: f32,
    /// Visibility requested right after the initial load.
    pub start_visible: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            frame_interval_ms: 16,
            cell_width: 8.0,
            cell_height: 16.0,
            start_visible: true,
        }
    }
}

impl Config {
    /// Parse settings from TOML text and normalize them.
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).wrap_err("invalid settings")?;
        Ok(config.normalized())
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&text).wrap_err_with(|| format!("failed to parse {}", path.display()))
    }

    /// Load settings from the platform config directory.
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Frame interval as a [`Duration`].
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Clamp the interval to at least 1 ms and replace non-positive cell
    /// sizes with the defaults.
    fn normalized(mut self) -> Self {
        let defaults = Self::default();
        self.frame_interval_ms = self.frame_interval_ms.max(1);
        if self.cell_width.is_nan() || self.cell_width <= 0.0 {
            self.cell_width = defaults.cell_width;
        }
        if self.cell_height.is_nan() || self.cell_height <= 0.0 {
            self.cell_height = defaults.cell_height;
        }
        self
    }
}

/// Project directories of the application.
pub fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "amefuri", "amefuri")
}

/// Full path of the settings file, if a home directory is known.
pub fn config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}
