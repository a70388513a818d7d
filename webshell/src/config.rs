//! Shell Configuration
//!
//! Loaded from shell.toml next to the executable. Every value has a default,
//! so a missing file or a missing section is fine.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up next to the executable
pub const CONFIG_FILE: &str = "shell.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Complete shell configuration from shell.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub window: WindowConfig,
    pub webview: WebViewConfig,
}

/// [window] section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub background_color: String,
    #[serde(alias = "icon_path")]
    pub icon: Option<String>,
}

/// [webview] section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WebViewConfig {
    /// Page to load, relative to the executable directory
    pub entry: String,
    /// Browser user data, relative to the executable directory
    pub data_dir: String,
    pub devtools: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "WebView on Rust".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
            background_color: "#ffffff".to_string(),
            icon: None,
        }
    }
}

impl Default for WebViewConfig {
    fn default() -> Self {
        Self {
            entry: "ui/index.html".to_string(),
            data_dir: "WebView2Data".to_string(),
            devtools: true,
        }
    }
}

impl ShellConfig {
    /// Load shell.toml from `dir` if it is there, defaults otherwise
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let toml_path = dir.join(CONFIG_FILE);
        if !toml_path.exists() {
            tracing::debug!(path = %toml_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_file(&toml_path)
    }

    /// Load a config file the user named. A directory means its shell.toml.
    /// The file has to exist.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let toml_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        let content = fs::read_to_string(&toml_path).map_err(|source| ConfigError::Read {
            path: toml_path.clone(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML content
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Parse background color from hex string to RGBA tuple
    pub fn background_rgba(&self) -> (u8, u8, u8, u8) {
        parse_hex_color(&self.window.background_color).unwrap_or((255, 255, 255, 255))
    }
}

/// Parse hex color string to RGBA
fn parse_hex_color(color: &str) -> Option<(u8, u8, u8, u8)> {
    let color = color.trim_start_matches('#');
    let channel = |i: usize| color.get(i..i + 2).and_then(|c| u8::from_str_radix(c, 16).ok());

    match color.len() {
        6 => Some((channel(0)?, channel(2)?, channel(4)?, 255)),
        8 => Some((channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
        _ => None,
    }
}
