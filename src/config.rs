//! Application configuration.
//!
//! Configuration is loaded from a TOML file at:
//! 1. `$ATTACHVIEW_CONFIG` (environment variable)
//! 2. `~/.config/attachview/config.toml` (Linux/macOS)
//!    `%APPDATA%\attachview\config.toml` (Windows)
//! 3. Built-in defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::export::codec::DEFAULT_CHUNK_SIZE;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General behavior settings.
    pub general: GeneralConfig,
    /// Which parts of the viewer are shown or enabled.
    pub display: DisplayConfig,
    /// PDF zoom behavior.
    pub pdf: PdfConfig,
    /// Export defaults.
    pub export: ExportConfig,
    /// Static resources.
    pub resources: ResourcesConfig,
}

/// General behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Override cache directory for logs.
    pub cache_dir: Option<PathBuf>,
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub log_level: String,
}

/// Viewer options. Each one can be toggled independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Render the thumbnail strip.
    pub show_thumbnails: bool,
    /// Render per-slide caption text.
    pub show_captions: bool,
    /// Render the "i / n" overlay on slides.
    pub show_page_numbers: bool,
    /// Enable the delete command and its confirmation dialog.
    pub allow_delete: bool,
}

/// PDF zoom limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Zoom change per key press in the terminal viewer.
    pub zoom_step: f32,
    /// Lowest zoom factor, in `(0, 1]`.
    pub min_zoom: f32,
    /// Highest zoom factor, at least 1.0. Unbounded when unset.
    pub max_zoom: Option<f32>,
}

/// Export defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Decoded bytes per blob part.
    pub chunk_size: usize,
    /// Directory downloads are written to.
    pub output_dir: Option<PathBuf>,
}

/// Static resources.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// Image shown when an attachment cannot be rendered.
    pub placeholder_icon: Option<PathBuf>,
}

// ── Default implementations ─────────────────────────────────────

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_thumbnails: true,
            show_captions: true,
            show_page_numbers: true,
            allow_delete: true,
        }
    }
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            zoom_step: 0.25,
            min_zoom: 0.1,
            max_zoom: None,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            output_dir: None,
        }
    }
}

// ── Load / save ─────────────────────────────────────────────────

/// Load configuration, searching standard locations.
///
/// Returns the default configuration if no file is found or on parse error.
pub fn load_config() -> Config {
    if let Some(path) = config_file_path() {
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(contents) => match toml::from_str::<Config>(&contents) {
                    Ok(cfg) => {
                        tracing::info!(path = %path.display(), "Loaded config");
                        return cfg;
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %path.display(),
                            error = %e,
                            "Failed to parse config, using defaults"
                        );
                    }
                },
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to read config file, using defaults"
                    );
                }
            }
        }
    }
    Config::default()
}

/// Save configuration to the standard location.
pub fn save_config(config: &Config) -> anyhow::Result<()> {
    let path = config_file_path()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config file path"))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(&path, contents)?;
    tracing::info!(path = %path.display(), "Saved config");
    Ok(())
}

/// Determine the config file path (checking env var first, then standard dirs).
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(env_path) = std::env::var("ATTACHVIEW_CONFIG") {
        return Some(PathBuf::from(env_path));
    }
    dirs::config_dir().map(|d| d.join("attachview").join("config.toml"))
}

/// Return the cache directory for logs.
pub fn cache_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.general.cache_dir {
        return dir.clone();
    }
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("attachview")
}

/// Return the log file path.
pub fn log_file_path(config: &Config) -> PathBuf {
    cache_dir(config).join("attachview.log")
}

/// Directory exported attachments are written to.
///
/// Configured directory, then the user's Downloads folder, then home, then `.`.
pub fn download_dir(config: &Config) -> PathBuf {
    if let Some(ref dir) = config.export.output_dir {
        return dir.clone();
    }
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
