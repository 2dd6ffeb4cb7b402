// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[collage]` - Last used layout, aspect ratio, frame width and spacing
//! - `[export]` - Output format and JPEG quality
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI argument
//! 3. `ICED_COLLAGE_CONFIG_DIR` environment variable
//! 4. Platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use iced_collage::config;
//!
//! let (mut config, _warning) = config::load();
//! config.export.quality = Some(75);
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::collage::{
    AspectRatio, CollageLayout, ExportQuality, FrameSpec, FrameWidth, SpacingSpec,
};
use crate::error::{Error, Result};
use crate::media::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Collage settings restored on the next launch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollageConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<CollageLayout>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,

    /// Output width in pixels.
    #[serde(default = "default_frame_width", skip_serializing_if = "Option::is_none")]
    pub frame_width: Option<f32>,

    /// Gap between cells in pixels.
    #[serde(default = "default_gap", skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,

    /// Margin around the grid in pixels.
    #[serde(default = "default_margin", skip_serializing_if = "Option::is_none")]
    pub margin: Option<f32>,
}

impl Default for CollageConfig {
    fn default() -> Self {
        Self {
            layout: Some(CollageLayout::default()),
            aspect_ratio: Some(AspectRatio::default()),
            frame_width: default_frame_width(),
            gap: default_gap(),
            margin: default_margin(),
        }
    }
}

impl CollageConfig {
    /// Resolved layout.
    #[must_use]
    pub fn layout(&self) -> CollageLayout {
        self.layout.unwrap_or_default()
    }

    /// Resolved aspect ratio.
    #[must_use]
    pub fn aspect_ratio(&self) -> AspectRatio {
        self.aspect_ratio.unwrap_or_default()
    }

    /// Frame built from the stored width and aspect ratio, with out-of-range
    /// widths clamped.
    #[must_use]
    pub fn frame(&self) -> FrameSpec {
        let width = self
            .frame_width
            .map(FrameWidth::new)
            .unwrap_or_default()
            .value();
        FrameSpec::new(width, self.aspect_ratio().value()).unwrap_or_default()
    }

    /// Spacing built from the stored gap and margin, clamped to the slider ranges.
    #[must_use]
    pub fn spacing(&self) -> SpacingSpec {
        let gap = self.gap.unwrap_or(DEFAULT_GAP);
        let margin = self.margin.unwrap_or(DEFAULT_MARGIN);
        SpacingSpec::new(
            clamp_or(gap, MIN_GAP, MAX_GAP, DEFAULT_GAP),
            clamp_or(margin, MIN_MARGIN, MAX_MARGIN, DEFAULT_MARGIN),
        )
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ExportFormat>,

    /// JPEG quality (10 to 100).
    #[serde(default = "default_quality", skip_serializing_if = "Option::is_none")]
    pub quality: Option<u8>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: Some(ExportFormat::default()),
            quality: default_quality(),
        }
    }
}

impl ExportConfig {
    #[must_use]
    pub fn format(&self) -> ExportFormat {
        self.format.unwrap_or_default()
    }

    #[must_use]
    pub fn quality(&self) -> ExportQuality {
        self.quality.map(ExportQuality::new).unwrap_or_default()
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub collage: CollageConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_frame_width() -> Option<f32> {
    Some(DEFAULT_FRAME_WIDTH)
}

fn default_gap() -> Option<f32> {
    Some(DEFAULT_GAP)
}

fn default_margin() -> Option<f32> {
    Some(DEFAULT_MARGIN)
}

fn default_quality() -> Option<u8> {
    Some(DEFAULT_EXPORT_QUALITY)
}

fn clamp_or(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with the i18n key of a warning to display.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "falling back to default config");
                    return (Config::default(), Some("config-load-error".to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    tracing::debug!(path = %path.display(), "config saved");
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
            },
            collage: CollageConfig {
                layout: Some(CollageLayout::custom(4, 5)),
                aspect_ratio: Some(AspectRatio::Widescreen),
                frame_width: Some(1080.0),
                gap: Some(0.0),
                margin: Some(25.0),
            },
            export: ExportConfig {
                format: Some(ExportFormat::Png),
                quality: Some(70),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        let result = load_from_path(&config_path);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn load_with_override_reports_warning_for_broken_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[collage\nlayout=").expect("write");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_silent() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[general]\nlanguage = \"fr\"\n").expect("parse");
        assert_eq!(config.collage, CollageConfig::default());
        assert_eq!(config.export, ExportConfig::default());
    }

    #[test]
    fn layout_and_aspect_use_readable_names() {
        let config: Config = toml::from_str(
            "[collage]\nlayout = \"3x4\"\naspect_ratio = \"16:9\"\n",
        )
        .expect("parse");
        assert_eq!(config.collage.layout(), CollageLayout::ThreeByFour);
        assert_eq!(config.collage.aspect_ratio(), AspectRatio::Widescreen);
    }

    #[test]
    fn out_of_range_values_are_clamped_on_use() {
        let collage = CollageConfig {
            frame_width: Some(99_999.0),
            gap: Some(-4.0),
            margin: Some(f32::NAN),
            ..CollageConfig::default()
        };
        assert_eq!(collage.frame().width(), MAX_FRAME_WIDTH);
        assert_eq!(collage.spacing().gap(), MIN_GAP);
        assert_eq!(collage.spacing().margin(), DEFAULT_MARGIN);

        let export = ExportConfig {
            quality: Some(1),
            ..ExportConfig::default()
        };
        assert_eq!(export.quality().value(), MIN_EXPORT_QUALITY);
    }
}
