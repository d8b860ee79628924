//! Application configuration for kwgroup.
//!
//! User config lives at `~/.kwgroup/kwgroup.toml`.
//! CLI flags override config file values, which override defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{KwgroupError, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "kwgroup.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".kwgroup";

// ---------------------------------------------------------------------------
// Config structs (matching kwgroup.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Global defaults.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Grouping thresholds.
    #[serde(default)]
    pub grouping: GroupingConfig,

    /// Ahrefs URL settings.
    #[serde(default)]
    pub ahrefs: AhrefsConfig,
}

/// Output format for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// `[defaults]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Ahrefs position filter, e.g. `1-50`. Empty disables the filter.
    #[serde(default = "default_position_range")]
    pub position_range: String,

    /// Output format for `group` and `themes`.
    #[serde(default)]
    pub output_format: OutputFormat,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            position_range: default_position_range(),
            output_format: OutputFormat::default(),
        }
    }
}

fn default_position_range() -> String {
    "1-50".into()
}

/// `[grouping]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Hard cap on keywords per group.
    #[serde(default = "default_max_group_size")]
    pub max_group_size: usize,

    /// Minimum size for a theme to stand alone as its own group.
    #[serde(default = "default_standalone_min")]
    pub standalone_min: usize,

    /// Target chunk size when splitting oversized groups.
    #[serde(default = "default_ideal_chunk_size")]
    pub ideal_chunk_size: usize,

    /// Fraction of keywords a term must appear in to be a core theme.
    #[serde(default = "default_core_ratio")]
    pub core_ratio: f64,

    /// Absolute floor for the core threshold.
    #[serde(default = "default_core_min")]
    pub core_min: usize,

    /// Fraction of keywords a term must appear in to be a related theme.
    #[serde(default = "default_related_ratio")]
    pub related_ratio: f64,

    /// Absolute floor for the related threshold.
    #[serde(default = "default_related_min")]
    pub related_min: usize,

    /// Keywords a theme must claim to form a group at all.
    #[serde(default = "default_min_theme_keywords")]
    pub min_theme_keywords: usize,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            max_group_size: default_max_group_size(),
            standalone_min: default_standalone_min(),
            ideal_chunk_size: default_ideal_chunk_size(),
            core_ratio: default_core_ratio(),
            core_min: default_core_min(),
            related_ratio: default_related_ratio(),
            related_min: default_related_min(),
            min_theme_keywords: default_min_theme_keywords(),
        }
    }
}

fn default_max_group_size() -> usize {
    50
}
fn default_standalone_min() -> usize {
    15
}
fn default_ideal_chunk_size() -> usize {
    40
}
fn default_core_ratio() -> f64 {
    0.15
}
fn default_core_min() -> usize {
    5
}
fn default_related_ratio() -> f64 {
    0.05
}
fn default_related_min() -> usize {
    3
}
fn default_min_theme_keywords() -> usize {
    3
}

/// `[ahrefs]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AhrefsConfig {
    /// Country database to query.
    #[serde(default = "default_country")]
    pub country: String,

    /// Target mode: `subdomains`, `domain`, `prefix`, or `exact`.
    #[serde(default = "default_mode")]
    pub mode: String,
}

impl Default for AhrefsConfig {
    fn default() -> Self {
        Self {
            country: default_country(),
            mode: default_mode(),
        }
    }
}

fn default_country() -> String {
    "us".into()
}
fn default_mode() -> String {
    "subdomains".into()
}

// ---------------------------------------------------------------------------
// Runtime options (merged from config + CLI flags)
// ---------------------------------------------------------------------------

/// Thresholds used by the keyword grouper.
///
/// `Default` yields the fixed production constants: groups of at most 50,
/// standalone themes from 15 keywords, chunks of about 40, core themes in
/// max(5, 15%) of keywords and related themes in max(3, 5%).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupingOptions {
    pub max_group_size: usize,
    pub standalone_min: usize,
    pub ideal_chunk_size: usize,
    pub core_ratio: f64,
    pub core_min: usize,
    pub related_ratio: f64,
    pub related_min: usize,
    pub min_theme_keywords: usize,
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self::from(&GroupingConfig::default())
    }
}

impl From<&GroupingConfig> for GroupingOptions {
    fn from(config: &GroupingConfig) -> Self {
        Self {
            max_group_size: config.max_group_size,
            standalone_min: config.standalone_min,
            ideal_chunk_size: config.ideal_chunk_size,
            core_ratio: config.core_ratio,
            core_min: config.core_min,
            related_ratio: config.related_ratio,
            related_min: config.related_min,
            min_theme_keywords: config.min_theme_keywords,
        }
    }
}

impl From<&AppConfig> for GroupingOptions {
    fn from(config: &AppConfig) -> Self {
        Self::from(&config.grouping)
    }
}

impl GroupingOptions {
    /// Occurrences needed for a core theme in a list of `total` keywords.
    pub fn core_threshold(&self, total: usize) -> f64 {
        (self.core_min as f64).max(total as f64 * self.core_ratio)
    }

    /// Occurrences needed for a related theme in a list of `total` keywords.
    pub fn related_threshold(&self, total: usize) -> f64 {
        (self.related_min as f64).max(total as f64 * self.related_ratio)
    }

    /// Reject option sets that would break the group size bound.
    pub fn validate(&self) -> Result<()> {
        if self.max_group_size == 0 {
            return Err(KwgroupError::validation("max_group_size must be greater than 0"));
        }
        if self.ideal_chunk_size == 0 {
            return Err(KwgroupError::validation(
                "ideal_chunk_size must be greater than 0",
            ));
        }
        if self.min_theme_keywords == 0 {
            return Err(KwgroupError::validation(
                "min_theme_keywords must be greater than 0",
            ));
        }
        if self.ideal_chunk_size > self.max_group_size {
            return Err(KwgroupError::validation(format!(
                "ideal_chunk_size {} exceeds max_group_size {}",
                self.ideal_chunk_size, self.max_group_size
            )));
        }
        if self.standalone_min > self.max_group_size {
            return Err(KwgroupError::validation(format!(
                "standalone_min {} exceeds max_group_size {}",
                self.standalone_min, self.max_group_size
            )));
        }
        for (name, ratio) in [
            ("core_ratio", self.core_ratio),
            ("related_ratio", self.related_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(KwgroupError::validation(format!(
                    "{name} must be between 0 and 1, got {ratio}"
                )));
            }
        }
        Ok(())
    }
}

/// Settings for generated Ahrefs URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlOptions {
    pub country: String,
    pub mode: String,
    /// Position filter; empty disables it.
    pub position_range: String,
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for UrlOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            country: config.ahrefs.country.clone(),
            mode: config.ahrefs.mode.clone(),
            position_range: config.defaults.position_range.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.kwgroup/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| KwgroupError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.kwgroup/kwgroup.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| KwgroupError::io(path, e))?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| {
        KwgroupError::config(format!("failed to parse {}: {e}", path.display()))
    })?;
    tracing::debug!(?path, "loaded config file");

    Ok(config)
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| KwgroupError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| KwgroupError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| KwgroupError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_serializes() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("position_range"));
        assert!(toml_str.contains("max_group_size"));
        assert!(toml_str.contains("subdomains"));
    }

    #[test]
    fn config_roundtrip() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize");
        let parsed: AppConfig = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.grouping.max_group_size, 50);
        assert_eq!(parsed.defaults.output_format, OutputFormat::Text);
        assert_eq!(parsed.ahrefs.country, "us");
    }

    #[test]
    fn partial_config_fills_defaults() {
        let toml_str = r#"
[defaults]
output_format = "json"

[grouping]
standalone_min = 10
"#;
        let config: AppConfig = toml::from_str(toml_str).expect("parse");
        assert_eq!(config.defaults.output_format, OutputFormat::Json);
        assert_eq!(config.defaults.position_range, "1-50");
        assert_eq!(config.grouping.standalone_min, 10);
        assert_eq!(config.grouping.ideal_chunk_size, 40);
    }

    #[test]
    fn grouping_options_default_matches_constants() {
        let opts = GroupingOptions::default();
        assert_eq!(opts.max_group_size, 50);
        assert_eq!(opts.standalone_min, 15);
        assert_eq!(opts.ideal_chunk_size, 40);
        assert_eq!(opts.min_theme_keywords, 3);
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn thresholds_use_floor_for_small_lists() {
        let opts = GroupingOptions::default();
        assert_eq!(opts.core_threshold(6), 5.0);
        assert_eq!(opts.related_threshold(6), 3.0);
        assert!((opts.core_threshold(200) - 30.0).abs() < 1e-9);
        assert!((opts.related_threshold(200) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_chunk_above_cap() {
        let opts = GroupingOptions {
            ideal_chunk_size: 60,
            ..GroupingOptions::default()
        };
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("ideal_chunk_size 60"));
    }

    #[test]
    fn validate_rejects_bad_ratio() {
        let opts = GroupingOptions {
            related_ratio: 1.5,
            ..GroupingOptions::default()
        };
        assert!(opts.validate().is_err());

        let opts = GroupingOptions {
            max_group_size: 0,
            ..GroupingOptions::default()
        };
        assert!(opts.validate().is_err());
    }

    #[test]
    fn url_options_from_app_config() {
        let mut app = AppConfig::default();
        app.defaults.position_range = "1-10".into();
        app.ahrefs.country = "gb".into();
        let opts = UrlOptions::from(&app);
        assert_eq!(opts.position_range, "1-10");
        assert_eq!(opts.country, "gb");
        assert_eq!(opts.mode, "subdomains");
    }

    #[test]
    fn load_config_from_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("kwgroup-config-{}", uuid::Uuid::now_v7()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("kwgroup.toml");
        std::fs::write(&path, "[grouping\nmax_group_size = ").expect("write");

        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains("failed to parse"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
