//! Shared types, error model, and configuration for kwgroup.
//!
//! This crate is the foundation depended on by all other kwgroup crates.
//! It provides:
//! - [`KwgroupError`] — the unified error type
//! - Domain types ([`KeywordGroup`], [`Relevance`], [`Theme`], [`GroupedUrl`], [`ReportId`])
//! - Configuration ([`AppConfig`], [`GroupingOptions`], [`UrlOptions`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AhrefsConfig, AppConfig, DefaultsConfig, GroupingConfig, GroupingOptions, OutputFormat,
    UrlOptions, config_dir, config_file_path, init_config, load_config, load_config_from,
};
pub use error::{KwgroupError, Result};
pub use types::{
    CURRENT_SCHEMA_VERSION, GroupedUrl, GroupingReport, GroupingSummary, KeywordGroup,
    Relevance, ReportId, Theme, ThemeKind,
};
