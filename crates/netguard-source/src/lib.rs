//! Source file handling for netguard.
//!
//! This crate is responsible for:
//! - Representing analysed source files and mapping byte spans to lines and columns
//! - Loading and locating the `netguard.toml` configuration
//! - Pairing span-only diagnostics with source text for miette rendering

mod config;
mod diagnostic;
mod error;
mod file;

pub use config::{
    default_entry_points, find_config, EffectsConfig, NetguardConfig, ScanConfig, ScanModeConfig,
    CONFIG_FILE_NAME,
};
pub use diagnostic::{render_plain, NetguardError, Report};
pub use error::ConfigError;
pub use file::{SourceFile, Span};
