//! Shared types, error model, and configuration for BadgeForge.
//!
//! This crate is the foundation depended on by all other BadgeForge crates.
//! It provides:
//! - [`BadgeForgeError`] — the unified error type
//! - Domain types ([`FileRecord`], [`BadgeMetadata`], [`SummaryEntry`], [`Manifest`])
//! - Configuration ([`AppConfig`], [`GenerateConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DefaultsConfig, GenerateConfig, PinataConfig, config_dir, config_file_path,
    init_config, load_config, load_config_from, validate_pinata_credentials,
};
pub use error::{BadgeForgeError, Result};
pub use types::{
    Attribute, BadgeMetadata, DEFAULT_FILENAME, DEFAULT_USER_ID, FileRecord, Manifest,
    NAME_PREFIX, SummaryEntry,
};
