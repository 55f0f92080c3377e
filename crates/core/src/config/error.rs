//! Error types for configuration loading and resolver construction.
//!
//! This module defines the single construction-time error taxonomy. No
//! runtime (per-file) error kind exists: match evaluation cannot fail, and
//! the absence of a match is a valid, non-error outcome.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a configuration file or constructing a
/// resolver from it.
///
/// Every variant is fatal: a failed construction never yields a partial or
/// degraded pipeline, and retrying with an identical configuration fails
/// identically.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file was found in the searched directory.
    #[error("No bundle.yaml, bundle.yml, or bundle.toml found in {root}")]
    NotFound { root: PathBuf },

    /// Failed to read a configuration file from disk.
    #[error("Failed to read config file at {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to parse YAML configuration.
    #[error("Failed to parse YAML file at {path}: {source}")]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// Failed to parse TOML configuration.
    #[error("Failed to parse TOML file at {path}: {source}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// The configuration file has an extension the loader does not handle.
    #[error("Unsupported config format at {path} (expected .yaml, .yml, or .toml)")]
    UnsupportedFormat { path: PathBuf },

    /// The configuration declares no entry point.
    #[error("Configuration has no entry point")]
    MissingEntryPoint,

    /// The configuration declares no usable output target.
    #[error("Configuration has no output target: {reason}")]
    MissingOutputTarget { reason: String },

    /// The configuration declares no rules at all.
    #[error("Configuration declares an empty rule list")]
    EmptyRules,

    /// A rule declares an empty stage chain.
    #[error("Rule {rule} declares an empty stage chain")]
    EmptyStageChain { rule: usize },

    /// A matcher pattern failed to compile.
    #[error("Invalid matcher pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },
}

/// Type alias for Result with ConfigError.
pub type ConfigResult<T> = Result<T, ConfigError>;
