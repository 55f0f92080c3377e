//! Top-level pipeline configuration models.
//!
//! This module defines the structure of the `bundle.yaml` / `bundle.toml`
//! configuration file: the fixed entry point, the output target, and the
//! ordered rule list.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;

use crate::rule_models::Rule;

/// Destination for emitted build artifacts.
///
/// The filename is a literal template string used verbatim by the build
/// host; this model never interpolates it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct OutputTarget {
    /// Directory artifacts are written into.
    #[serde(default)]
    pub directory: PathBuf,

    /// Artifact filename template, e.g. `app.bundle.js`.
    #[serde(default)]
    pub filename: String,
}

/// A complete pipeline configuration declaration.
///
/// Constructed once at process start, consumed read-only for the duration
/// of one build invocation. Empty `entry`/`output` fields parse successfully
/// but are rejected when the resolver is constructed, so a half-declared
/// configuration never reaches match evaluation.
///
/// # Example
///
/// ```yaml
/// entry: src/index.js
/// output:
///   directory: dist
///   filename: app.bundle.js
/// rules:
///   - match: ".scss"
///     stages:
///       - stage: style-inject
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct PipelineConfig {
    /// The single build entry file.
    #[serde(default)]
    pub entry: PathBuf,

    /// Destination directory and filename template.
    #[serde(default)]
    pub output: OutputTarget,

    /// Ordered rule list; declaration order decides overlapping matchers.
    #[serde(default)]
    pub rules: Vec<Rule>,
}
