//! # bk-core
//!
//! Configuration loading and pipeline resolution for bundle-kit.
//!
//! This crate provides:
//! - Configuration loading from `bundle.yaml` / `bundle.toml` files
//! - The pipeline configuration resolver (first-match-wins rule scanning)
//! - Build-plan generation across a source tree
//! - The build-host protocol loop
//! - Starter-project scaffolding
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and the construction error taxonomy
//! - [`resolver`]: Stage-chain resolution for candidate file paths
//! - [`plan`]: Whole-tree build plans
//! - [`host`]: Op/Event protocol loop for external build hosts
//! - [`init`]: Starter-project scaffolding

pub mod config;
pub mod host;
pub mod init;
pub mod plan;
pub mod resolver;
