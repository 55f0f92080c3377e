//! Configuration file loader.
//!
//! This module reads a pipeline configuration declaration from a project
//! directory. A project carries exactly one configuration file, looked up
//! in this order:
//! - `bundle.yaml`
//! - `bundle.yml`
//! - `bundle.toml`
//!
//! Loading only parses; semantic validation (entry point present, rule list
//! non-empty, patterns well-formed) happens when the resolver is
//! constructed from the parsed declaration.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use bk_protocol::config_models::PipelineConfig;
use std::path::Path;

/// Configuration file names recognized by [`load_config`], in lookup order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["bundle.yaml", "bundle.yml", "bundle.toml"];

/// Loads the pipeline configuration from a project directory.
///
/// Checks for each name in [`CONFIG_FILE_NAMES`] and parses the first one
/// found. A directory with no configuration file is an error: the resolver
/// lifecycle requires a declaration to exist before anything else runs.
///
/// # Arguments
///
/// * `root` - Project directory to search
///
/// # Errors
///
/// Returns `ConfigError` if no configuration file exists, the file cannot
/// be read, or its syntax is invalid.
///
/// # Example
///
/// ```rust,no_run
/// use bk_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Loaded {} rules", config.rules.len());
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<PipelineConfig> {
    for name in CONFIG_FILE_NAMES {
        let candidate = root.join(name);
        if candidate.exists() {
            return load_config_file(&candidate).await;
        }
    }

    Err(ConfigError::NotFound {
        root: root.to_path_buf(),
    })
}

/// Loads a pipeline configuration from a specific file.
///
/// The format is chosen by extension: `.yaml`/`.yml` parse as YAML,
/// `.toml` as TOML. Anything else is `ConfigError::UnsupportedFormat`.
pub async fn load_config_file(path: &Path) -> ConfigResult<PipelineConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    match path.extension().and_then(|s| s.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(&content).map_err(|source| ConfigError::YamlParse {
                path: path.to_path_buf(),
                source,
            })
        }
        Some("toml") => toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: path.to_path_buf(),
            source,
        }),
        _ => Err(ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        }),
    }
}
