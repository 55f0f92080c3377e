//! Starter-project generation.

use super::error::{InitError, InitResult};
use super::templates::{get_template, list_templates};
use std::fs;
use std::path::{Path, PathBuf};

/// Options for scaffolding a starter project.
#[derive(Debug, Clone)]
pub struct InitOptions {
    /// Target directory where the starter files are created.
    pub target_dir: PathBuf,

    /// Overwrite an existing bundle configuration if one exists.
    pub force: bool,

    /// Create a minimal starter (script rule only, no style/image rules).
    pub minimal: bool,
}

impl Default for InitOptions {
    fn default() -> Self {
        Self {
            target_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            force: false,
            minimal: false,
        }
    }
}

/// Generate a starter project in the target directory.
///
/// This function creates the following structure:
/// ```text
/// <target>/
/// ├── bundle.yaml
/// └── src/
///     ├── index.js
///     └── styles/
///         └── index.scss (unless minimal)
/// ```
///
/// The generated `bundle.yaml` parses and constructs cleanly, so
/// `bundle init` followed by `bundle validate` always succeeds.
///
/// # Arguments
/// * `options` - Configuration for the scaffolding process
///
/// # Returns
/// `Ok(())` if successful, or an `InitError` if:
/// - A bundle configuration already exists (without force flag)
/// - A template file cannot be found
/// - File system operations fail
///
/// # Example
/// ```no_run
/// use bk_core::init::{generate_starter, InitOptions};
/// use std::path::PathBuf;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let options = InitOptions {
///     target_dir: PathBuf::from("."),
///     force: false,
///     minimal: false,
/// };
///
/// generate_starter(options).await?;
/// # Ok(())
/// # }
/// ```
pub async fn generate_starter(options: InitOptions) -> InitResult<()> {
    let config_path = options.target_dir.join("bundle.yaml");

    // Refuse to clobber an existing configuration
    if config_path.exists() && !options.force {
        return Err(InitError::ConfigExists(config_path));
    }

    let config_template = if options.minimal {
        "bundle-minimal.yaml"
    } else {
        "bundle.yaml"
    };

    let config = get_template(config_template)
        .ok_or_else(|| InitError::TemplateNotFound(config_template.to_string()))?;

    fs::write(&config_path, config).map_err(|source| InitError::FileWrite {
        path: config_path,
        source,
    })?;

    if options.minimal {
        // Only an entry stub; the minimal config has no style rule, so the
        // stub must not import a stylesheet.
        let entry = get_template("index-minimal.js")
            .ok_or_else(|| InitError::TemplateNotFound("index-minimal.js".to_string()))?;
        let entry_path = options.target_dir.join("src/index.js");
        if let Some(parent) = entry_path.parent() {
            fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&entry_path, entry).map_err(|source| InitError::FileWrite {
            path: entry_path,
            source,
        })?;
    } else {
        for source_path in list_templates("src/") {
            write_template_file(&options.target_dir, &source_path)?;
        }
    }

    Ok(())
}

/// Helper function to write a template file to the target directory.
///
/// # Arguments
/// * `target_dir` - The scaffold target directory
/// * `template_path` - Relative path of the template (e.g., "src/index.js")
///
/// # Returns
/// `Ok(())` if successful, or an `InitError` if the template is not found
/// or writing fails.
fn write_template_file(target_dir: &Path, template_path: &str) -> InitResult<()> {
    let content = get_template(template_path)
        .ok_or_else(|| InitError::TemplateNotFound(template_path.to_string()))?;

    let target_path = target_dir.join(template_path);

    // Ensure parent directory exists
    if let Some(parent) = target_path.parent() {
        fs::create_dir_all(parent).map_err(|source| InitError::DirectoryCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(&target_path, content).map_err(|source| InitError::FileWrite {
        path: target_path,
        source,
    })?;

    Ok(())
}
