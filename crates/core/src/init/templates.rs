//! Embedded template files for starter-project generation.
//!
//! This module uses `rust-embed` to embed template files from the project
//! root `templates/` directory into the binary at compile time. This allows
//! the CLI to scaffold starter projects without external file dependencies.

use rust_embed::RustEmbed;

/// Embedded template files from the `templates/` directory.
///
/// At compile time, all files in the project root `templates/` directory
/// are embedded into the binary. The path is calculated relative to the
/// crate root:
/// - `CARGO_MANIFEST_DIR` = `crates/core`
/// - `../../templates` = project root `templates/`
///
/// The `debug-embed` feature embeds the files in debug builds as well, so
/// tests exercise the same assets that ship in release binaries.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path.
///
/// # Arguments
/// * `path` - Relative path from templates root (e.g., "bundle.yaml")
///
/// # Returns
/// The file content as a String, or None if the file doesn't exist.
///
/// # Example
/// ```
/// use bk_core::init::templates::get_template;
///
/// let config = get_template("bundle.yaml").expect("bundle.yaml should exist");
/// assert!(config.contains("entry:"));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files in a directory.
///
/// # Arguments
/// * `prefix` - Directory prefix (e.g., "src/")
///
/// # Returns
/// A vector of file paths that match the prefix.
pub fn list_templates(prefix: &str) -> Vec<String> {
    TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect()
}
