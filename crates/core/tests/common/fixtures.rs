//! Test fixtures for creating sample configurations and test projects.

use bk_protocol::config_models::{OutputTarget, PipelineConfig};
use bk_protocol::rule_models::{
    EmitOptions, InlineOptions, InterpretOptions, Matcher, Rule, Stage, TranspileOptions,
};
use std::path::PathBuf;
use tempfile::TempDir;

/// The starter-shaped configuration used across integration tests: script,
/// style, and image rules in declaration order.
#[allow(dead_code)]
pub fn starter_config() -> PipelineConfig {
    PipelineConfig {
        entry: PathBuf::from("src/index.js"),
        output: OutputTarget {
            directory: PathBuf::from("dist"),
            filename: "app.bundle.js".to_string(),
        },
        rules: vec![
            Rule {
                matcher: Matcher::Suffix(".js".to_string()),
                exclude: vec![Matcher::Pattern {
                    pattern: "node_modules".to_string(),
                }],
                stages: vec![Stage::ScriptTranspile(TranspileOptions {
                    presets: vec!["es2015".to_string(), "react".to_string(), "env".to_string()],
                    plugins: vec!["transform-class-properties".to_string()],
                })],
            },
            Rule {
                matcher: Matcher::Suffix(".scss".to_string()),
                exclude: Vec::new(),
                stages: vec![
                    Stage::StyleInject,
                    Stage::CssInterpret(InterpretOptions { source_map: true }),
                    Stage::SassCompile(InterpretOptions { source_map: true }),
                ],
            },
            Rule {
                matcher: Matcher::AnyOf(vec![
                    ".png".to_string(),
                    ".jpg".to_string(),
                    ".gif".to_string(),
                ]),
                exclude: Vec::new(),
                stages: vec![
                    Stage::FileEmit(EmitOptions {
                        output_path: Some("images/".to_string()),
                        use_relative_path: false,
                    }),
                    Stage::DataUrlInline(InlineOptions { threshold: 8192 }),
                ],
            },
        ],
    }
}

/// Create a temporary project directory with a `bundle.yaml` matching
/// [`starter_config`].
///
/// Returns a TempDir that must be kept alive for the test duration.
#[allow(dead_code)]
pub fn create_test_project() -> std::io::Result<TempDir> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    let bundle_yaml = r#"
entry: src/index.js
output:
  directory: dist
  filename: app.bundle.js
rules:
  - match: ".js"
    exclude:
      - pattern: "node_modules"
    stages:
      - stage: script-transpile
        options:
          presets: [es2015, react, env]
          plugins: [transform-class-properties]
  - match: ".scss"
    stages:
      - stage: style-inject
      - stage: css-interpret
        options:
          source-map: true
      - stage: sass-compile
        options:
          source-map: true
  - match: [".png", ".jpg", ".gif"]
    stages:
      - stage: file-emit
        options:
          output-path: images/
          use-relative-path: false
      - stage: data-url-inline
        options:
          threshold: 8192
"#;
    std::fs::write(root.join("bundle.yaml"), bundle_yaml)?;

    // A small source tree to plan against
    std::fs::create_dir_all(root.join("src/styles"))?;
    std::fs::create_dir_all(root.join("src/assets"))?;
    std::fs::write(root.join("src/index.js"), "export {};\n")?;
    std::fs::write(root.join("src/styles/index.scss"), "body {}\n")?;
    std::fs::write(root.join("src/assets/logo.png"), [0x89, 0x50, 0x4e, 0x47])?;
    std::fs::write(root.join("README.md"), "# test project\n")?;

    Ok(temp_dir)
}
