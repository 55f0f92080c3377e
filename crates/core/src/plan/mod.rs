//! Build-plan generation.
//!
//! A build plan is the resolver applied across a whole source tree: for
//! every file under a root directory, either the matched stage chain or a
//! pass-through marker. This is the repository-local stand-in for the
//! external build host's enumeration loop.
//!
//! Unmatched files are recorded as pass-through, never dropped: the host
//! decides what pass-through means, the plan only reports it.

use crate::resolver::Resolver;
use anyhow::{Context, Result};
use bk_protocol::config_models::OutputTarget;
use bk_protocol::rule_models::Stage;
use serde::Serialize;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One source file with its resolution outcome.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct PlannedFile {
    /// Path relative to the planned root.
    pub path: PathBuf,

    /// The matched stage chain, or `None` for pass-through.
    pub stages: Option<Vec<Stage>>,
}

impl PlannedFile {
    /// Whether the build host should pass this file through unmodified.
    pub fn is_pass_through(&self) -> bool {
        self.stages.is_none()
    }
}

/// The resolver applied across one source tree.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct BuildPlan {
    /// The fixed build entry file.
    pub entry: PathBuf,

    /// The fixed artifact output location.
    pub output: OutputTarget,

    /// Every file under the root, in sorted traversal order.
    pub files: Vec<PlannedFile>,
}

impl BuildPlan {
    /// Files with a matched stage chain.
    pub fn matched(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|f| !f.is_pass_through())
    }

    /// Files no rule claimed.
    pub fn pass_through(&self) -> impl Iterator<Item = &PlannedFile> {
        self.files.iter().filter(|f| f.is_pass_through())
    }
}

/// Walk `root` and resolve every file against the configuration.
///
/// Traversal is sorted by file name so the plan is stable across runs.
/// Paths are matched in their root-relative form, so path-anchored
/// exclusions (e.g. `node_modules`) behave the same regardless of where
/// the root itself lives.
///
/// # Errors
///
/// Returns an error if the tree cannot be traversed.
pub fn plan_tree(resolver: &Resolver, root: &Path) -> Result<BuildPlan> {
    let mut files = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry =
            entry.with_context(|| format!("Failed to traverse source tree at {}", root.display()))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .unwrap_or_else(|_| entry.path())
            .to_path_buf();

        let stages = resolver
            .resolve(&relative.to_string_lossy())
            .map(<[Stage]>::to_vec);

        files.push(PlannedFile {
            path: relative,
            stages,
        });
    }

    Ok(BuildPlan {
        entry: resolver.entry_point().to_path_buf(),
        output: resolver.output_target().clone(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bk_protocol::config_models::PipelineConfig;
    use bk_protocol::rule_models::{Matcher, Rule, TranspileOptions};
    use std::fs;
    use tempfile::tempdir;

    fn test_resolver() -> Resolver {
        let config = PipelineConfig {
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
                    stages: vec![Stage::ScriptTranspile(TranspileOptions::default())],
                },
                Rule {
                    matcher: Matcher::Suffix(".scss".to_string()),
                    exclude: Vec::new(),
                    stages: vec![Stage::StyleInject],
                },
            ],
        };
        Resolver::new(config).expect("Failed to construct resolver")
    }

    #[test]
    fn test_plan_tree_resolves_each_file() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();

        fs::create_dir_all(root.join("src/styles")).expect("Failed to create dirs");
        fs::write(root.join("src/index.js"), "export {};\n").expect("write");
        fs::write(root.join("src/styles/index.scss"), "body {}\n").expect("write");
        fs::write(root.join("README.md"), "# readme\n").expect("write");

        let plan = plan_tree(&test_resolver(), root).expect("Failed to plan tree");

        assert_eq!(plan.entry, PathBuf::from("src/index.js"));
        assert_eq!(plan.files.len(), 3);
        assert_eq!(plan.matched().count(), 2);
        assert_eq!(plan.pass_through().count(), 1);

        let readme = plan
            .files
            .iter()
            .find(|f| f.path == PathBuf::from("README.md"))
            .expect("README should be planned");
        assert!(readme.is_pass_through());

        let script = plan
            .files
            .iter()
            .find(|f| f.path == PathBuf::from("src/index.js"))
            .expect("Entry should be planned");
        let stages = script.stages.as_ref().expect("Entry should match");
        assert_eq!(stages[0].identifier(), "script-transpile");
    }

    #[test]
    fn test_plan_tree_applies_exclusions_on_relative_paths() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();

        fs::create_dir_all(root.join("node_modules/lib")).expect("Failed to create dirs");
        fs::write(root.join("node_modules/lib/index.js"), "module.exports = {};\n")
            .expect("write");

        let plan = plan_tree(&test_resolver(), root).expect("Failed to plan tree");

        assert_eq!(plan.files.len(), 1);
        assert!(
            plan.files[0].is_pass_through(),
            "Excluded dependency sources are pass-through"
        );
    }

    #[test]
    fn test_plan_tree_is_stable() {
        let dir = tempdir().expect("Failed to create temp dir");
        let root = dir.path();

        for name in ["b.js", "a.js", "c.scss"] {
            fs::write(root.join(name), "").expect("write");
        }

        let first = plan_tree(&test_resolver(), root).expect("plan");
        let second = plan_tree(&test_resolver(), root).expect("plan");
        assert_eq!(first, second, "Plans must be stable across runs");

        let names: Vec<_> = first.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.js"),
                PathBuf::from("b.js"),
                PathBuf::from("c.scss")
            ]
        );
    }

    #[test]
    fn test_plan_serializes_pass_through_as_null() {
        let dir = tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("README.md"), "").expect("write");

        let plan = plan_tree(&test_resolver(), dir.path()).expect("plan");
        let json = serde_json::to_value(&plan).expect("Failed to serialize plan");

        assert_eq!(json["files"][0]["stages"], serde_json::Value::Null);
    }
}
