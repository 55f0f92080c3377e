//! Pipeline configuration resolver.
//!
//! The resolver answers, for a candidate source-file path, which stage
//! chain applies and in what order the stages run, and provides the fixed
//! entry/output locations for the whole build.
//!
//! Rule matching is a linear scan over the declared rule list,
//! first-match-wins. This is a deliberate, simple policy (not longest-match
//! or most-specific-match): declaration order, never specificity, decides
//! overlapping matchers, and chains from different rules are never merged.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use bk_protocol::config_models::{OutputTarget, PipelineConfig};
use bk_protocol::rule_models::{Matcher, Stage};
use regex::Regex;
use std::path::{Path, PathBuf};

/// A matcher with its pattern compiled for repeated evaluation.
#[derive(Debug)]
enum CompiledMatcher {
    Suffix(String),
    AnyOf(Vec<String>),
    Pattern(Regex),
}

impl CompiledMatcher {
    fn compile(matcher: &Matcher) -> ConfigResult<Self> {
        match matcher {
            Matcher::Suffix(suffix) => Ok(Self::Suffix(suffix.clone())),
            Matcher::AnyOf(suffixes) => Ok(Self::AnyOf(suffixes.clone())),
            Matcher::Pattern { pattern } => {
                let regex = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                })?;
                Ok(Self::Pattern(regex))
            }
        }
    }

    fn matches(&self, path: &str) -> bool {
        match self {
            Self::Suffix(suffix) => path.ends_with(suffix.as_str()),
            Self::AnyOf(suffixes) => suffixes.iter().any(|s| path.ends_with(s.as_str())),
            Self::Pattern(regex) => regex.is_match(path),
        }
    }
}

/// One rule ready for evaluation: compiled matchers plus the declared chain.
#[derive(Debug)]
struct CompiledRule {
    matcher: CompiledMatcher,
    exclusions: Vec<CompiledMatcher>,
    stages: Vec<Stage>,
}

impl CompiledRule {
    /// Whether this rule claims the path: the matcher matches and no
    /// exclusion does.
    fn applies_to(&self, path: &str) -> bool {
        self.matcher.matches(path) && !self.exclusions.iter().any(|e| e.matches(path))
    }
}

/// The pipeline configuration resolver.
///
/// Constructed exactly once from a parsed [`PipelineConfig`]; immutable
/// afterwards, so it can be shared freely across threads evaluating
/// different paths against the same rule sequence. Holds no mutable state,
/// performs no I/O, and cannot fail after construction.
///
/// # Example
///
/// ```rust,no_run
/// use bk_core::config::loader::load_config;
/// use bk_core::resolver::Resolver;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// let resolver = Resolver::new(config)?;
/// if let Some(stages) = resolver.resolve("src/styles/theme.scss") {
///     println!("{} stages apply", stages.len());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Resolver {
    entry: PathBuf,
    output: OutputTarget,
    rules: Vec<CompiledRule>,
}

impl Resolver {
    /// Construct a resolver, validating the declaration.
    ///
    /// All configuration failures surface here, once, and are fatal:
    /// - missing entry point
    /// - missing output directory or filename
    /// - empty rule list
    /// - a rule with an empty stage chain
    /// - a matcher pattern that fails to compile
    ///
    /// A successfully constructed resolver can no longer fail; its
    /// accessors are infallible by construction.
    pub fn new(config: PipelineConfig) -> ConfigResult<Self> {
        if config.entry.as_os_str().is_empty() {
            return Err(ConfigError::MissingEntryPoint);
        }

        if config.output.directory.as_os_str().is_empty() {
            return Err(ConfigError::MissingOutputTarget {
                reason: "output directory is empty".to_string(),
            });
        }

        if config.output.filename.is_empty() {
            return Err(ConfigError::MissingOutputTarget {
                reason: "output filename is empty".to_string(),
            });
        }

        if config.rules.is_empty() {
            return Err(ConfigError::EmptyRules);
        }

        let mut rules = Vec::with_capacity(config.rules.len());
        for (index, rule) in config.rules.iter().enumerate() {
            if rule.stages.is_empty() {
                return Err(ConfigError::EmptyStageChain { rule: index });
            }

            let matcher = CompiledMatcher::compile(&rule.matcher)?;
            let exclusions = rule
                .exclude
                .iter()
                .map(CompiledMatcher::compile)
                .collect::<ConfigResult<Vec<_>>>()?;

            rules.push(CompiledRule {
                matcher,
                exclusions,
                stages: rule.stages.clone(),
            });
        }

        Ok(Self {
            entry: config.entry,
            output: config.output,
            rules,
        })
    }

    /// Resolve the stage chain for a candidate file path.
    ///
    /// Scans the rules in declaration order and returns the chain of the
    /// first rule whose matcher matches the path and whose exclusions do
    /// not. Returns `None` when no rule matches; that is not an error, it
    /// signals the build host to pass the file through unmodified.
    ///
    /// Deterministic: an identical path against an unchanged rule sequence
    /// always yields the identical chain.
    pub fn resolve(&self, path: &str) -> Option<&[Stage]> {
        self.rules
            .iter()
            .find(|rule| rule.applies_to(path))
            .map(|rule| rule.stages.as_slice())
    }

    /// The fixed build entry file location.
    pub fn entry_point(&self) -> &Path {
        &self.entry
    }

    /// The fixed artifact output location.
    pub fn output_target(&self) -> &OutputTarget {
        &self.output
    }

    /// Number of declared rules.
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }
}
