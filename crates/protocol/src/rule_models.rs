//! Rule and stage models for `bundle.yaml` / `bundle.toml` configurations.
//!
//! This module defines the structure of the ordered rule list that maps
//! source-file categories to transformation stage chains.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A path pattern tested against candidate source-file paths.
///
/// Matchers come in three declaration forms:
/// - A bare string is a literal suffix match (`".scss"`).
/// - A list of strings matches any suffix in the set (`[".png", ".jpg"]`).
/// - A `{ pattern: "<regex>" }` mapping matches wherever the regular
///   expression matches in the path.
///
/// The enum uses `#[serde(untagged)]` to allow all three YAML spellings
/// without an explicit tag.
///
/// Patterns are carried here as plain strings; they are compiled once at
/// resolver construction, where a malformed pattern is a configuration
/// error.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(untagged)]
pub enum Matcher {
    /// Literal suffix match, e.g. `".js"`.
    Suffix(String),

    /// Matches if the path ends with any suffix in the set.
    AnyOf(Vec<String>),

    /// Regular expression matched anywhere in the path.
    Pattern {
        /// The regex source text.
        pattern: String,
    },
}

/// One declarative rule: a matcher paired with an ordered stage chain.
///
/// Rules are evaluated in declaration order, first-match-wins. A rule whose
/// `exclude` patterns match the candidate path is skipped even when its
/// matcher matches, and scanning continues with subsequent rules.
///
/// # Example
///
/// ```yaml
/// - match: ".js"
///   exclude:
///     - pattern: "node_modules"
///   stages:
///     - stage: script-transpile
///       options:
///         presets: [es2015]
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Rule {
    /// Pattern tested against candidate file paths.
    #[serde(rename = "match")]
    pub matcher: Matcher,

    /// Paths to skip even when `matcher` matches.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude: Vec<Matcher>,

    /// Ordered transformation chain; each stage's output feeds the next.
    pub stages: Vec<Stage>,
}

/// One named transformation step with its recognized options.
///
/// The identifier is the serialized `stage` tag; options are a typed struct
/// per stage kind, so unrecognized option keys are rejected when the
/// configuration is parsed rather than silently ignored.
///
/// Stage semantics are opaque to this model: identifiers and option values
/// are handed to the external tool host verbatim.
///
/// Uses adjacently tagged serialization:
///
/// ```yaml
/// - stage: style-inject
/// - stage: css-interpret
///   options:
///     source-map: true
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(tag = "stage", content = "options", rename_all = "kebab-case")]
pub enum Stage {
    /// Transpile scripts down to the supported language level.
    ScriptTranspile(TranspileOptions),

    /// Inject collected styles into the page at load time.
    StyleInject,

    /// Interpret `@import`/`url()` references inside stylesheets.
    CssInterpret(InterpretOptions),

    /// Compile Sass sources to CSS.
    SassCompile(InterpretOptions),

    /// Emit the matched asset as a separate output file.
    FileEmit(EmitOptions),

    /// Inline assets below a size threshold as embedded data URLs.
    DataUrlInline(InlineOptions),
}

impl Stage {
    /// The serialized identifier of this stage, as it appears in
    /// configuration files and host protocol messages.
    pub fn identifier(&self) -> &'static str {
        match self {
            Self::ScriptTranspile(_) => "script-transpile",
            Self::StyleInject => "style-inject",
            Self::CssInterpret(_) => "css-interpret",
            Self::SassCompile(_) => "sass-compile",
            Self::FileEmit(_) => "file-emit",
            Self::DataUrlInline(_) => "data-url-inline",
        }
    }
}

/// Options for the `script-transpile` stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct TranspileOptions {
    /// Transform preset names, applied by the external transpiler.
    #[serde(default)]
    pub presets: Vec<String>,

    /// Additional transform plugin names.
    #[serde(default)]
    pub plugins: Vec<String>,
}

/// Options shared by the stylesheet interpretation stages.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct InterpretOptions {
    /// Emit source maps alongside the transformed output.
    #[serde(default)]
    pub source_map: bool,
}

/// Options for the `file-emit` stage.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default, TS)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct EmitOptions {
    /// Destination subdirectory for emitted assets, relative to the
    /// output target directory.
    #[serde(default)]
    pub output_path: Option<String>,

    /// Resolve emitted paths relative to the requesting module.
    #[serde(default)]
    pub use_relative_path: bool,
}

/// Options for the `data-url-inline` stage.
///
/// The threshold is opaque configuration: the resolver's only contract is
/// to preserve the declared value unchanged from configuration to
/// consumption by the external asset tool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, TS)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct InlineOptions {
    /// Byte-size limit below which assets are inlined.
    pub threshold: u64,
}
