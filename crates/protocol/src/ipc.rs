//! Host integration protocol.
//!
//! This module defines the message types for line-delimited JSON
//! communication between an external build host and the resolver.
//!
//! The protocol follows an Operation/Event pattern:
//! - `Op`: requests sent from the build host to the resolver
//! - `Event`: answers sent from the resolver back to the host
//!
//! One JSON document per line in each direction. The resolver never
//! initiates traffic; every `Event` answers exactly one `Op`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use ts_rs::TS;

use crate::config_models::OutputTarget;
use crate::rule_models::Stage;

/// Operations sent from the build host to the resolver.
///
/// These mirror the three resolver operations plus a shutdown request.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "resolvePath",
///   "payload": {
///     "path": "src/styles/theme.scss"
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Op {
    /// Resolve the stage chain for one candidate file path.
    ResolvePath {
        /// Candidate path; malformed paths simply fail to match any rule.
        path: String,
    },

    /// Request the fixed build entry file location.
    GetEntryPoint,

    /// Request the fixed artifact output location.
    GetOutputTarget,

    /// End the session; the resolver stops reading after this.
    Shutdown,
}

/// Events sent from the resolver back to the build host.
///
/// Uses tagged enum serialization for TypeScript compatibility:
/// ```json
/// {
///   "type": "resolved",
///   "payload": {
///     "path": "src/styles/theme.scss",
///     "stages": [{ "stage": "style-inject" }]
///   }
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "payload", rename_all = "camelCase")]
pub enum Event {
    /// A rule matched; the ordered stage chain follows.
    Resolved { path: String, stages: Vec<Stage> },

    /// No rule matched. Not an error: the host passes the file through
    /// unmodified.
    PassThrough { path: String },

    /// Answer to [`Op::GetEntryPoint`].
    EntryPoint { path: PathBuf },

    /// Answer to [`Op::GetOutputTarget`].
    OutputTarget { target: OutputTarget },

    /// The incoming line was not a valid operation. The session continues.
    Error { message: String },
}
