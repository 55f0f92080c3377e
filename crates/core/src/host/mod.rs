//! Build-host protocol loop.
//!
//! Serves the [`Op`]/[`Event`] protocol from `bk-protocol` over any async
//! reader/writer pair, one JSON document per line. The CLI wires this to
//! stdin/stdout so an external build host can drive the resolver as a
//! child process.
//!
//! A malformed line produces an [`Event::Error`] and the session
//! continues; only [`Op::Shutdown`] or end-of-input ends the loop.

use crate::resolver::Resolver;
use anyhow::Result;
use bk_protocol::ipc::{Event, Op};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Serve the host protocol until shutdown or end-of-input.
///
/// Every incoming operation is answered with exactly one event. The
/// resolver is only read, never mutated, so a single resolver can back
/// any number of sequential sessions.
pub async fn serve<R, W>(resolver: &Resolver, reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let event = match serde_json::from_str::<Op>(line) {
            Ok(Op::ResolvePath { path }) => match resolver.resolve(&path) {
                Some(stages) => Event::Resolved {
                    path,
                    stages: stages.to_vec(),
                },
                None => Event::PassThrough { path },
            },
            Ok(Op::GetEntryPoint) => Event::EntryPoint {
                path: resolver.entry_point().to_path_buf(),
            },
            Ok(Op::GetOutputTarget) => Event::OutputTarget {
                target: resolver.output_target().clone(),
            },
            Ok(Op::Shutdown) => break,
            Err(e) => Event::Error {
                message: format!("Invalid operation: {e}"),
            },
        };

        let mut payload = serde_json::to_vec(&event)?;
        payload.push(b'\n');
        writer.write_all(&payload).await?;
        writer.flush().await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bk_protocol::config_models::{OutputTarget, PipelineConfig};
    use bk_protocol::rule_models::{Matcher, Rule, Stage};
    use std::path::PathBuf;
    use tokio::io::BufReader;

    fn test_resolver() -> Resolver {
        let config = PipelineConfig {
            entry: PathBuf::from("src/index.js"),
            output: OutputTarget {
                directory: PathBuf::from("dist"),
                filename: "app.bundle.js".to_string(),
            },
            rules: vec![Rule {
                matcher: Matcher::Suffix(".scss".to_string()),
                exclude: Vec::new(),
                stages: vec![Stage::StyleInject],
            }],
        };
        Resolver::new(config).expect("Failed to construct resolver")
    }

    async fn run_session(input: &str) -> Vec<Event> {
        let resolver = test_resolver();
        let mut output = Vec::new();

        serve(&resolver, BufReader::new(input.as_bytes()), &mut output)
            .await
            .expect("Session should not fail");

        String::from_utf8(output)
            .expect("Output should be UTF-8")
            .lines()
            .map(|line| serde_json::from_str(line).expect("Each line should be an Event"))
            .collect()
    }

    #[tokio::test]
    async fn test_resolve_path_round_trip() {
        let input = r#"{"type":"resolvePath","payload":{"path":"theme.scss"}}
{"type":"resolvePath","payload":{"path":"theme.css"}}
"#;
        let events = run_session(input).await;

        assert_eq!(events.len(), 2);
        assert!(
            matches!(&events[0], Event::Resolved { path, stages } if path == "theme.scss" && stages.len() == 1)
        );
        assert!(matches!(&events[1], Event::PassThrough { path } if path == "theme.css"));
    }

    #[tokio::test]
    async fn test_entry_point_and_output_target() {
        let input = r#"{"type":"getEntryPoint"}
{"type":"getOutputTarget"}
"#;
        let events = run_session(input).await;

        assert_eq!(events.len(), 2);
        assert!(
            matches!(&events[0], Event::EntryPoint { path } if path == &PathBuf::from("src/index.js"))
        );
        assert!(
            matches!(&events[1], Event::OutputTarget { target } if target.filename == "app.bundle.js")
        );
    }

    #[tokio::test]
    async fn test_malformed_line_keeps_session_alive() {
        let input = r#"this is not json
{"type":"getEntryPoint"}
"#;
        let events = run_session(input).await;

        assert_eq!(events.len(), 2);
        assert!(matches!(&events[0], Event::Error { .. }));
        assert!(matches!(&events[1], Event::EntryPoint { .. }));
    }

    #[tokio::test]
    async fn test_shutdown_ends_session() {
        let input = r#"{"type":"shutdown"}
{"type":"getEntryPoint"}
"#;
        let events = run_session(input).await;

        assert!(events.is_empty(), "Nothing is processed after shutdown");
    }

    #[tokio::test]
    async fn test_blank_lines_are_ignored() {
        let input = "\n\n{\"type\":\"getEntryPoint\"}\n\n";
        let events = run_session(input).await;

        assert_eq!(events.len(), 1);
    }
}
