//! Command-line entry point for bundle-kit.
//!
//! The `bundle` binary wraps the resolver in a terminal surface: scaffold a
//! starter project, validate and inspect a configuration, resolve paths,
//! plan whole trees, and serve the build-host protocol on stdio.

use bk_core::config::loader::load_config;
use bk_core::host;
use bk_core::init::{generate_starter, InitOptions};
use bk_core::plan::plan_tree;
use bk_core::resolver::Resolver;
use bk_protocol::config_models::PipelineConfig;
use bk_protocol::ipc::Event;
use bk_protocol::rule_models::{Matcher, Stage};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tokio::io::BufReader;

#[derive(Parser)]
#[command(
    name = "bundle",
    version,
    about = "Declarative build-pipeline configuration toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a starter project
    Init {
        /// Target directory for the starter files
        #[arg(default_value = ".")]
        dir: PathBuf,

        /// Generate only the script rule and entry stub
        #[arg(long)]
        minimal: bool,

        /// Overwrite an existing bundle configuration
        #[arg(long)]
        force: bool,
    },

    /// Load the configuration and report whether it constructs
    Validate {
        /// Directory containing the bundle configuration
        #[arg(long, default_value = ".")]
        config: PathBuf,
    },

    /// Print the entry point, output target, and rule list
    Show {
        #[arg(long, default_value = ".")]
        config: PathBuf,

        /// Emit the configuration as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve the stage chain for one or more paths
    Resolve {
        #[arg(long, default_value = ".")]
        config: PathBuf,

        /// Emit protocol events as JSON, one per path
        #[arg(long)]
        json: bool,

        /// Candidate file paths
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Resolve every file under a source tree
    Plan {
        #[arg(long, default_value = ".")]
        config: PathBuf,

        /// Emit the plan as JSON
        #[arg(long)]
        json: bool,

        /// Root of the tree to plan (defaults to the config directory)
        dir: Option<PathBuf>,
    },

    /// Serve the build-host protocol on stdin/stdout
    Host {
        #[arg(long, default_value = ".")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init {
            dir,
            minimal,
            force,
        } => {
            generate_starter(InitOptions {
                target_dir: dir.clone(),
                force,
                minimal,
            })
            .await?;
            println!(
                "{} starter project in {}",
                "Scaffolded".green().bold(),
                dir.display()
            );
        }

        Commands::Validate { config } => {
            let resolver = load_resolver(&config).await?;
            println!(
                "{} {} rules, entry {}",
                "Configuration OK:".green().bold(),
                resolver.rule_count(),
                resolver.entry_point().display()
            );
        }

        Commands::Show { config, json } => {
            let declaration = load_config(&config).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&declaration)?);
            } else {
                print_configuration(&declaration);
            }
        }

        Commands::Resolve {
            config,
            json,
            paths,
        } => {
            let resolver = load_resolver(&config).await?;
            for path in paths {
                let event = match resolver.resolve(&path) {
                    Some(stages) => Event::Resolved {
                        path,
                        stages: stages.to_vec(),
                    },
                    None => Event::PassThrough { path },
                };
                if json {
                    println!("{}", serde_json::to_string(&event)?);
                } else {
                    print_resolution(&event);
                }
            }
        }

        Commands::Plan { config, json, dir } => {
            let resolver = load_resolver(&config).await?;
            let root = dir.unwrap_or_else(|| config.clone());
            let plan = plan_tree(&resolver, &root).map_err(|e| color_eyre::eyre::eyre!(e))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                for file in &plan.files {
                    match &file.stages {
                        Some(stages) => println!(
                            "{}  {}",
                            file.path.display(),
                            chain_summary(stages).cyan()
                        ),
                        None => println!(
                            "{}  {}",
                            file.path.display(),
                            "(pass-through)".dimmed()
                        ),
                    }
                }
                println!(
                    "{} {} matched, {} pass-through",
                    "Plan:".bold(),
                    plan.matched().count(),
                    plan.pass_through().count()
                );
            }
        }

        Commands::Host { config } => {
            let resolver = load_resolver(&config).await?;
            host::serve(
                &resolver,
                BufReader::new(tokio::io::stdin()),
                tokio::io::stdout(),
            )
            .await
            .map_err(|e| color_eyre::eyre::eyre!(e))?;
        }
    }

    Ok(())
}

/// Load and construct the resolver, surfacing any configuration error.
async fn load_resolver(root: &Path) -> color_eyre::Result<Resolver> {
    let config = load_config(root).await?;
    Ok(Resolver::new(config)?)
}

/// Human-readable configuration summary.
fn print_configuration(config: &PipelineConfig) {
    println!("{} {}", "entry:".bold(), config.entry.display());
    println!(
        "{} {}/{}",
        "output:".bold(),
        config.output.directory.display(),
        config.output.filename
    );
    println!("{}", "rules:".bold());
    for (index, rule) in config.rules.iter().enumerate() {
        println!(
            "  {index}. {}  {}",
            describe_matcher(&rule.matcher),
            chain_summary(&rule.stages).cyan()
        );
    }
}

/// Human-readable resolution line for one path.
fn print_resolution(event: &Event) {
    match event {
        Event::Resolved { path, stages } => {
            println!("{path}  {}", chain_summary(stages).cyan());
        }
        Event::PassThrough { path } => {
            println!("{path}  {}", "(pass-through)".dimmed());
        }
        _ => {}
    }
}

/// Join a chain's identifiers in application order.
fn chain_summary(stages: &[Stage]) -> String {
    stages
        .iter()
        .map(Stage::identifier)
        .collect::<Vec<_>>()
        .join(" > ")
}

/// Short description of a matcher for summaries.
fn describe_matcher(matcher: &Matcher) -> String {
    match matcher {
        Matcher::Suffix(suffix) => suffix.clone(),
        Matcher::AnyOf(suffixes) => suffixes.join("|"),
        Matcher::Pattern { pattern } => format!("/{pattern}/"),
    }
}
