//! UX audit CLI
//!
//! Offline orchestrator: audits a captured page snapshot and prints the
//! report. An LLM answer can be replayed from a file to exercise the
//! augmentation path without network access.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use audit_engine::catalog;
use audit_engine::llm::{BackendError, Completer, FallbackCompleter, LlmPayload};
use audit_engine::{AuditConfig, AuditPipeline, BusinessContext};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ux_types::RawSnapshot;

#[derive(Parser, Debug)]
#[command(name = "ux-audit")]
#[command(version, about = "Usability audit of captured web page snapshots")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit one page snapshot
    Audit {
        /// Snapshot JSON ({dom_tree, accessibility_tree, axe_violations})
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// URL of the audited page
        #[arg(short, long, default_value = "")]
        url: String,

        /// Free-text business context, e.g. "Industry: SaaS, Goal: more signups"
        #[arg(short, long, default_value = "")]
        context: String,

        /// Key user action to locate, e.g. "click Start free trial"
        #[arg(short, long)]
        key_action: Option<String>,

        /// Replay a recorded LLM answer from this file
        #[arg(long)]
        llm_response: Option<PathBuf>,

        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Print the rule catalog as JSON
    Rules,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Text,
}

/// Completer that answers with the contents of a file
struct RecordedResponse {
    path: PathBuf,
}

impl Completer for RecordedResponse {
    fn name(&self) -> &str {
        "recorded"
    }

    fn complete(&self, _payload: &LlmPayload) -> Result<String, BackendError> {
        fs::read_to_string(&self.path)
            .map_err(|e| BackendError::Request(format!("{}: {}", self.path.display(), e)))
    }
}

/// Unreadable or malformed snapshots degrade to "no snapshot"
fn load_snapshot(path: &Path) -> Option<RawSnapshot> {
    let parsed = fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot: {}", path.display()))
        .and_then(|content| {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse snapshot: {}", path.display()))
        });
    match parsed {
        Ok(snapshot) => Some(snapshot),
        Err(e) => {
            warn!("{:#}", e);
            None
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match args.command {
        Command::Rules => {
            println!("{}", serde_json::to_string_pretty(catalog::categories())?);
        }
        Command::Audit {
            snapshot,
            url,
            context,
            key_action,
            llm_response,
            config,
            format,
        } => {
            let config = match config {
                Some(path) => AuditConfig::from_file(&path)?,
                None => AuditConfig::default(),
            };
            let snapshot = snapshot.as_deref().and_then(load_snapshot);
            let context = BusinessContext::parse(&context);

            let mut pipeline = AuditPipeline::new(config);
            if let Some(path) = llm_response {
                info!("Replaying LLM response from {}", path.display());
                pipeline = pipeline.with_completer(FallbackCompleter::single(Box::new(
                    RecordedResponse { path },
                )));
            }

            let report = pipeline
                .run(snapshot.as_ref(), &url, &context, key_action.as_deref())
                .context("Audit failed")?;

            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&report)?),
                Format::Text => print!("{}", report.to_text()),
            }
        }
    }

    Ok(())
}
