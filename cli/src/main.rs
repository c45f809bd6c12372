//! OpenTruth CLI — Agent Edition
//!
//! The command-line entry point for an agent running in solo mode.
//!
//! Usage:
//!   opentruth verify "The sky is blue" --depth 2
//!   opentruth verify "The sky is blue" --bead
//!   opentruth scan ./suspicious_image.png
//!   opentruth cross-ref ./report_a.txt ./report_b.txt
//!   opentruth self-check
//!   opentruth history --limit 10
//!
//! Exit status: 0 on success, 1 when `self-check` finds the soul missing,
//! 2 on any error (unwritable ledger, bad layout file, ...).

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use opentruth_contracts::{
    claim::{Bead, ClaimReport, StubResponse},
    error::{OpenTruthError, OpenTruthResult},
};
use opentruth_core::{verify_self, AgentLayout};
use opentruth_ledger::{jsonl::encode_line, read_history, tail, JsonlProofWriter};

// ── CLI definition ────────────────────────────────────────────────────────────

/// OpenTruth — truth-seeking toolkit for autonomous agents.
#[derive(Parser)]
#[command(
    name = "opentruth",
    version,
    about = "OpenTruth Framework CLI - Agent Edition",
    long_about = "Verifies claims, scans files, cross-references sources, and lets\n\
                  an agent verify its own working tree against its expected layout."
)]
struct Cli {
    /// Agent root directory. Layout paths resolve against it.
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Layout file. Defaults to `opentruth.toml` in the root, if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Verify a claim or content piece.
    Verify {
        /// The text string or file path to verify.
        input: String,
        /// Search depth (1-5). Higher depth = more exhaustive checks.
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=5))]
        depth: u8,
        /// Output a single-line Bead envelope instead of the pretty report.
        #[arg(long)]
        bead: bool,
    },
    /// Scan a file for metadata inconsistencies.
    Scan {
        /// Path to the file to scan.
        file: PathBuf,
    },
    /// Cross-reference multiple sources.
    CrossRef {
        /// Paths or URLs to sources to compare.
        #[arg(required = true)]
        sources: Vec<String>,
    },
    /// Verify the agent's own layout and log a proof.
    SelfCheck,
    /// Print logged proofs, one JSON object per line.
    History {
        /// Only print the most recent N proofs.
        #[arg(long)]
        limit: Option<usize>,
    },
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    // Logs go to stderr so stdout stays machine-readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = run(cli, &mut io::stdout().lock());
    // process::exit skips destructors.
    let _ = io::stdout().flush();

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(2);
        }
    }
}

/// Dispatch one parsed command and return the process exit status.
fn run(cli: Cli, out: &mut dyn Write) -> OpenTruthResult<i32> {
    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(output_failed)?;
        return Ok(0);
    };

    match command {
        Command::Verify { input, depth, bead } => {
            debug!(input = %input, depth, bead, "verifying claim");
            emit(out, &render_verify(bead)?)?;
        }
        Command::Scan { file } => {
            debug!(file = %file.display(), "scan requested");
            emit(out, &compact(&StubResponse::scan())?)?;
        }
        Command::CrossRef { sources } => {
            debug!(count = sources.len(), "cross-reference requested");
            emit(out, &compact(&StubResponse::cross_ref())?)?;
        }
        Command::SelfCheck => {
            let layout = AgentLayout::load(&cli.root, cli.config.as_deref())?;
            let writer = JsonlProofWriter::for_layout(&layout);
            let outcome = verify_self(&layout, &writer, out)?;
            return Ok(outcome.exit_code());
        }
        Command::History { limit } => {
            let layout = AgentLayout::load(&cli.root, cli.config.as_deref())?;
            let mut records = read_history(&layout.proof_file())?;
            if let Some(limit) = limit {
                records = tail(records, limit);
            }
            for record in &records {
                out.write_all(encode_line(record)?.as_bytes())
                    .map_err(output_failed)?;
            }
        }
    }

    Ok(0)
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// The `verify` output: a 4-space pretty report, or a compact Bead line.
fn render_verify(bead: bool) -> OpenTruthResult<String> {
    let report = ClaimReport::simulated();
    if bead {
        compact(&Bead::seal(report)?)
    } else {
        pretty(&report)
    }
}

fn compact<T: Serialize>(value: &T) -> OpenTruthResult<String> {
    serde_json::to_string(value).map_err(serialization_failed)
}

fn pretty<T: Serialize>(value: &T) -> OpenTruthResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser).map_err(serialization_failed)?;
    String::from_utf8(buf).map_err(|e| OpenTruthError::Serialization {
        reason: e.to_string(),
    })
}

fn emit(out: &mut dyn Write, text: &str) -> OpenTruthResult<()> {
    writeln!(out, "{}", text).map_err(output_failed)
}

fn serialization_failed(e: serde_json::Error) -> OpenTruthError {
    OpenTruthError::Serialization {
        reason: e.to_string(),
    }
}

fn output_failed(e: io::Error) -> OpenTruthError {
    OpenTruthError::OutputFailed {
        reason: e.to_string(),
    }
}
