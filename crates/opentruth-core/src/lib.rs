//! # opentruth-core
//!
//! The self-verification routine and proof logging for OpenTruth agents.
//!
//! This crate provides:
//! - The `ProofWriter` trait, the seam between the routine and the ledger
//! - `AgentLayout`, the TOML-configurable set of resources the agent expects
//! - `verify_self`, which probes the layout, logs one proof, and returns the
//!   verdict
//!
//! ## Usage
//!
//! ```rust,ignore
//! use opentruth_core::{verify_self, AgentLayout};
//! use opentruth_ledger::JsonlProofWriter;
//!
//! let layout = AgentLayout::load(Path::new("."), None)?;
//! let writer = JsonlProofWriter::for_layout(&layout);
//! let outcome = verify_self(&layout, &writer, &mut std::io::stdout())?;
//! std::process::exit(if outcome.verdict { 0 } else { 1 });
//! ```

pub mod layout;
pub mod logger;
pub mod self_check;
pub mod traits;

pub use layout::{AgentLayout, Presence, Resource};
pub use logger::log_proof;
pub use self_check::{evaluate, verify_self, SelfCheckOutcome};
