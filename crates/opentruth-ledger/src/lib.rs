//! # opentruth-ledger
//!
//! Append-only JSON Lines proof ledger for OpenTruth agents.
//!
//! ## Overview
//!
//! `JsonlProofWriter` implements `ProofWriter` by appending one compact JSON
//! object per line to a file, creating the file and its directory on first
//! use. `read_history` is the consumer side: it tolerates a missing ledger
//! and reports the first line that is not a proof record.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use opentruth_ledger::{read_history, JsonlProofWriter};
//!
//! let writer = JsonlProofWriter::for_layout(&layout);
//! verify_self(&layout, &writer, &mut std::io::stdout())?;
//!
//! for record in read_history(writer.path())? {
//!     println!("{} {} {}", record.timestamp, record.action, record.status);
//! }
//! ```

pub mod history;
pub mod jsonl;

pub use history::{read_history, tail};
pub use jsonl::{encode_line, JsonlProofWriter};
