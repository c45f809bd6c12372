//! File-backed implementation of `ProofWriter`.
//!
//! Each record becomes exactly one line: compact JSON followed by `\n`. The
//! line is assembled in memory and handed to the OS in a single `write_all`
//! on a descriptor opened in append mode, so a failed write never leaves a
//! record split across calls. There is no file locking; the ledger assumes
//! one writing process per agent.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use opentruth_contracts::{
    error::{OpenTruthError, OpenTruthResult},
    proof::ProofRecord,
};
use opentruth_core::{layout::AgentLayout, traits::ProofWriter};

/// An append-only JSON Lines proof writer.
#[derive(Debug, Clone)]
pub struct JsonlProofWriter {
    path: PathBuf,
}

impl JsonlProofWriter {
    /// Write proofs to the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Write proofs to the ledger file configured in `layout`.
    pub fn for_layout(layout: &AgentLayout) -> Self {
        Self::new(layout.proof_file())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_failed(&self, reason: String) -> OpenTruthError {
        OpenTruthError::ProofWriteFailed {
            path: self.path.display().to_string(),
            reason,
        }
    }
}

/// Encode `record` as one newline-terminated ledger line.
pub fn encode_line(record: &ProofRecord) -> OpenTruthResult<String> {
    let mut line = serde_json::to_string(record).map_err(|e| OpenTruthError::Serialization {
        reason: format!("failed to encode proof record: {}", e),
    })?;
    line.push('\n');
    Ok(line)
}

impl ProofWriter for JsonlProofWriter {
    /// Append `record` to the ledger.
    ///
    /// Creates the containing directory (and any missing ancestors) first;
    /// an existing directory is left as is.
    fn write(&self, record: &ProofRecord) -> OpenTruthResult<()> {
        let line = encode_line(record)?;

        if let Some(dir) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| {
                self.write_failed(format!("cannot create '{}': {}", dir.display(), e))
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| self.write_failed(e.to_string()))?;

        file.write_all(line.as_bytes())
            .map_err(|e| self.write_failed(e.to_string()))?;

        debug!(path = %self.path.display(), bytes = line.len(), "proof line appended");
        info!(
            action = %record.action,
            status = %record.status,
            path = %self.path.display(),
            "proof persisted"
        );

        Ok(())
    }
}
