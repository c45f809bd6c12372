//! Building and persisting a single proof.

use std::io::Write;

use tracing::info;

use opentruth_contracts::{
    error::{OpenTruthError, OpenTruthResult},
    proof::{CheckResult, ProofRecord, ProofStatus},
};

use crate::traits::ProofWriter;

/// Record that `action` ran with `status`, then acknowledge it on `out`.
///
/// The record is stamped with the current UTC time and the agent identity
/// and handed to `writer` whole. Write failures propagate unchanged; the
/// acknowledgment is only printed once the writer has accepted the record.
pub fn log_proof(
    writer: &dyn ProofWriter,
    action: &str,
    status: ProofStatus,
    details: CheckResult,
    out: &mut dyn Write,
) -> OpenTruthResult<ProofRecord> {
    let record = ProofRecord::new(action, status, details)?;
    writer.write(&record)?;

    info!(action = %record.action, status = %record.status, "proof logged");

    writeln!(out, "Proof logged: {} -> {}", record.action, record.status).map_err(|e| {
        OpenTruthError::OutputFailed {
            reason: e.to_string(),
        }
    })?;

    Ok(record)
}
