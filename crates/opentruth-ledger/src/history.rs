//! Reading the proof ledger back.
//!
//! Consumers see whole lines only. A ledger that does not exist yet is an
//! empty history, not an error.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use opentruth_contracts::{
    error::{OpenTruthError, OpenTruthResult},
    proof::ProofRecord,
};

/// Read every proof in `path`, oldest first.
///
/// Blank lines are skipped. The first line that is not a proof record stops
/// the read with `MalformedProof` carrying its 1-based line number.
pub fn read_history(path: &Path) -> OpenTruthResult<Vec<ProofRecord>> {
    let read_failed = |e: io::Error| OpenTruthError::ProofReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no ledger yet, history is empty");
            return Ok(Vec::new());
        }
        Err(e) => return Err(read_failed(e)),
    };

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).split(b'\n').enumerate() {
        let line = line.map_err(read_failed)?;
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        // Bytes, not `String`: invalid UTF-8 is a bad line, not an I/O failure.
        let record: ProofRecord =
            serde_json::from_slice(&line).map_err(|e| OpenTruthError::MalformedProof {
                line: idx + 1,
                reason: e.to_string(),
            })?;
        records.push(record);
    }

    debug!(path = %path.display(), count = records.len(), "ledger read");
    Ok(records)
}

/// Keep only the last `limit` records.
pub fn tail(mut records: Vec<ProofRecord>, limit: usize) -> Vec<ProofRecord> {
    let skip = records.len().saturating_sub(limit);
    records.drain(..skip);
    records
}
