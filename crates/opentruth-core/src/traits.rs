//! Trait definitions at the persistence boundary.

use opentruth_contracts::{error::OpenTruthResult, proof::ProofRecord};

/// A sink for proof records.
///
/// Implementations must treat `write` as append-only: records are never
/// modified or deleted once accepted, and a failed write must not leave a
/// partial record behind.
pub trait ProofWriter: Send + Sync {
    /// Append one record.
    fn write(&self, record: &ProofRecord) -> OpenTruthResult<()>;
}
