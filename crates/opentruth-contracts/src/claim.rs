//! Claim verification reports, Bead envelopes, and stub responses.
//!
//! These are the payloads the CLI prints for `verify`, `scan`, and
//! `cross-ref`. The verification values are simulated constants; nothing
//! here inspects the claim.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    error::{OpenTruthError, OpenTruthResult},
    proof::ProofStatus,
};

/// The `type` discriminant carried by every verification Bead.
pub const BEAD_KIND: &str = "verification_bead";

/// Result of verifying a claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimReport {
    pub status: ProofStatus,
    /// Simulated; always 0.88.
    pub truth_score: f64,
    pub findings: Vec<String>,
    /// Simulated; always 0.95.
    pub confidence: f64,
}

impl ClaimReport {
    /// The fixed report returned for every claim.
    pub fn simulated() -> Self {
        Self {
            status: ProofStatus::Success,
            truth_score: 0.88,
            findings: vec![
                "Source verified via 3 independent points".to_string(),
                "No AI-generation markers".to_string(),
            ],
            confidence: 0.95,
        }
    }
}

/// A `ClaimReport` wrapped for piping into a Bead-protocol logger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bead {
    #[serde(rename = "type")]
    pub kind: String,
    pub payload: ClaimReport,
    /// Lowercase hex SHA-256 of the compact JSON encoding of `payload`.
    pub integrity_hash: String,
}

impl Bead {
    /// Wrap `payload` and commit to it with `integrity_hash`.
    pub fn seal(payload: ClaimReport) -> OpenTruthResult<Self> {
        let integrity_hash = payload_hash(&payload)?;
        Ok(Self {
            kind: BEAD_KIND.to_string(),
            payload,
            integrity_hash,
        })
    }

    /// Recompute the payload hash and compare it to `integrity_hash`.
    pub fn is_intact(&self) -> bool {
        payload_hash(&self.payload)
            .map(|hash| hash == self.integrity_hash)
            .unwrap_or(false)
    }
}

fn payload_hash(payload: &ClaimReport) -> OpenTruthResult<String> {
    let bytes = serde_json::to_vec(payload).map_err(|e| OpenTruthError::Serialization {
        reason: format!("failed to encode bead payload: {}", e),
    })?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

/// Response printed by commands that have no implementation yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubResponse {
    /// Always `"not_implemented"`.
    pub status: String,
    pub message: String,
}

impl StubResponse {
    pub fn not_implemented(message: impl Into<String>) -> Self {
        Self {
            status: "not_implemented".to_string(),
            message: message.into(),
        }
    }

    pub fn scan() -> Self {
        Self::not_implemented("Scan logic coming soon.")
    }

    pub fn cross_ref() -> Self {
        Self::not_implemented("Cross-Ref logic coming soon.")
    }
}
