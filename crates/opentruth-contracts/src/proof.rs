//! Proof records and check results.
//!
//! A `ProofRecord` is one line of the proof ledger: an attestation that a
//! named check ran, when it ran, and what it found. `CheckResult` is the
//! per-check boolean mapping embedded in the record's `details` field.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    agent::AGENT_ID,
    error::{OpenTruthError, OpenTruthResult},
};

/// The outcome recorded for a check.
///
/// Serialized as the bare lowercase strings `"success"` and `"failure"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofStatus {
    Success,
    Failure,
}

impl ProofStatus {
    /// Map a boolean verdict onto a status.
    pub fn from_verdict(valid: bool) -> Self {
        if valid {
            Self::Success
        } else {
            Self::Failure
        }
    }

    pub fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Failure => "failure",
        }
    }
}

impl fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named boolean outcomes of one check run, e.g. `has_soul -> true`.
///
/// Keys are kept sorted so two runs over the same filesystem state produce
/// byte-identical `details` objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CheckResult(BTreeMap<String, bool>);

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one named check, replacing any earlier value.
    pub fn record(&mut self, name: impl Into<String>, present: bool) {
        self.0.insert(name.into(), present);
    }

    /// Return the outcome of `name`, or `None` if it was never evaluated.
    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, present)| (name.as_str(), *present))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, bool)> for CheckResult {
    fn from_iter<I: IntoIterator<Item = (N, bool)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(name, present)| (name.into(), present)).collect())
    }
}

/// One append-only ledger entry.
///
/// Field order is the on-disk order. Records carry no identifier beyond
/// their position in the ledger and their timestamp, and are never
/// modified once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProofRecord {
    /// Wall-clock time (UTC) the record was created.
    ///
    /// Serialized as RFC 3339 with an explicit `+00:00` offset at
    /// microsecond precision.
    #[serde(with = "offset_timestamp")]
    pub timestamp: DateTime<Utc>,

    /// Always `AGENT_ID` for records produced by this toolkit.
    pub agent: String,

    /// Name of the check that ran (e.g. `"verify_self"`).
    pub action: String,

    pub status: ProofStatus,

    /// Per-check outcomes.
    pub details: CheckResult,
}

impl ProofRecord {
    /// Build a record stamped with the current time and `AGENT_ID`.
    ///
    /// The timestamp is truncated to microseconds so that a record parsed
    /// back from the ledger compares equal to the one that was written.
    ///
    /// Returns `InvalidProof` if `action` is empty or only whitespace.
    pub fn new(
        action: impl Into<String>,
        status: ProofStatus,
        details: CheckResult,
    ) -> OpenTruthResult<Self> {
        let action = action.into();
        if action.trim().is_empty() {
            return Err(OpenTruthError::InvalidProof {
                reason: "action must not be empty".to_string(),
            });
        }

        Ok(Self {
            timestamp: Utc::now().trunc_subsecs(6),
            agent: AGENT_ID.to_string(),
            action,
            status,
            details,
        })
    }
}

mod offset_timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(D::Error::custom)
    }
}
