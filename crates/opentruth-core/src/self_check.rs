//! The self-verification routine.
//!
//! `verify_self` runs the agent's introspection in a fixed order:
//!
//!   Probe primary → Probe advisories → Verdict → Report → Log proof
//!
//! Probing is read-only. The verdict depends on the primary resource alone;
//! advisory resources are recorded in the proof's `details` but a missing
//! one only means the agent is freshly initialized. The single mutation is
//! the appended proof.

use std::io::Write;

use tracing::{debug, warn};

use opentruth_contracts::{
    agent::VERIFY_SELF_ACTION,
    error::{OpenTruthError, OpenTruthResult},
    proof::{CheckResult, ProofRecord, ProofStatus},
};

use crate::{layout::AgentLayout, logger::log_proof, traits::ProofWriter};

/// What one self-check run found and recorded.
#[derive(Debug, Clone)]
pub struct SelfCheckOutcome {
    /// True when the primary resource is present.
    pub verdict: bool,
    /// Every evaluated check, primary included.
    pub checks: CheckResult,
    /// The proof appended for this run.
    pub record: ProofRecord,
}

impl SelfCheckOutcome {
    /// Process exit status for a standalone invocation: 0 on success, 1 on
    /// failure.
    pub fn exit_code(&self) -> i32 {
        if self.verdict {
            0
        } else {
            1
        }
    }
}

/// Probe every resource in `layout` without side effects.
///
/// Returns the verdict and the per-check mapping.
pub fn evaluate(layout: &AgentLayout) -> (bool, CheckResult) {
    let mut checks = CheckResult::new();

    let primary = layout.primary();
    let verdict = primary.presence.probe(&layout.resolve(&primary.path));
    checks.record(primary.name.clone(), verdict);

    for resource in layout.advisory() {
        let present = resource.presence.probe(&layout.resolve(&resource.path));
        if !present {
            debug!(check = %resource.name, path = %resource.path.display(), "advisory resource absent");
        }
        checks.record(resource.name.clone(), present);
    }

    (verdict, checks)
}

/// Run the self-check against `layout`, log one proof to `writer`, and
/// report progress on `out`.
///
/// # Errors
///
/// A missing resource is a `Failure` verdict, not an error. Errors come only
/// from the proof write (`ProofWriteFailed`) or from writing to `out`
/// (`OutputFailed`).
pub fn verify_self(
    layout: &AgentLayout,
    writer: &dyn ProofWriter,
    out: &mut dyn Write,
) -> OpenTruthResult<SelfCheckOutcome> {
    say(out, "Verifying self...")?;

    let (verdict, checks) = evaluate(layout);

    if verdict {
        say(out, "Soul found. I know who I am.")?;
    } else {
        warn!(
            check = %layout.primary().name,
            path = %layout.primary().path.display(),
            "primary resource missing"
        );
        say(
            out,
            &format!(
                "Soul missing! I am lost. ({} not found)",
                layout.resolve(&layout.primary().path).display()
            ),
        )?;
    }

    let status = ProofStatus::from_verdict(verdict);
    let record = log_proof(writer, VERIFY_SELF_ACTION, status, checks.clone(), out)?;

    Ok(SelfCheckOutcome {
        verdict,
        checks,
        record,
    })
}

fn say(out: &mut dyn Write, line: &str) -> OpenTruthResult<()> {
    writeln!(out, "{}", line).map_err(|e| OpenTruthError::OutputFailed {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use opentruth_contracts::agent::AGENT_ID;

    use super::*;

    // ── Mock helpers ─────────────────────────────────────────────────────────

    /// A writer that records every call for later inspection.
    #[derive(Clone)]
    struct MockWriter {
        records: Arc<Mutex<Vec<ProofRecord>>>,
    }

    impl MockWriter {
        fn new() -> Self {
            Self {
                records: Arc::new(Mutex::new(vec![])),
            }
        }

        fn count(&self) -> usize {
            self.records.lock().unwrap().len()
        }
    }

    impl ProofWriter for MockWriter {
        fn write(&self, record: &ProofRecord) -> OpenTruthResult<()> {
            self.records.lock().unwrap().push(record.clone());
            Ok(())
        }
    }

    struct FailingWriter;

    impl ProofWriter for FailingWriter {
        fn write(&self, _record: &ProofRecord) -> OpenTruthResult<()> {
            Err(OpenTruthError::ProofWriteFailed {
                path: "history/proofs/self_verification.jsonl".to_string(),
                reason: "permission denied".to_string(),
            })
        }
    }

    /// Build an agent tree under `root` with the requested resources.
    fn seed(root: &Path, soul: bool, truth: bool, proofs: bool) {
        if soul {
            fs::write(root.join("SOUL.md"), "# Soul\n").unwrap();
        }
        if truth {
            fs::create_dir_all(root.join(".truth")).unwrap();
        }
        if proofs {
            fs::create_dir_all(root.join("history/proofs")).unwrap();
        }
    }

    fn run(root: &Path, writer: &MockWriter) -> (SelfCheckOutcome, String) {
        let layout = AgentLayout::new(root);
        let mut out = Vec::new();
        let outcome = verify_self(&layout, writer, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    // ── Verdict ──────────────────────────────────────────────────────────────

    #[test]
    fn verdict_follows_primary_regardless_of_advisories() {
        for soul in [true, false] {
            for truth in [true, false] {
                for proofs in [true, false] {
                    let dir = tempfile::tempdir().unwrap();
                    seed(dir.path(), soul, truth, proofs);

                    let writer = MockWriter::new();
                    let (outcome, _) = run(dir.path(), &writer);

                    assert_eq!(
                        outcome.verdict, soul,
                        "soul={} truth={} proofs={}",
                        soul, truth, proofs
                    );
                    assert_eq!(outcome.checks.get("has_truth_dir"), Some(truth));
                    assert_eq!(outcome.checks.get("has_proofs_dir"), Some(proofs));
                    assert_eq!(outcome.record.status, ProofStatus::from_verdict(soul));
                }
            }
        }
    }

    #[test]
    fn soul_present_fresh_install() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), true, false, false);

        let writer = MockWriter::new();
        let (outcome, console) = run(dir.path(), &writer);

        assert!(outcome.verdict);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(outcome.record.details.get("has_soul"), Some(true));
        assert_eq!(outcome.record.details.get("has_truth_dir"), Some(false));
        assert_eq!(outcome.record.details.get("has_proofs_dir"), Some(false));
        assert_eq!(
            console,
            "Verifying self...\n\
             Soul found. I know who I am.\n\
             Proof logged: verify_self -> success\n"
        );
    }

    #[test]
    fn soul_missing_still_logs_failure() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), false, true, true);

        let writer = MockWriter::new();
        let (outcome, console) = run(dir.path(), &writer);

        assert!(!outcome.verdict);
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(writer.count(), 1, "a failed check must still be recorded");
        assert_eq!(outcome.record.status, ProofStatus::Failure);
        assert_eq!(outcome.record.action, VERIFY_SELF_ACTION);
        assert_eq!(outcome.record.agent, AGENT_ID);
        let expected = format!(
            "Soul missing! I am lost. ({} not found)",
            dir.path().join("SOUL.md").display()
        );
        assert!(console.contains(&expected), "console: {}", console);
        assert!(console.ends_with("Proof logged: verify_self -> failure\n"));
    }

    #[test]
    fn soul_directory_counts_as_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("SOUL.md")).unwrap();

        let writer = MockWriter::new();
        let (outcome, _) = run(dir.path(), &writer);
        assert!(outcome.verdict);
    }

    // ── Idempotence ──────────────────────────────────────────────────────────

    #[test]
    fn repeated_runs_produce_identical_details() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), true, true, false);

        let writer = MockWriter::new();
        let (first, _) = run(dir.path(), &writer);
        let (second, _) = run(dir.path(), &writer);

        assert_eq!(first.verdict, second.verdict);
        assert_eq!(first.record.details, second.record.details);
        assert_eq!(writer.count(), 2, "every run appends exactly one proof");
    }

    #[test]
    fn evaluate_does_not_touch_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AgentLayout::new(dir.path());

        let (verdict, checks) = evaluate(&layout);

        assert!(!verdict);
        assert_eq!(checks.len(), 3);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    // ── Configured layouts ───────────────────────────────────────────────────

    #[test]
    fn configured_checks_land_in_details() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("AGENT.md"), "agent").unwrap();
        fs::create_dir(dir.path().join("goals")).unwrap();

        let layout = AgentLayout::from_toml_str(
            dir.path(),
            r#"
            [primary]
            name = "has_instructions"
            path = "AGENT.md"
            presence = "file"

            [[advisory]]
            name = "has_goals"
            path = "goals"
            presence = "directory"
            "#,
        )
        .unwrap();

        let writer = MockWriter::new();
        let mut out = Vec::new();
        let outcome = verify_self(&layout, &writer, &mut out).unwrap();

        assert!(outcome.verdict);
        let names: Vec<&str> = outcome.checks.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["has_goals", "has_instructions"]);
    }

    // ── Errors ───────────────────────────────────────────────────────────────

    #[test]
    fn write_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path(), true, false, false);

        let layout = AgentLayout::new(dir.path());
        let mut out = Vec::new();
        let err = verify_self(&layout, &FailingWriter, &mut out).unwrap_err();

        assert!(matches!(err, OpenTruthError::ProofWriteFailed { .. }));
    }
}
