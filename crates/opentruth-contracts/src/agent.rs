//! Agent identity.

/// The identity stamped into every proof record this deployment writes.
///
/// Process-wide and fixed: it is never read from the environment or from
/// configuration.
pub const AGENT_ID: &str = "OpenTruth-Agent";

/// The action name recorded for a self-verification run.
pub const VERIFY_SELF_ACTION: &str = "verify_self";
