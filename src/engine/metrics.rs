//! Scan run traces.
//!
//! This module defines the structs returned by the traced scan path. The
//! intended usage is:
//!
//! - `RuleSet::parse` / `RuleSet::parse_to_string` for normal operation.
//! - `RuleSet::parse_traced` for debugging rule sets and inspecting what each
//!   step consumed and produced.
//!
//! Traces are intentionally opt-in: the plain parse path allocates nothing
//! beyond the output tokens, while the traced path records one [`StepTrace`]
//! per emitted token plus coarse totals.

use std::time::Duration;

use super::scanner::ScanError;

// --- Traces -------------------------------------------------------------------

/// One scanner step: a single winning rule application.
#[derive(Debug, Clone)]
pub struct StepTrace {
    /// Byte offset the step started at.
    pub offset: usize,
    /// Bytes consumed by the winning rule.
    pub consumed: usize,
    /// How many rules were probed at this offset, the winner included.
    pub probes: usize,
    /// Priority of the winning rule.
    pub priority: i32,
    /// Display label of the winning rule.
    pub rule: String,
    /// Output token the step emitted.
    pub output: String,
}

/// Coarse totals for a traced scan.
#[derive(Debug, Default, Clone)]
pub struct ScanMetrics {
    /// Total elapsed time for the scan.
    pub total: Duration,
    /// Total rule probes across all steps, failed probes included.
    pub probes: usize,
}

/// Output of a traced scan.
///
/// Unlike the plain parse path, a failed traced scan still exposes the
/// tokens matched before the failing offset, which is what makes it useful
/// for diagnosing which piece of input has no rule.
#[derive(Debug, Clone)]
pub struct RunResult {
    /// Tokens emitted up to the end of input, or up to the failure point.
    pub tokens: Vec<String>,
    /// The failure, if the scan did not reach the end of input.
    pub error: Option<ScanError>,
    /// One entry per emitted token.
    pub steps: Vec<StepTrace>,
    /// Timing and probe totals.
    pub metrics: ScanMetrics,
}
