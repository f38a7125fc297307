use std::time::Duration;

use once_cell::sync::Lazy;

use crate::engine::{RuleSet, ScanError, StepTrace};
use crate::rules;

static DEFAULT_RULES: Lazy<RuleSet> = Lazy::new(rules::english::get);

/// A compact per-step trace, one per emitted token.
///
/// Long outputs are truncated for display; the full token text is in
/// [`ParseReport::tokens`].
#[derive(Debug, Clone)]
pub struct StepSummary {
    /// Byte offset the step started at.
    pub offset: usize,
    /// Bytes consumed by the winning rule.
    pub consumed: usize,
    /// Priority of the winning rule.
    pub priority: i32,
    /// Display label of the winning rule.
    pub rule: String,
    /// Output token (possibly truncated).
    pub output: String,
}

/// Result from [`parse_verbose`] and [`parse_verbose_with`].
///
/// Unlike the plain [`parse`] path, a failed verbose parse still carries
/// everything matched before the failure, which is what makes it useful for
/// finding the piece of input no rule covers.
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// The parsed input text.
    pub text: String,
    /// Tokens emitted up to the end of input, or up to the failure point.
    pub tokens: Vec<String>,
    /// The failure, if the scan did not reach the end of input.
    pub error: Option<ScanError>,
    /// Total elapsed time spent scanning.
    pub elapsed: Duration,
    /// Total rule probes across the scan, failed probes included.
    pub probes: usize,
    /// One summary per emitted token.
    pub steps: Vec<StepSummary>,
}

/// Tokenize `text` into phonetic units using the default English rules.
///
/// The default rules are total, so this only fails for custom rule sets;
/// still, the `Result` is part of the contract and custom sets reach the
/// same scanner through [`RuleSet::parse`].
///
/// # Example
/// ```
/// use blipspeak::parse;
///
/// assert_eq!(parse("hello").unwrap(), vec!["h", "e", "l", "o"]);
/// assert_eq!(parse("the moon").unwrap(), vec!["th", "e", "_", "m", "oo", "n"]);
/// ```
pub fn parse(text: &str) -> Result<Vec<String>, ScanError> {
    DEFAULT_RULES.parse(text)
}

/// Tokenize `text` with the default English rules and join the units into
/// one string.
///
/// # Example
/// ```
/// use blipspeak::parse_to_string;
///
/// assert_eq!(parse_to_string("the moon").unwrap(), "the_moon");
/// ```
pub fn parse_to_string(text: &str) -> Result<String, ScanError> {
    DEFAULT_RULES.parse_to_string(text)
}

/// The default English rule set, compiled once on first use.
pub fn default_rules() -> &'static RuleSet {
    &DEFAULT_RULES
}

/// Tokenize `text` with the default rules and return a step-by-step report.
pub fn parse_verbose(text: &str) -> ParseReport {
    parse_verbose_with(text, &DEFAULT_RULES)
}

/// Tokenize `text` with `rules` and return a step-by-step report.
///
/// This is useful for profiling and rule debugging. The plain [`parse`]
/// path does not allocate these extra traces.
pub fn parse_verbose_with(text: &str, rules: &RuleSet) -> ParseReport {
    let run = rules.parse_traced(text);

    ParseReport {
        text: text.to_string(),
        steps: run.steps.iter().map(step_to_summary).collect(),
        tokens: run.tokens,
        error: run.error,
        elapsed: run.metrics.total,
        probes: run.metrics.probes,
    }
}

fn step_to_summary(step: &StepTrace) -> StepSummary {
    StepSummary {
        offset: step.offset,
        consumed: step.consumed,
        priority: step.priority,
        rule: step.rule.clone(),
        output: step.output.chars().take(80).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Rule;

    #[test]
    fn parse_matches_the_default_rule_set() {
        assert_eq!(parse("hello").unwrap(), default_rules().parse("hello").unwrap());
        assert_eq!(parse("hello").unwrap(), vec!["h", "e", "l", "o"]);
    }

    #[test]
    fn parse_to_string_is_the_concatenation() {
        let text = "see the ship";
        let joined: String = parse(text).unwrap().concat();
        assert_eq!(parse_to_string(text).unwrap(), joined);
        assert_eq!(joined, "see_the_ship");
    }

    #[test]
    fn parse_verbose_reports_steps_and_totals() {
        let report = parse_verbose("hi there");

        assert_eq!(report.text, "hi there");
        assert!(report.error.is_none());
        assert_eq!(report.tokens.len(), report.steps.len());
        assert!(report.elapsed >= Duration::ZERO);
        assert!(report.probes >= report.steps.len(), "each step probes at least once");

        let offsets: Vec<usize> = report.steps.iter().map(|s| s.offset).collect();
        let mut sorted = offsets.clone();
        sorted.sort_unstable();
        assert_eq!(offsets, sorted, "steps come in input order");
    }

    #[test]
    fn parse_verbose_keeps_the_prefix_on_failure() {
        let mut set = RuleSet::new();
        set.add(Rule::passthrough("a", 0));

        let report = parse_verbose_with("ab", &set);
        assert_eq!(report.tokens, vec!["a"]);
        match report.error {
            Some(ScanError::Unmatched { offset: 1, ref remainder }) => {
                assert_eq!(remainder, "b")
            }
            ref other => panic!("expected unmatched at byte 1, got {other:?}"),
        }
    }

    #[test]
    fn step_summaries_truncate_long_outputs() {
        let mut set = RuleSet::new();
        set.add(Rule::pattern_passthrough("x+", 0).unwrap());

        let long = "x".repeat(200);
        let report = parse_verbose_with(&long, &set);
        assert_eq!(report.tokens[0].len(), 200, "tokens keep the full text");
        assert_eq!(report.steps[0].output.len(), 80);
    }
}
