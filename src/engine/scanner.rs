//! The greedy, front-anchored scan loop.
//!
//! A [`Scanner`] walks one input string with one rule set. At each byte
//! offset it probes the rules in scan order (descending priority, ties by
//! insertion) and commits to the *first* match it finds: the match's output
//! is emitted and the offset advances by the match's consumed length. There
//! is no backtracking and no lookahead; a committed step is never revisited,
//! even when a different choice would have let the rest of the input match.
//!
//! Termination is immediate from the rule contract: every match consumes at
//! least one byte, so a scan performs at most `text.len()` steps.
//!
//! ## Debugging
//!
//! Setting `BLIPSPEAK_DEBUG_RULES=1` prints one trace line per committed
//! step. For a structured trace use [`RuleSet::parse_traced`].

use std::time::Instant;

use thiserror::Error;

use super::metrics::{RunResult, ScanMetrics, StepTrace};
use super::rule::{Rule, RuleMatch};
use super::ruleset::RuleSet;

// --- Errors --------------------------------------------------------------------

/// The single way a scan can fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScanError {
    /// No rule matched the input at `offset`.
    ///
    /// `remainder` is the full unconsumed suffix starting at `offset`; the
    /// `Display` form shortens it, the field does not.
    #[error("no rule matched at byte {offset}: {}", preview(.remainder))]
    Unmatched { offset: usize, remainder: String },
}

fn preview(remainder: &str) -> String {
    const MAX_CHARS: usize = 32;
    if remainder.chars().count() <= MAX_CHARS {
        format!("{remainder:?}")
    } else {
        let cut: String = remainder.chars().take(MAX_CHARS).collect();
        format!("{cut:?}..")
    }
}

// --- Scanner -------------------------------------------------------------------

/// Single-use scan driver. Construct, then call [`run`](Scanner::run) or
/// [`run_traced`](Scanner::run_traced) exactly once.
pub(crate) struct Scanner<'a> {
    rules: &'a RuleSet,
    text: &'a str,
    offset: usize,
}

impl<'a> Scanner<'a> {
    pub(crate) fn new(rules: &'a RuleSet, text: &'a str) -> Self {
        Scanner { rules, text, offset: 0 }
    }

    /// Probes the rules in scan order against the text at the current
    /// offset. Returns the winning rule, its match, and the number of rules
    /// probed (winner included), or `Unmatched` when every probe fails.
    fn next_match(&self) -> Result<(&'a Rule, RuleMatch, usize), ScanError> {
        let rest = &self.text[self.offset..];
        for (probed, rule) in self.rules.iter().enumerate() {
            if let Some(m) = rule.try_match(rest) {
                // A win must consume, or the scan would stall here forever.
                debug_assert!(m.consumed >= 1, "{rule} consumed nothing");
                debug_assert!(m.consumed <= rest.len(), "{rule} overran the input");
                return Ok((rule, m, probed + 1));
            }
        }
        Err(ScanError::Unmatched { offset: self.offset, remainder: rest.to_string() })
    }

    /// Runs the scan to the end of input and returns the emitted tokens.
    ///
    /// All-or-nothing: the first unmatched position fails the whole run and
    /// drops any tokens emitted before it.
    pub(crate) fn run(mut self) -> Result<Vec<String>, ScanError> {
        let debug = std::env::var_os("BLIPSPEAK_DEBUG_RULES").is_some();
        let mut tokens = Vec::new();

        while self.offset < self.text.len() {
            let (rule, m, _) = self.next_match()?;
            if debug {
                eprintln!(
                    "[scan] {}..{} {} => {:?}",
                    self.offset,
                    self.offset + m.consumed,
                    rule,
                    m.output
                );
            }
            self.offset += m.consumed;
            tokens.push(m.output);
        }

        Ok(tokens)
    }

    /// Runs the scan while recording every committed step.
    ///
    /// Unlike [`run`](Scanner::run) this never discards work: on failure the
    /// result carries the error *and* the tokens and steps that preceded it.
    pub(crate) fn run_traced(mut self) -> RunResult {
        let scan_start = Instant::now();
        let mut tokens = Vec::new();
        let mut steps = Vec::new();
        let mut probes_total = 0;
        let mut error = None;

        while self.offset < self.text.len() {
            match self.next_match() {
                Ok((rule, m, probes)) => {
                    probes_total += probes;
                    steps.push(StepTrace {
                        offset: self.offset,
                        consumed: m.consumed,
                        probes,
                        priority: rule.priority(),
                        rule: rule.to_string(),
                        output: m.output.clone(),
                    });
                    self.offset += m.consumed;
                    tokens.push(m.output);
                }
                Err(e) => {
                    // Every rule was probed at the failing position.
                    probes_total += self.rules.len();
                    error = Some(e);
                    break;
                }
            }
        }

        RunResult {
            tokens,
            error,
            steps,
            metrics: ScanMetrics { total: scan_start.elapsed(), probes: probes_total },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commits_greedily_even_when_it_dooms_the_rest() {
        // At offset 0 the high-priority literal does not apply, so the
        // pattern eats "aa" greedily. That strands the final "b": the
        // literal needed the second "a", but committed steps are never
        // revisited.
        let mut set = RuleSet::new();
        set.add(Rule::substitute("ab", "X", 1));
        set.add(Rule::pattern_passthrough("a+", 0).unwrap());

        match set.parse("aab") {
            Err(ScanError::Unmatched { offset, remainder }) => {
                assert_eq!(offset, 2);
                assert_eq!(remainder, "b");
            }
            other => panic!("expected unmatched at byte 2, got {other:?}"),
        }
    }

    #[test]
    fn rewrite_rule_tokenizes_repeating_input() {
        let mut set = RuleSet::new();
        set.add(Rule::pattern_rewrite("(x)yz", "Q", 0).unwrap());
        assert_eq!(set.parse("xyzxyz").unwrap(), vec!["Qyz", "Qyz"]);
    }

    #[test]
    fn higher_priority_wins_even_when_its_match_is_shorter() {
        let mut set = RuleSet::new();
        set.add(Rule::pattern_passthrough("a+", 0).unwrap());
        set.add(Rule::substitute("a", "one", 5));

        // The first match in scan order wins; the scan never compares
        // match lengths across rules.
        assert_eq!(set.parse("aaa").unwrap(), vec!["one", "one", "one"]);
    }

    #[test]
    fn empty_input_yields_no_tokens() {
        let mut set = RuleSet::new();
        set.add(Rule::passthrough("a", 0));
        assert_eq!(set.parse("").unwrap(), Vec::<String>::new());
        assert!(RuleSet::new().parse("").unwrap().is_empty());
    }

    #[test]
    fn empty_rule_set_fails_at_the_first_byte() {
        match RuleSet::new().parse("anything") {
            Err(ScanError::Unmatched { offset, remainder }) => {
                assert_eq!(offset, 0);
                assert_eq!(remainder, "anything");
            }
            other => panic!("expected unmatched at byte 0, got {other:?}"),
        }
    }

    #[test]
    fn offsets_are_byte_offsets_on_multibyte_input() {
        let mut set = RuleSet::new();
        set.add(Rule::substitute("é", "e", 0));

        // "é" is two bytes, so the failure lands at byte 4, not char 2.
        match set.parse("éé!") {
            Err(ScanError::Unmatched { offset, remainder }) => {
                assert_eq!(offset, 4);
                assert_eq!(remainder, "!");
            }
            other => panic!("expected unmatched at byte 4, got {other:?}"),
        }
    }

    #[test]
    fn step_count_never_exceeds_input_length() {
        let mut set = RuleSet::new();
        set.add(Rule::pattern_passthrough("[a-z]+", 1).unwrap());
        set.add(Rule::pattern_passthrough(".", 0).unwrap());

        for input in ["a", "abc", "a b c", "abc def ghi", "!?"] {
            let run = set.parse_traced(input);
            assert!(run.error.is_none(), "{input:?} should scan cleanly");
            assert!(run.steps.len() <= input.len());
            let consumed: usize = run.steps.iter().map(|s| s.consumed).sum();
            assert_eq!(consumed, input.len(), "steps must cover {input:?} exactly");
        }
    }

    #[test]
    fn traced_scan_keeps_tokens_matched_before_the_failure() {
        let mut set = RuleSet::new();
        set.add(Rule::substitute("ab", "X", 1));
        set.add(Rule::pattern_passthrough("a+", 0).unwrap());

        let run = set.parse_traced("aab");
        assert_eq!(run.tokens, vec!["aa"]);
        assert_eq!(run.steps.len(), 1);
        assert_eq!(run.steps[0].offset, 0);
        assert_eq!(run.steps[0].consumed, 2);
        assert_eq!(run.steps[0].priority, 0);
        match run.error {
            Some(ScanError::Unmatched { offset: 2, ref remainder }) => {
                assert_eq!(remainder, "b")
            }
            ref other => panic!("expected unmatched at byte 2, got {other:?}"),
        }
    }

    #[test]
    fn probe_counts_include_the_winner() {
        let mut set = RuleSet::new();
        set.add(Rule::substitute("z", "Z", 10));
        set.add(Rule::substitute("b", "B", 5));
        set.add(Rule::substitute("a", "A", 0));

        let run = set.parse_traced("ab");
        assert!(run.error.is_none());
        assert_eq!(run.steps[0].probes, 3, "\"a\" is third in scan order");
        assert_eq!(run.steps[1].probes, 2, "\"b\" is second in scan order");
        assert_eq!(run.metrics.probes, 5);
    }

    #[test]
    fn unmatched_display_shortens_long_remainders() {
        let long = "?".repeat(100);
        let err = RuleSet::new().parse(&long).unwrap_err();

        let shown = err.to_string();
        assert!(shown.starts_with("no rule matched at byte 0"), "got {shown:?}");
        assert!(shown.len() < long.len(), "display must not dump the whole remainder");

        let ScanError::Unmatched { remainder, .. } = err;
        assert_eq!(remainder.len(), 100, "the field itself keeps everything");
    }
}
