//! Priority-ordered rule collections.
//!
//! A [`RuleSet`] owns rules in *scan order*: descending priority, with rules
//! of equal priority kept in the order they were added. Scan order is the
//! whole contract; given the same additions in the same order, a rule set
//! tokenizes the same input to the same tokens, every time.

use super::metrics::RunResult;
use super::rule::Rule;
use super::scanner::{ScanError, Scanner};

// --- Rule sets -----------------------------------------------------------------

/// An ordered collection of [`Rule`]s plus the scan entry points.
///
/// ```
/// use blipspeak::engine::{Rule, RuleSet};
///
/// let mut set = RuleSet::new();
/// set.add(Rule::substitute("th", "th", 10));
/// set.add(Rule::pattern_passthrough("[a-z]", 0).unwrap());
///
/// assert_eq!(set.parse("this").unwrap(), vec!["th", "i", "s"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct RuleSet {
    /// Kept sorted by descending priority; equal priorities keep insertion
    /// order, so earlier additions win ties.
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Creates an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates an empty rule set with room for `capacity` rules.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { rules: Vec::with_capacity(capacity) }
    }

    /// Adds a rule, keeping the set in scan order.
    ///
    /// The new rule lands *after* every rule with priority greater than or
    /// equal to its own. That makes tie-breaking deterministic: among rules
    /// of equal priority, the one added first is probed first.
    pub fn add(&mut self, rule: Rule) -> &mut Self {
        let at = self.rules.partition_point(|r| r.priority() >= rule.priority());
        self.rules.insert(at, rule);
        self
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The rules in scan order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Iterates the rules in scan order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    // --- Scanning --------------------------------------------------------------

    /// Tokenizes `text` into phonetic units.
    ///
    /// The scan walks the input front to back. At each position the rules
    /// are probed in scan order and the first match wins: its output is
    /// appended to the token list and the scan advances by exactly the bytes
    /// the rule consumed. Every win consumes at least one byte, so the scan
    /// always terminates.
    ///
    /// The scan is all-or-nothing: a position no rule matches fails the
    /// whole call with [`ScanError::Unmatched`], and any tokens matched
    /// before that point are dropped. An empty input yields an empty token
    /// list, whatever the rules.
    pub fn parse(&self, text: &str) -> Result<Vec<String>, ScanError> {
        Scanner::new(self, text).run()
    }

    /// Tokenizes `text` and joins the units into one string.
    ///
    /// Exactly the tokens of [`parse`](Self::parse), concatenated in order
    /// with no separator.
    pub fn parse_to_string(&self, text: &str) -> Result<String, ScanError> {
        self.parse(text).map(|tokens| tokens.concat())
    }

    /// Tokenizes `text`, recording a step-by-step trace.
    ///
    /// Same matching semantics as [`parse`](Self::parse), but every step is
    /// recorded and a failed scan still reports the tokens matched before
    /// the failing offset. Meant for debugging rule sets, not for the hot
    /// path.
    pub fn parse_traced(&self, text: &str) -> RunResult {
        Scanner::new(self, text).run_traced()
    }
}

impl FromIterator<Rule> for RuleSet {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<Rule> for RuleSet {
    fn extend<I: IntoIterator<Item = Rule>>(&mut self, iter: I) {
        for rule in iter {
            self.add(rule);
        }
    }
}

impl<'a> IntoIterator for &'a RuleSet {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}

impl IntoIterator for RuleSet {
    type Item = Rule;
    type IntoIter = std::vec::IntoIter<Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(set: &RuleSet) -> Vec<String> {
        set.iter().map(|r| r.to_string()).collect()
    }

    #[test]
    fn orders_by_descending_priority() {
        let mut set = RuleSet::new();
        set.add(Rule::passthrough("a", 0));
        set.add(Rule::passthrough("b", 10));
        set.add(Rule::passthrough("c", 5));
        set.add(Rule::passthrough("d", -3));

        let priorities: Vec<i32> = set.iter().map(|r| r.priority()).collect();
        assert_eq!(priorities, vec![10, 5, 0, -3]);
    }

    #[test]
    fn equal_priorities_keep_insertion_order() {
        let mut set = RuleSet::new();
        set.add(Rule::substitute("a", "first", 3));
        set.add(Rule::substitute("a", "second", 3));
        set.add(Rule::substitute("a", "third", 3));

        assert_eq!(
            labels(&set),
            vec![
                r#"substitute("a" -> "first")"#,
                r#"substitute("a" -> "second")"#,
                r#"substitute("a" -> "third")"#,
            ]
        );
        // The winner of the tie is the rule added first.
        assert_eq!(set.parse("a").unwrap(), vec!["first"]);
    }

    #[test]
    fn ties_break_per_tier_even_when_additions_interleave() {
        let mut set = RuleSet::new();
        set.add(Rule::substitute("a", "low-early", 0));
        set.add(Rule::substitute("a", "high", 9));
        set.add(Rule::substitute("a", "low-late", 0));

        assert_eq!(
            labels(&set),
            vec![
                r#"substitute("a" -> "high")"#,
                r#"substitute("a" -> "low-early")"#,
                r#"substitute("a" -> "low-late")"#,
            ]
        );
    }

    #[test]
    fn higher_priority_wins_regardless_of_addition_order() {
        let mut late_high = RuleSet::new();
        late_high.add(Rule::substitute("a", "low", 0));
        late_high.add(Rule::substitute("a", "high", 5));

        let mut early_high = RuleSet::new();
        early_high.add(Rule::substitute("a", "high", 5));
        early_high.add(Rule::substitute("a", "low", 0));

        assert_eq!(late_high.parse("a").unwrap(), vec!["high"]);
        assert_eq!(early_high.parse("a").unwrap(), vec!["high"]);
    }

    #[test]
    fn parse_to_string_concatenates_parse_tokens() {
        let mut set = RuleSet::new();
        set.add(Rule::substitute("sh", "sh", 10));
        set.add(Rule::pattern_passthrough("[a-z]", 0).unwrap());

        assert_eq!(set.parse("ship").unwrap(), vec!["sh", "i", "p"]);
        assert_eq!(set.parse_to_string("ship").unwrap(), "ship");

        let mut renaming = RuleSet::new();
        renaming.add(Rule::substitute("a", "AL", 0));
        renaming.add(Rule::substitute("b", "BE", 0));
        assert_eq!(renaming.parse_to_string("abba").unwrap(), "ALBEBEAL");
    }

    #[test]
    fn passthrough_only_set_is_idempotent() {
        let mut set = RuleSet::new();
        set.add(Rule::pattern_passthrough("[a-z]+", 5).unwrap());
        set.add(Rule::passthrough(" ", 0));

        let input = "plain old text";
        let once = set.parse_to_string(input).unwrap();
        assert_eq!(once, input);
        assert_eq!(set.parse_to_string(&once).unwrap(), once);
    }

    #[test]
    fn collects_from_iterator_in_scan_order() {
        let set: RuleSet = vec![
            Rule::substitute("a", "low", 0),
            Rule::substitute("a", "high", 7),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
        assert_eq!(set.parse("a").unwrap(), vec!["high"]);
    }

    #[test]
    fn empty_set_reports_empty() {
        let set = RuleSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.iter().count(), 0);
    }
}
