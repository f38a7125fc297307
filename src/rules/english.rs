//! Default English rule set.
//!
//! Maps English-ish text onto the clip vocabulary in [`clips`]: the 26
//! letters, a handful of two-letter units that have their own clip, and `_`
//! for a pause. The set is *total*: every position of every input matches
//! some rule, so [`get`] never produces an unmatched scan.
//!
//! Priorities form tiers, probed top to bottom:
//!
//! - pauses: runs of whitespace collapse into one `_`
//! - silent letters: `kn` and `wr` drop their leading consonant
//! - digraphs: `th sh ch ng ee oo` keep their own clip, `ph` says `f`
//! - doubled letters: `ll ss tt ff pp mm nn rr` say the letter once
//! - letters: each ASCII letter says its lowercase clip
//! - fallback: any other run of characters becomes one `_`
//!
//! ```
//! let rules = blipspeak::rules::english::get();
//! assert_eq!(
//!     rules.parse("the moon").unwrap(),
//!     vec!["th", "e", "_", "m", "oo", "n"],
//! );
//! ```

use crate::engine::{PatternOptions, Rule, RuleSet};

// Priority tiers, highest probed first.
const PAUSES: i32 = 30;
const SILENT: i32 = 20;
const DIGRAPHS: i32 = 10;
const DOUBLES: i32 = 5;
const LETTERS: i32 = 0;
const FALLBACK: i32 = -10;

/// Every clip name the rules can emit.
///
/// A sound bank covering these names can voice any output of [`get`].
pub fn clips() -> &'static [&'static str] {
    &[
        "a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k", "l", "m", "n", "o", "p", "q", "r",
        "s", "t", "u", "v", "w", "x", "y", "z", "th", "sh", "ch", "ng", "ee", "oo", "_",
    ]
}

/// Runs of whitespace collapse into a single pause.
fn rule_pause() -> Rule {
    pat_sub!(r"\s+", "_", PAUSES)
}

/// Silent leading consonants: "knot" starts with the "n" clip, "wrap" with
/// "r". Exact-case on purpose: a rewrite echoes the rest of its match
/// verbatim, and an uppercase echo would fall outside the clip vocabulary.
/// Uppercase input gets per-letter treatment instead.
fn rules_silent_letters() -> Vec<Rule> {
    vec![
        Rule::pattern_rewrite_with("(k)n", "", SILENT, PatternOptions::empty()).unwrap(),
        Rule::pattern_rewrite_with("(w)r", "", SILENT, PatternOptions::empty()).unwrap(),
    ]
}

/// Two-letter units with their own clips, any case, plus "ph" which borrows
/// the "f" clip.
fn rules_digraphs() -> Vec<Rule> {
    let mut rules: Vec<Rule> = ["th", "sh", "ch", "ng", "ee", "oo"]
        .into_iter()
        .map(|d| Rule::pattern_substitute(d, d, DIGRAPHS).unwrap())
        .collect();
    rules.push(pat_sub!("ph", "f", DIGRAPHS));
    rules
}

/// Doubled letters say their clip once.
fn rules_double_letters() -> Vec<Rule> {
    ["l", "s", "t", "f", "p", "m", "n", "r"]
        .into_iter()
        .map(|c| Rule::pattern_substitute(&format!("{c}{c}"), c, DOUBLES).unwrap())
        .collect()
}

/// One clip per ASCII letter. Lowercase letters pass through; uppercase
/// letters substitute down to the lowercase clip.
fn rules_letters() -> Vec<Rule> {
    let mut rules = Vec::with_capacity(52);
    for letter in 'a'..='z' {
        let lower = letter.to_string();
        rules.push(Rule::passthrough(lower.clone(), LETTERS));
        rules.push(Rule::substitute(letter.to_ascii_uppercase().to_string(), lower, LETTERS));
    }
    rules
}

/// Anything the other tiers do not cover becomes one pause per run.
/// Exact-case: case folding widens `a-z` to cover ſ and the Kelvin sign,
/// which would carve both out of this negated class and leave them
/// unmatched by every tier.
fn rule_fallback() -> Rule {
    Rule::pattern_substitute_with(r"[^a-zA-Z\s]+", "_", FALLBACK, PatternOptions::empty()).unwrap()
}

/// The assembled English rule set.
pub fn get() -> RuleSet {
    let mut rules = vec![rule_pause()];
    rules.extend(rules_silent_letters());
    rules.extend(rules_digraphs());
    rules.extend(rules_double_letters());
    rules.extend(rules_letters());
    rules.push(rule_fallback());
    rules.into_iter().collect()
}
