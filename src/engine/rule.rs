//! Rule variants and matching.
//!
//! A [`Rule`] pairs a pattern with a production: it can test whether it
//! applies to the *front* of a string, and on success report how many bytes
//! it consumes and which output token it produces. Five variants share that
//! contract:
//!
//! - `passthrough`: literal prefix, echoed unchanged.
//! - `substitute`: literal prefix, fixed replacement output.
//! - `pattern_passthrough`: anchored regex, matched text echoed.
//! - `pattern_substitute`: anchored regex, fixed replacement output.
//! - `pattern_rewrite`: anchored regex with one capture group; the group's
//!   text is replaced inside the full match and the rewritten match is the
//!   output.
//!
//! Rules are immutable once constructed, and matching never mutates anything,
//! so a rule (or a whole rule set) can be probed from multiple threads at
//! once.
//!
//! ## Invariants
//!
//! - A match is only defined at the start of the probed text and always
//!   consumes at least one byte. Zero-width regex matches are treated as
//!   no-match, and literal keys must be non-empty (checked in debug builds).
//!   The scanner's termination argument rests entirely on this.
//! - `consumed` never exceeds the probed text's length and always lands on a
//!   UTF-8 character boundary.
//! - `matches` agrees with `try_match` by construction: it is the same probe
//!   with the result discarded.

use std::fmt;

use regex::{Regex, RegexBuilder};
use thiserror::Error;

// --- Match results and errors ------------------------------------------------

/// A successful rule application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch {
    /// Number of input bytes the rule consumed. Always at least 1.
    pub consumed: usize,
    /// Output token text produced by the rule.
    pub output: String,
}

/// Errors raised while *constructing* a rule.
///
/// Matching itself has no error type: a rule that does not apply simply
/// yields `None` from [`Rule::try_match`].
#[derive(Debug, Error)]
pub enum RuleError {
    /// The pattern string failed to compile.
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    /// A rewrite pattern must declare exactly one capture group.
    #[error("rewrite pattern must declare exactly one capture group, found {found}")]
    RewriteGroupCount { found: usize },
}

// --- Pattern compilation options ----------------------------------------------

bitflags::bitflags! {
    /// Regex compilation options for the pattern-based rule variants.
    ///
    /// The default is case-insensitive matching; pass
    /// [`PatternOptions::empty()`] for an exact-case pattern.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatternOptions: u32 {
        const CASE_INSENSITIVE    = 1 << 0;
        const MULTI_LINE          = 1 << 1;
        const DOT_MATCHES_NEWLINE = 1 << 2;
        const IGNORE_WHITESPACE   = 1 << 3;
        const SWAP_GREED          = 1 << 4;
    }
}

impl Default for PatternOptions {
    fn default() -> Self {
        PatternOptions::CASE_INSENSITIVE
    }
}

/// Compile `pattern` anchored to the start of the probed text.
///
/// The pattern is wrapped as `\A(?:pattern)` so a match can only begin at
/// offset 0 of whatever suffix the scanner hands us. `\A` (rather than `^`)
/// keeps that true even when `MULTI_LINE` is enabled.
fn compile(pattern: &str, options: PatternOptions) -> Result<Regex, RuleError> {
    let anchored = format!(r"\A(?:{pattern})");
    let re = RegexBuilder::new(&anchored)
        .case_insensitive(options.contains(PatternOptions::CASE_INSENSITIVE))
        .multi_line(options.contains(PatternOptions::MULTI_LINE))
        .dot_matches_new_line(options.contains(PatternOptions::DOT_MATCHES_NEWLINE))
        .ignore_whitespace(options.contains(PatternOptions::IGNORE_WHITESPACE))
        .swap_greed(options.contains(PatternOptions::SWAP_GREED))
        .build()?;
    Ok(re)
}

// --- Rule -----------------------------------------------------------------------

/// One matching unit: a pattern, a production, and a priority.
///
/// Construct rules with the variant constructors ([`Rule::passthrough`],
/// [`Rule::substitute`], [`Rule::pattern_passthrough`],
/// [`Rule::pattern_substitute`], [`Rule::pattern_rewrite`]); the variant set
/// is closed on purpose so the matching semantics stay exhaustively
/// checkable.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: RuleKind,
    priority: i32,
}

#[derive(Debug, Clone)]
enum RuleKind {
    Passthrough {
        key: String,
    },
    Substitute {
        key: String,
        output: String,
    },
    PatternPassthrough {
        re: Regex,
        pattern: String,
    },
    PatternSubstitute {
        re: Regex,
        pattern: String,
        output: String,
    },
    PatternRewrite {
        re: Regex,
        pattern: String,
        replacement: String,
    },
}

impl Rule {
    /// Literal rule that echoes the matched prefix unchanged.
    ///
    /// `key` must be non-empty; an empty key would match everywhere while
    /// consuming nothing.
    pub fn passthrough(key: impl Into<String>, priority: i32) -> Self {
        let key = key.into();
        debug_assert!(!key.is_empty(), "literal rule keys must be non-empty");
        Rule { kind: RuleKind::Passthrough { key }, priority }
    }

    /// Literal rule that emits `output` when the text starts with `key`.
    ///
    /// `key` must be non-empty; an empty key would match everywhere while
    /// consuming nothing.
    pub fn substitute(key: impl Into<String>, output: impl Into<String>, priority: i32) -> Self {
        let key = key.into();
        debug_assert!(!key.is_empty(), "literal rule keys must be non-empty");
        Rule { kind: RuleKind::Substitute { key, output: output.into() }, priority }
    }

    /// Pattern rule that echoes whatever the pattern matched.
    ///
    /// Uses the default [`PatternOptions`] (case-insensitive).
    pub fn pattern_passthrough(pattern: &str, priority: i32) -> Result<Self, RuleError> {
        Self::pattern_passthrough_with(pattern, priority, PatternOptions::default())
    }

    /// [`Rule::pattern_passthrough`] with explicit compilation options.
    pub fn pattern_passthrough_with(
        pattern: &str,
        priority: i32,
        options: PatternOptions,
    ) -> Result<Self, RuleError> {
        let re = compile(pattern, options)?;
        Ok(Rule { kind: RuleKind::PatternPassthrough { re, pattern: pattern.to_string() }, priority })
    }

    /// Pattern rule that emits a fixed `output` for any match.
    ///
    /// Uses the default [`PatternOptions`] (case-insensitive). Note that the
    /// consumed length is the *match* length; the output's length plays no
    /// part in how far the scanner advances.
    pub fn pattern_substitute(
        pattern: &str,
        output: impl Into<String>,
        priority: i32,
    ) -> Result<Self, RuleError> {
        Self::pattern_substitute_with(pattern, output, priority, PatternOptions::default())
    }

    /// [`Rule::pattern_substitute`] with explicit compilation options.
    pub fn pattern_substitute_with(
        pattern: &str,
        output: impl Into<String>,
        priority: i32,
        options: PatternOptions,
    ) -> Result<Self, RuleError> {
        let re = compile(pattern, options)?;
        Ok(Rule {
            kind: RuleKind::PatternSubstitute {
                re,
                pattern: pattern.to_string(),
                output: output.into(),
            },
            priority,
        })
    }

    /// Pattern rule that rewrites its single capture group.
    ///
    /// On a match, the first occurrence of the group's text inside the full
    /// match is replaced with `replacement`, and the rewritten full match is
    /// the output. The consumed length is the full match's length, not the
    /// group's. The pattern must declare exactly one capture group; this is
    /// validated here since the compiled regex makes the check free.
    ///
    /// Uses the default [`PatternOptions`] (case-insensitive).
    pub fn pattern_rewrite(
        pattern: &str,
        replacement: impl Into<String>,
        priority: i32,
    ) -> Result<Self, RuleError> {
        Self::pattern_rewrite_with(pattern, replacement, priority, PatternOptions::default())
    }

    /// [`Rule::pattern_rewrite`] with explicit compilation options.
    pub fn pattern_rewrite_with(
        pattern: &str,
        replacement: impl Into<String>,
        priority: i32,
        options: PatternOptions,
    ) -> Result<Self, RuleError> {
        let re = compile(pattern, options)?;
        let groups = re.captures_len() - 1;
        if groups != 1 {
            return Err(RuleError::RewriteGroupCount { found: groups });
        }
        Ok(Rule {
            kind: RuleKind::PatternRewrite {
                re,
                pattern: pattern.to_string(),
                replacement: replacement.into(),
            },
            priority,
        })
    }

    /// Priority of the rule. Higher values are tried first.
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Does the rule apply to the front of `text`?
    ///
    /// Pure predicate; equivalent to `self.try_match(text).is_some()`.
    pub fn matches(&self, text: &str) -> bool {
        self.try_match(text).is_some()
    }

    /// Probe the front of `text` and return the match, if any.
    ///
    /// `None` means "this rule does not apply here" and is ordinary control
    /// flow for the scanner, which then tries the next rule. A rewrite whose
    /// group did not participate in the match, or whose group text cannot be
    /// located inside the full match, also yields `None` rather than a
    /// corrupted output.
    pub fn try_match(&self, text: &str) -> Option<RuleMatch> {
        match &self.kind {
            RuleKind::Passthrough { key } => text
                .starts_with(key.as_str())
                .then(|| RuleMatch { consumed: key.len(), output: text[..key.len()].to_string() }),
            RuleKind::Substitute { key, output } => text
                .starts_with(key.as_str())
                .then(|| RuleMatch { consumed: key.len(), output: output.clone() }),
            RuleKind::PatternPassthrough { re, .. } => {
                let m = re.find(text)?;
                // Zero-width matches would stall the scanner.
                (!m.is_empty())
                    .then(|| RuleMatch { consumed: m.end(), output: m.as_str().to_string() })
            }
            RuleKind::PatternSubstitute { re, output, .. } => {
                let m = re.find(text)?;
                (!m.is_empty()).then(|| RuleMatch { consumed: m.end(), output: output.clone() })
            }
            RuleKind::PatternRewrite { re, replacement, .. } => {
                let caps = re.captures(text)?;
                let full = caps.get(0).unwrap();
                if full.is_empty() {
                    return None;
                }
                let group = caps.get(1)?;
                let matched = full.as_str();
                // First occurrence of the group's text, which is not
                // necessarily where the group matched.
                let at = matched.find(group.as_str())?;
                let mut output =
                    String::with_capacity(matched.len() - group.len() + replacement.len());
                output.push_str(&matched[..at]);
                output.push_str(replacement);
                output.push_str(&matched[at + group.len()..]);
                Some(RuleMatch { consumed: full.len(), output })
            }
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RuleKind::Passthrough { key } => write!(f, "passthrough({key:?})"),
            RuleKind::Substitute { key, output } => write!(f, "substitute({key:?} -> {output:?})"),
            RuleKind::PatternPassthrough { pattern, .. } => write!(f, "pattern({pattern:?})"),
            RuleKind::PatternSubstitute { pattern, output, .. } => {
                write!(f, "pattern({pattern:?} -> {output:?})")
            }
            RuleKind::PatternRewrite { pattern, replacement, .. } => {
                write!(f, "rewrite({pattern:?}, group -> {replacement:?})")
            }
        }
    }
}
