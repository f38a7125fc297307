//! Rule-matching engine.
//!
//! This module is the *public entry point* for the tokenizing engine. The
//! engine started as a single monolithic `engine.rs`; it is now split into
//! focused submodules under `src/engine/` while keeping public paths stable
//! (for example `crate::engine::Rule` and `crate::engine::RuleSet`).
//!
//! ## How the parts work together
//!
//! At a high level, tokenizing an input string is a loop:
//!
//! ```text
//! rules ── RuleSet::add ── keep scan order        (ruleset.rs)
//!             (descending priority, stable ties)
//!                               │
//! input ───────────────────────┼─ RuleSet::parse
//!                               v
//!                     Scanner::run (scanner.rs)
//!                       - probe rules in scan order at the offset
//!                       - first match wins (rule.rs)
//!                       - emit output, advance by consumed
//!                       - repeat until end of input
//!                               │
//!              ┌────────────────┴────────────────┐
//!              v                                 v
//!        Vec<String>                     ScanError::Unmatched
//!        (one token per step)            (offset + remainder)
//! ```
//!
//! The engine leans on **greed without backtracking**: each position commits
//! to the first matching rule and never reconsiders, so output is a pure
//! function of the rule set's scan order and the input. That makes rule sets
//! easy to reason about and failures easy to localize, at the cost that an
//! early greedy match can strand a suffix no rule covers.
//!
//! ## Responsibilities by module
//!
//! - `rule.rs`: the five rule variants, their construction, and the
//!   front-anchored match probe.
//! - `ruleset.rs`: ordered rule storage plus the `parse` family of entry
//!   points.
//! - `scanner.rs`: the scan loop itself and [`ScanError`].
//! - `metrics.rs`: step traces and timing for the traced scan path.
//!
//! ## Public surface
//!
//! Most code interacts with the engine via:
//!
//! - [`RuleSet`] (build, then `parse` / `parse_to_string` / `parse_traced`)
//! - [`Rule`] (variant constructors and priorities)
//! - [`PatternOptions`] (regex compilation flags for the pattern variants)
//!
//! ## Debugging
//!
//! Set `BLIPSPEAK_DEBUG_RULES=1` to print one trace line per committed scan
//! step.

#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/rule.rs"]
mod rule;
#[path = "engine/ruleset.rs"]
mod ruleset;
#[path = "engine/scanner.rs"]
mod scanner;

#[allow(unused_imports)]
pub use metrics::{RunResult, ScanMetrics, StepTrace};
#[allow(unused_imports)]
pub use rule::{PatternOptions, Rule, RuleError, RuleMatch};
#[allow(unused_imports)]
pub use ruleset::RuleSet;
#[allow(unused_imports)]
pub use scanner::ScanError;
