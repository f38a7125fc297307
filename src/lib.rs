extern crate self as blipspeak;

#[macro_use]
mod macros;
mod api;
pub mod engine;
pub mod rules;
pub mod sound;
pub mod voice;

pub use api::{
    ParseReport, StepSummary, default_rules, parse, parse_to_string, parse_verbose,
    parse_verbose_with,
};
pub use engine::{PatternOptions, Rule, RuleError, RuleMatch, RuleSet, ScanError};
pub use sound::{Sound, SoundBank};
pub use voice::Voice;
