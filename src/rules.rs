//! Built-in rule sets.
//!
//! Each submodule contributes one ready-made rule set via a `get()`
//! function, plus the clip vocabulary its outputs draw from. The `english`
//! set is what the top-level [`parse`](crate::parse) functions use.

#[path = "rules/english.rs"]
pub mod english;
