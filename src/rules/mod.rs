//! Rule compilation and dispatch for the replacer.
//!
//! This module handles:
//! - Normalizing raw rule values into validated rule lists
//! - Classifying rules and compiling wildcard sources to regexes
//! - Dispatching values through the compiled rules, first match wins

pub mod brackets;
pub mod compiler;
pub mod input;
pub mod replacer;

pub use brackets::normalize_brackets;
pub use compiler::{CompiledRule, RuleKind, Segment, compile_rules, split_rule};
pub use input::{RuleInput, validate_rules};
pub use replacer::{Replacer, ReplacerOptions};
