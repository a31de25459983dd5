//! Configuration loading and parsing for the replacer.
//!
//! This module handles:
//! - TOML config file parsing
//! - Named rule set lookup and validation

pub mod parser;
pub mod types;

pub use parser::{parse_config_file, parse_config_str};
pub use types::{Config, ReplacerConfig};
