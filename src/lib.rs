//! Replacer - compile declarative wildcard rewrite rules into a string mapper.
//!
//! A rule is `source` or `source:target`, where `*` captures any text and
//! `\:` is a literal colon. Rules are tried in order and the first match wins.
//!
//! This library provides:
//! - Rule validation and compilation
//! - The [`Replacer`](rules::Replacer) dispatcher
//! - TOML configuration of named rule sets
//!
//! # Example
//!
//! ```
//! use replacer_cli::rules::{Replacer, ReplacerOptions};
//!
//! let replacer = Replacer::new(["foo-*:bar-*", "a:b"], ReplacerOptions::default()).unwrap();
//!
//! assert_eq!(replacer.replace("foo-x").unwrap(), "bar-x");
//! assert_eq!(replacer.replace("a").unwrap(), "b");
//! assert!(replacer.replace("nope").is_err());
//! ```

pub mod config;
pub mod error;
pub mod rules;

pub use error::{ErrorKind, Result, ReplacerError};
pub use rules::{Replacer, ReplacerOptions, RuleInput};
