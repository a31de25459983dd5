use crate::error::{Result, ReplacerError};
use crate::rules::brackets::normalize_brackets;
use crate::rules::compiler::{CompiledRule, compile_rules};
use crate::rules::input::{RuleInput, validate_rules};

/// Options for building a [`Replacer`].
#[derive(Debug, Clone)]
pub struct ReplacerOptions {
	/// Label used in error messages.
	pub name: Option<String>,

	/// When set, the rule set must be non-empty and every value must match.
	/// When unset, unmatched values pass through unchanged.
	pub required: bool,
}

impl Default for ReplacerOptions {
	fn default() -> Self {
		ReplacerOptions {
			name: None,
			required: true,
		}
	}
}

impl ReplacerOptions {
	pub fn named(name: impl Into<String>) -> Self {
		ReplacerOptions {
			name: Some(name.into()),
			..Default::default()
		}
	}

	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}
}

/// A compiled rule set mapping input strings to output strings.
///
/// Built once, then [`Replacer::replace`] may be called any number of times,
/// from any thread.
#[derive(Debug)]
pub struct Replacer {
	name: Option<String>,
	required: bool,
	patterns: Vec<String>,
	rules: Vec<CompiledRule>,
}

impl Replacer {
	/// Validate and compile a rule set.
	pub fn new(input: impl Into<RuleInput>, options: ReplacerOptions) -> Result<Self> {
		let ReplacerOptions { name, required } = options;
		let patterns = validate_rules(input.into(), name.as_deref(), required)?;
		let rules = compile_rules(&patterns)?;

		if rules.is_empty() {
			log::debug!(
				"replacer {} has no rules, values pass through unchanged",
				name.as_deref().unwrap_or("<unnamed>")
			);
		}

		Ok(Replacer {
			name,
			required,
			patterns,
			rules,
		})
	}

	/// Map a value through the first matching rule.
	///
	/// Square brackets in the value are read as parentheses before matching.
	/// A rule that produces an empty string counts as no match.
	pub fn replace(&self, value: &str) -> Result<String> {
		if self.is_identity() {
			return Ok(value.to_string());
		}

		let value = normalize_brackets(value);

		let replaced = self.rules.iter().find_map(|rule| {
			let result = rule.apply(&value)?;
			log::trace!("value '{}' matched rule {}", value, rule);
			Some(result)
		});

		match replaced {
			Some(result) if !result.is_empty() => Ok(result),
			_ if !self.required => {
				log::trace!("value '{}' left unchanged", value);
				Ok(value.into_owned())
			}
			_ => Err(ReplacerError::NoMatch {
				value: value.into_owned(),
				patterns: self.patterns.clone(),
			}),
		}
	}

	/// True when no rules are configured and every value is returned as-is.
	pub fn is_identity(&self) -> bool {
		self.rules.is_empty()
	}

	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	pub fn is_required(&self) -> bool {
		self.required
	}

	/// Raw rule strings, in declaration order.
	pub fn patterns(&self) -> &[String] {
		&self.patterns
	}

	pub fn rules(&self) -> &[CompiledRule] {
		&self.rules
	}
}
