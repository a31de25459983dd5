use crate::error::{Result, ReplacerError};
use crate::rules::{Replacer, ReplacerOptions, RuleInput};
use serde::Deserialize;
use std::collections::HashSet;

/// Top-level configuration from a replacer TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// Named rule sets, in declaration order.
	#[serde(default)]
	pub replacers: Vec<ReplacerConfig>,
}

/// One named rule set.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReplacerConfig {
	/// Name used to select this set and in error messages.
	pub name: String,

	/// Whether the set must be non-empty and every value must match.
	#[serde(default = "default_required")]
	pub required: bool,

	/// A single rule string or an array of rule strings.
	/// Anything else is treated as no rules.
	#[serde(default)]
	pub rules: Option<toml::Value>,
}

fn default_required() -> bool {
	true
}

impl ReplacerConfig {
	pub fn rule_input(&self) -> RuleInput {
		self.rules.clone().map_or(RuleInput::None, RuleInput::from)
	}

	pub fn options(&self) -> ReplacerOptions {
		ReplacerOptions {
			name: Some(self.name.clone()),
			required: self.required,
		}
	}

	/// Compile this rule set.
	pub fn build(&self) -> Result<Replacer> {
		Replacer::new(self.rule_input(), self.options())
	}
}

impl Config {
	/// Look up a rule set by name.
	pub fn replacer(&self, name: &str) -> Option<&ReplacerConfig> {
		self.replacers.iter().find(|r| r.name == name)
	}

	/// Compile the named rule set.
	pub fn build(&self, name: &str) -> Result<Replacer> {
		self.replacer(name)
			.ok_or_else(|| ReplacerError::UnknownReplacer {
				name: name.to_string(),
			})?
			.build()
	}

	/// Compile every rule set, in declaration order.
	pub fn build_all(&self) -> Result<Vec<Replacer>> {
		self.replacers.iter().map(compile_named).collect()
	}

	/// Check names are unique and every rule set compiles.
	pub fn validate(&self) -> Result<()> {
		let mut seen = HashSet::new();
		for replacer in &self.replacers {
			if !seen.insert(replacer.name.as_str()) {
				return Err(ReplacerError::DuplicateReplacer {
					name: replacer.name.clone(),
				});
			}
		}

		self.build_all().map(|_| ())
	}
}

fn compile_named(config: &ReplacerConfig) -> Result<Replacer> {
	config
		.build()
		.map_err(|source| ReplacerError::InvalidReplacer {
			name: config.name.clone(),
			source: Box::new(source),
		})
}
