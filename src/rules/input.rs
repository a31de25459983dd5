use crate::error::{Result, ReplacerError};

/// Raw rule value handed to a replacer before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RuleInput {
	/// A single rule string.
	Single(String),

	/// An ordered list of rule strings.
	Many(Vec<String>),

	/// No rules configured.
	#[default]
	None,
}

impl From<&str> for RuleInput {
	fn from(rule: &str) -> Self {
		RuleInput::Single(rule.to_string())
	}
}

impl From<String> for RuleInput {
	fn from(rule: String) -> Self {
		RuleInput::Single(rule)
	}
}

impl From<Vec<String>> for RuleInput {
	fn from(rules: Vec<String>) -> Self {
		RuleInput::Many(rules)
	}
}

impl From<&[&str]> for RuleInput {
	fn from(rules: &[&str]) -> Self {
		RuleInput::Many(rules.iter().map(|r| r.to_string()).collect())
	}
}

impl<const N: usize> From<[&str; N]> for RuleInput {
	fn from(rules: [&str; N]) -> Self {
		RuleInput::from(&rules[..])
	}
}

impl<T: Into<RuleInput>> From<Option<T>> for RuleInput {
	fn from(rules: Option<T>) -> Self {
		rules.map_or(RuleInput::None, Into::into)
	}
}

/// Config files may hold any TOML value under `rules`.
/// Strings and arrays are accepted; non-string array items are dropped and any
/// other value counts as no rules at all.
impl From<toml::Value> for RuleInput {
	fn from(value: toml::Value) -> Self {
		match value {
			toml::Value::String(rule) => RuleInput::Single(rule),
			toml::Value::Array(items) => RuleInput::Many(
				items
					.into_iter()
					.filter_map(|item| match item {
						toml::Value::String(rule) => Some(rule),
						_ => None,
					})
					.collect(),
			),
			_ => RuleInput::None,
		}
	}
}

/// Normalize a rule input into an ordered list of non-empty rule strings.
///
/// Fails with [`ReplacerError::EmptyRuleSet`] when `required` is set and no
/// rule survives.
pub fn validate_rules(input: RuleInput, name: Option<&str>, required: bool) -> Result<Vec<String>> {
	let rules: Vec<String> = match input {
		RuleInput::Single(rule) => vec![rule],
		RuleInput::Many(rules) => rules,
		RuleInput::None => Vec::new(),
	}
	.into_iter()
	.filter(|rule| !rule.is_empty())
	.collect();

	if required && rules.is_empty() {
		return Err(ReplacerError::EmptyRuleSet {
			name: name.map(str::to_string),
		});
	}

	Ok(rules)
}
