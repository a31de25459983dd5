use crate::error::{Result, ReplacerError};
use crate::rules::brackets::normalize_brackets;
use regex::{Captures, Regex};
use std::fmt;

const SEPARATOR: char = ':';
const WILDCARD: char = '*';
const ESCAPED_SEPARATOR: &str = "\\:";

/// Kind of a compiled rule, mostly useful for display and diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
	Constant,
	Exact,
	Wildcard,
}

impl RuleKind {
	pub fn as_str(&self) -> &'static str {
		match self {
			RuleKind::Constant => "constant",
			RuleKind::Exact => "exact",
			RuleKind::Wildcard => "wildcard",
		}
	}
}

/// One piece of a `*`-split source or target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
	Literal(String),
	Wildcard,
}

/// A rule ready for dispatch.
#[derive(Debug)]
pub enum CompiledRule {
	/// Bare value; returned for every input.
	Constant { pattern: String, value: String },

	/// Literal source compared against the whole input.
	Exact {
		pattern: String,
		source: String,
		target: String,
	},

	/// Source with wildcards, compiled to an anchored regex.
	Wildcard {
		pattern: String,
		regex: Regex,
		target: Vec<Segment>,
	},
}

impl CompiledRule {
	/// Compile a single rule string. `rule_count` is the size of the whole set,
	/// since bare values are only allowed on their own.
	pub fn compile(pattern: &str, rule_count: usize) -> Result<Self> {
		let (source, target) = match split_rule(pattern) {
			Some((source, target)) if !target.is_empty() => (source, target),
			split => {
				if rule_count > 1 {
					return Err(ReplacerError::MultipleBareValues {
						pattern: pattern.to_string(),
						count: rule_count,
					});
				}
				let source = split.map_or(pattern, |(source, _)| source);
				return Ok(CompiledRule::Constant {
					pattern: pattern.to_string(),
					value: source.replace(ESCAPED_SEPARATOR, ":"),
				});
			}
		};

		if !source.contains(WILDCARD) {
			return Ok(CompiledRule::Exact {
				pattern: pattern.to_string(),
				source: source.to_string(),
				target: target.to_string(),
			});
		}

		let source_segments = split_segments(source);
		let target_segments = split_segments(target);

		// A target without wildcards is a plain replacement for the whole match.
		let target_wildcards = count_wildcards(&target_segments);
		if target_wildcards > 0 && target_wildcards != count_wildcards(&source_segments) {
			return Err(ReplacerError::SegmentMismatch {
				pattern: pattern.to_string(),
				source_parts: source_segments.len(),
				target_parts: target_segments.len(),
			});
		}

		let expression = build_expression(&source_segments);
		let regex = Regex::new(&expression).map_err(|source| ReplacerError::InvalidRegex {
			pattern: pattern.to_string(),
			source,
		})?;

		Ok(CompiledRule::Wildcard {
			pattern: pattern.to_string(),
			regex,
			target: target_segments,
		})
	}

	/// The raw rule text this rule was compiled from.
	pub fn pattern(&self) -> &str {
		match self {
			CompiledRule::Constant { pattern, .. }
			| CompiledRule::Exact { pattern, .. }
			| CompiledRule::Wildcard { pattern, .. } => pattern,
		}
	}

	pub fn kind(&self) -> RuleKind {
		match self {
			CompiledRule::Constant { .. } => RuleKind::Constant,
			CompiledRule::Exact { .. } => RuleKind::Exact,
			CompiledRule::Wildcard { .. } => RuleKind::Wildcard,
		}
	}

	/// Try this rule against an already normalized value.
	///
	/// Returns `None` when the rule does not apply.
	pub fn apply(&self, value: &str) -> Option<String> {
		match self {
			CompiledRule::Constant { value: constant, .. } => Some(constant.clone()),
			CompiledRule::Exact { source, target, .. } => {
				(value == source.as_str()).then(|| target.clone())
			}
			CompiledRule::Wildcard { regex, target, .. } => regex
				.captures(value)
				.map(|captures| rebuild_target(target, &captures)),
		}
	}
}

impl fmt::Display for CompiledRule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} ({})", self.pattern(), self.kind().as_str())
	}
}

/// Split a rule on its first unescaped separator.
///
/// A separator counts only when a character precedes it and that character is
/// not a backslash, so a leading `:` never splits.
pub fn split_rule(pattern: &str) -> Option<(&str, &str)> {
	let mut previous: Option<char> = None;

	for (index, c) in pattern.char_indices() {
		if c == SEPARATOR && previous.is_some_and(|p| p != '\\') {
			return Some((&pattern[..index], &pattern[index + c.len_utf8()..]));
		}
		previous = Some(c);
	}

	None
}

/// Split text on `*`, keeping the wildcards as their own segments.
///
/// Empty literals are kept so the layout mirrors the text exactly:
/// `foo-*` becomes `["foo-", *, ""]`.
pub fn split_segments(text: &str) -> Vec<Segment> {
	let mut segments = Vec::new();

	for (i, literal) in text.split(WILDCARD).enumerate() {
		if i > 0 {
			segments.push(Segment::Wildcard);
		}
		segments.push(Segment::Literal(literal.to_string()));
	}

	segments
}

fn count_wildcards(segments: &[Segment]) -> usize {
	segments
		.iter()
		.filter(|segment| **segment == Segment::Wildcard)
		.count()
}

/// Build the anchored expression for a wildcard source.
///
/// `\:` in a literal stands for a plain colon in the matched value.
fn build_expression(segments: &[Segment]) -> String {
	let body: String = segments
		.iter()
		.map(|segment| match segment {
			Segment::Wildcard => "(.*?)".to_string(),
			Segment::Literal(literal) => {
				let literal = literal.replace(ESCAPED_SEPARATOR, ":");
				regex::escape(&normalize_brackets(&literal))
			}
		})
		.collect();

	format!("^{}$", body)
}

/// Reassemble the target, feeding captures to wildcards left to right.
fn rebuild_target(target: &[Segment], captures: &Captures) -> String {
	let mut group = 0;

	target
		.iter()
		.map(|segment| match segment {
			Segment::Literal(literal) => literal.as_str(),
			Segment::Wildcard => {
				group += 1;
				captures.get(group).map_or("", |m| m.as_str())
			}
		})
		.collect()
}

/// Compile an ordered list of validated rules.
pub fn compile_rules(rules: &[String]) -> Result<Vec<CompiledRule>> {
	rules
		.iter()
		.map(|pattern| {
			let compiled = CompiledRule::compile(pattern, rules.len())?;
			log::debug!("compiled rule {}", compiled);
			Ok(compiled)
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	fn compile_one(pattern: &str) -> CompiledRule {
		CompiledRule::compile(pattern, 1).unwrap()
	}

	#[test]
	fn test_split_rule_basic() {
		assert_eq!(split_rule("a:b"), Some(("a", "b")));
		assert_eq!(split_rule("foo-*:bar-*"), Some(("foo-*", "bar-*")));
	}

	#[test]
	fn test_split_rule_first_separator_wins() {
		assert_eq!(split_rule("a:b:c"), Some(("a", "b:c")));
	}

	#[test]
	fn test_split_rule_skips_escaped_separator() {
		assert_eq!(split_rule(r"a\:b:c"), Some((r"a\:b", "c")));
		assert_eq!(split_rule(r"a\:b"), None);
	}

	#[test]
	fn test_split_rule_leading_separator_does_not_split() {
		assert_eq!(split_rule(":abc"), None);
	}

	#[test]
	fn test_split_segments_layout() {
		assert_eq!(
			split_segments("foo-*"),
			vec![
				Segment::Literal("foo-".to_string()),
				Segment::Wildcard,
				Segment::Literal(String::new()),
			]
		);
		assert_eq!(split_segments("bar"), vec![Segment::Literal("bar".to_string())]);
	}

	#[test]
	fn test_constant_rule() {
		let rule = compile_one("hello");
		assert_eq!(rule.kind(), RuleKind::Constant);
		assert_eq!(rule.apply("anything"), Some("hello".to_string()));
		assert_eq!(rule.apply(""), Some("hello".to_string()));
	}

	#[test]
	fn test_constant_rule_unescapes_every_colon() {
		let rule = compile_one(r"a\:b\:c");
		assert_eq!(rule.apply("x"), Some("a:b:c".to_string()));
	}

	#[test]
	fn test_empty_target_is_bare_value() {
		let rule = compile_one("a:");
		assert_eq!(rule.kind(), RuleKind::Constant);
		assert_eq!(rule.apply("x"), Some("a".to_string()));
	}

	#[test]
	fn test_bare_value_among_many_fails() {
		let result = CompiledRule::compile("a", 2);
		match result.unwrap_err() {
			ReplacerError::MultipleBareValues { pattern, count } => {
				assert_eq!(pattern, "a");
				assert_eq!(count, 2);
			}
			_ => panic!("Expected MultipleBareValues error"),
		}
	}

	#[test]
	fn test_exact_rule() {
		let rule = compile_one("a:b");
		assert_eq!(rule.kind(), RuleKind::Exact);
		assert_eq!(rule.apply("a"), Some("b".to_string()));
		assert_eq!(rule.apply("ab"), None);
	}

	#[test]
	fn test_exact_rule_keeps_wildcard_in_target() {
		let rule = compile_one("a:b*");
		assert_eq!(rule.kind(), RuleKind::Exact);
		assert_eq!(rule.apply("a"), Some("b*".to_string()));
	}

	#[test]
	fn test_wildcard_rule() {
		let rule = compile_one("foo-*:bar-*");
		assert_eq!(rule.kind(), RuleKind::Wildcard);
		assert_eq!(rule.apply("foo-x"), Some("bar-x".to_string()));
		assert_eq!(rule.apply("foo-"), Some("bar-".to_string()));
		assert_eq!(rule.apply("nope"), None);
	}

	#[test]
	fn test_wildcard_rule_is_anchored() {
		let rule = compile_one("foo-*:bar-*");
		assert_eq!(rule.apply("xfoo-y"), None);
	}

	#[test]
	fn test_wildcard_groups_in_order() {
		let rule = compile_one("*-*-*:*.*.*");
		assert_eq!(rule.apply("1-2-3"), Some("1.2.3".to_string()));
	}

	#[test]
	fn test_wildcard_groups_are_non_greedy() {
		let rule = compile_one("*-*:*/*");
		assert_eq!(rule.apply("a-b-c"), Some("a/b-c".to_string()));
	}

	#[test]
	fn test_wildcard_with_literal_target() {
		let rule = compile_one("*:2");
		assert_eq!(rule.apply("anything"), Some("2".to_string()));
	}

	#[test]
	fn test_wildcard_segment_mismatch() {
		let result = CompiledRule::compile("*-*:*", 1);
		match result.unwrap_err() {
			ReplacerError::SegmentMismatch {
				pattern,
				source_parts,
				target_parts,
			} => {
				assert_eq!(pattern, "*-*:*");
				assert_eq!(source_parts, 5);
				assert_eq!(target_parts, 3);
			}
			_ => panic!("Expected SegmentMismatch error"),
		}
	}

	#[test]
	fn test_wildcard_literals_are_escaped() {
		let rule = compile_one("a.b(*):*");
		assert_eq!(rule.apply("a.b(x)"), Some("x".to_string()));
		assert_eq!(rule.apply("aXb(x)"), None);
	}

	#[test]
	fn test_wildcard_source_escaped_colon_matches_plain_colon() {
		let rule = compile_one(r"ns\:*:id-*");
		assert_eq!(rule.kind(), RuleKind::Wildcard);
		assert_eq!(rule.apply("ns:foo"), Some("id-foo".to_string()));
		assert_eq!(rule.apply(r"ns\:foo"), None);
	}

	#[test]
	fn test_wildcard_source_brackets_match_parentheses() {
		let rule = compile_one("shoe [*]:*");
		assert_eq!(rule.apply("shoe (red)"), Some("red".to_string()));
	}

	#[test]
	fn test_compile_rules_preserves_order() {
		let rules = vec!["a:1".to_string(), "*:2".to_string()];
		let compiled = compile_rules(&rules).unwrap();
		assert_eq!(compiled.len(), 2);
		assert_eq!(compiled[0].pattern(), "a:1");
		assert_eq!(compiled[1].pattern(), "*:2");
	}

	#[test]
	fn test_display_includes_kind() {
		assert_eq!(compile_one("a:b").to_string(), "a:b (exact)");
	}
}
