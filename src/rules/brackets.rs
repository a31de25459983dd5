use std::borrow::Cow;

/// Rewrite square brackets as parentheses (`[` -> `(`, `]` -> `)`).
///
/// Names handled by replacers follow an upstream convention where the two
/// bracket styles are interchangeable. Both compiled literals and dispatched
/// values pass through here so they compare consistently.
pub fn normalize_brackets(value: &str) -> Cow<'_, str> {
	if !value.contains(['[', ']']) {
		return Cow::Borrowed(value);
	}

	Cow::Owned(
		value
			.chars()
			.map(|c| match c {
				'[' => '(',
				']' => ')',
				other => other,
			})
			.collect(),
	)
}
