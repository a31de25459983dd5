use std::path::PathBuf;

/// Library-level structured errors for the replacer.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum ReplacerError {
	#[error("Replacer {}can't be empty", display_name(.name))]
	EmptyRuleSet { name: Option<String> },

	#[error(
		"pattern '{pattern}': there can be only single replace value pattern. Instead {count} patterns presented"
	)]
	MultipleBareValues { pattern: String, count: usize },

	#[error(
		"pattern '{pattern}': source and target pattern has different count of components ({source_parts} vs {target_parts})"
	)]
	SegmentMismatch {
		pattern: String,
		source_parts: usize,
		target_parts: usize,
	},

	#[error("pattern '{pattern}': failed to compile wildcard expression")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Can't match value '{value}' with patterns\n{}", .patterns.join("\n"))]
	NoMatch { value: String, patterns: Vec<String> },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Replacer '{name}' is declared more than once")]
	DuplicateReplacer { name: String },

	#[error("Invalid replacer '{name}'")]
	InvalidReplacer {
		name: String,
		#[source]
		source: Box<ReplacerError>,
	},

	#[error("Replacer not found: {name}")]
	UnknownReplacer { name: String },
}

/// Broad classification of a [`ReplacerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
	/// The rule set or config file is malformed. Raised while building.
	Configuration,
	/// A value matched none of the rules of a required replacer.
	Match,
}

impl ReplacerError {
	pub fn kind(&self) -> ErrorKind {
		match self {
			ReplacerError::NoMatch { .. } => ErrorKind::Match,
			_ => ErrorKind::Configuration,
		}
	}
}

fn display_name(name: &Option<String>) -> String {
	match name {
		Some(name) => format!("'{}' ", name),
		None => String::new(),
	}
}

/// Result type alias using ReplacerError.
pub type Result<T> = std::result::Result<T, ReplacerError>;
