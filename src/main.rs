use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use replacer_cli::config::parse_config_file;
use replacer_cli::rules::{Replacer, ReplacerOptions, RuleInput};

#[derive(Parser)]
#[command(name = "replacer")]
#[command(
	author,
	version,
	about = "Rewrite values with declarative wildcard rules like 'foo-*:bar-*'"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Rule to apply, `source` or `source:target` (repeatable, first match wins)
	#[arg(short, long = "rule", value_name = "RULE", conflicts_with = "config")]
	rules: Vec<String>,

	/// TOML file declaring named rule sets
	#[arg(short, long, value_name = "FILE", requires = "name")]
	config: Option<PathBuf>,

	/// Name of the rule set to use from --config
	#[arg(short, long, requires = "config")]
	name: Option<String>,

	/// Pass unmatched values through instead of failing
	#[arg(long, conflicts_with = "config")]
	optional: bool,

	/// Increase log verbosity (-v, -vv, -vvv)
	#[arg(short, long, action = ArgAction::Count, global = true)]
	verbose: u8,

	/// Values to rewrite; read from stdin, one per line, when omitted
	#[arg(trailing_var_arg = true, allow_hyphen_values = true)]
	values: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display every rule set in a config file with its compiled rules
	Show {
		/// Config file to read
		file: PathBuf,
	},
	/// Check a config file for errors without rewriting anything
	Validate {
		/// Config file to read
		file: PathBuf,
	},
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	init_logging(cli.verbose);

	if let Some(command) = cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show { file } => handle_config_show(&file),
				ConfigAction::Validate { file } => handle_config_validate(&file),
			},
		};
	}

	let replacer = build_replacer(&cli)?;
	handle_values(&replacer, &cli.values)
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => "warn",
		1 => "info",
		2 => "debug",
		_ => "trace",
	};

	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
		.format_timestamp(None)
		.init();
}

fn build_replacer(cli: &Cli) -> Result<Replacer> {
	if let (Some(path), Some(name)) = (&cli.config, &cli.name) {
		let config = parse_config_file(path)
			.with_context(|| format!("Failed to load configuration: {}", path.display()))?;
		return config
			.build(name)
			.with_context(|| format!("Failed to build replacer '{}'", name));
	}

	let input = match cli.rules.as_slice() {
		[] => RuleInput::None,
		[rule] => RuleInput::Single(rule.clone()),
		rules => RuleInput::Many(rules.to_vec()),
	};
	let options = ReplacerOptions {
		name: None,
		required: !cli.optional,
	};

	Replacer::new(input, options).context("Failed to compile rules")
}

fn handle_values(replacer: &Replacer, values: &[String]) -> Result<ExitCode> {
	let stdout = std::io::stdout();
	let mut out = stdout.lock();

	if !values.is_empty() {
		for value in values {
			writeln!(out, "{}", replacer.replace(value)?)?;
		}
		return Ok(ExitCode::SUCCESS);
	}

	for line in std::io::stdin().lock().lines() {
		let line = line.context("Failed to read from stdin")?;
		writeln!(out, "{}", replacer.replace(&line)?)?;
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(file: &Path) -> Result<ExitCode> {
	let config = parse_config_file(file)
		.with_context(|| format!("Failed to load configuration: {}", file.display()))?;

	if config.replacers.is_empty() {
		println!("No replacers declared in {}", file.display());
		return Ok(ExitCode::SUCCESS);
	}

	println!("# Source: {}\n", file.display());

	for replacer in config.build_all()? {
		println!("[{}]", replacer.name().unwrap_or_default());
		println!("  required: {}", replacer.is_required());
		if replacer.is_identity() {
			println!("  (no rules, values pass through unchanged)");
		}
		for (i, rule) in replacer.rules().iter().enumerate() {
			println!("  Rule {}: {}", i + 1, rule);
		}
		println!();
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(file: &Path) -> Result<ExitCode> {
	let built = parse_config_file(file).and_then(|config| config.build_all());

	match built {
		Ok(replacers) => {
			if replacers.is_empty() {
				println!("No replacers declared in {}", file.display());
			} else {
				println!("All replacers are valid:");
				for replacer in &replacers {
					println!(
						"  {} ({} rules)",
						replacer.name().unwrap_or_default(),
						replacer.patterns().len()
					);
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {:#}", anyhow::Error::from(e));
			Ok(ExitCode::FAILURE)
		}
	}
}
