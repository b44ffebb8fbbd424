use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use env_logger::Env;
use log::{LevelFilter, info};
use rs_markov_core::{DEFAULT_SEED, LanguageModel, ModelConfig};

/// Trains a character-level Markov model on a corpus and generates text from it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Number of characters in a context window
	window_length: usize,

	/// Text to start generating from (only its last WINDOW_LENGTH characters are kept)
	initial_text: String,

	/// Number of characters to generate
	length: usize,

	/// Random source: `random` draws from OS entropy, `fixed` replays a seed
	#[arg(value_enum)]
	mode: Mode,

	/// Corpus file to train on
	corpus: PathBuf,

	/// Seed used in fixed mode
	#[arg(long, value_name = "SEED", default_value_t = DEFAULT_SEED)]
	seed: u64,

	/// Print the trained table to stderr
	#[arg(long, value_enum, value_name = "FORMAT")]
	dump: Option<DumpFormat>,

	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,

	/// Decrease verbosity (-q)
	#[arg(short = 'q', long, action = ArgAction::Count)]
	quiet: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
	/// Different text on every run
	Random,
	/// Same text on every run for the same arguments
	#[value(alias = "seeded")]
	Fixed,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DumpFormat {
	Text,
	Json,
}

impl Cli {
	fn model_config(&self) -> ModelConfig {
		match self.mode {
			Mode::Random => ModelConfig::entropy(self.window_length),
			Mode::Fixed => ModelConfig::seeded(self.window_length, self.seed),
		}
	}
}

fn main() -> Result<()> {
	let cli = Cli::parse();
	init_logging(cli.verbose, cli.quiet);

	println!("{}", cli.initial_text);

	let config = cli.model_config();
	let mut model = config.build().context("invalid model configuration")?;
	info!("training on {}", cli.corpus.display());
	model
		.train_file(&cli.corpus)
		.with_context(|| format!("unable to train on {}", cli.corpus.display()))?;

	println!("{}", model.generate(&cli.initial_text, cli.length));

	if let Some(format) = cli.dump {
		dump(&model, format)?;
	}

	Ok(())
}

fn dump(model: &LanguageModel, format: DumpFormat) -> Result<()> {
	match format {
		DumpFormat::Text => eprint!("{model}"),
		DumpFormat::Json => {
			let json = serde_json::to_string_pretty(model).context("unable to serialize model")?;
			eprintln!("{json}");
		}
	}
	Ok(())
}

fn init_logging(verbose: u8, quiet: u8) {
	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
	builder.format_timestamp_millis();
	// Without -v/-q, RUST_LOG stays in charge
	if let Some(level) = level_override(verbose, quiet) {
		builder.filter_level(level);
	}
	let _ = builder.try_init();
}

/// Level forced by the -v/-q flags, if any were given.
fn level_override(verbose: u8, quiet: u8) -> Option<LevelFilter> {
	if quiet > 0 {
		return Some(LevelFilter::Error);
	}
	match verbose {
		0 => None,
		1 => Some(LevelFilter::Info),
		2 => Some(LevelFilter::Debug),
		_ => Some(LevelFilter::Trace),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_positional_arguments() {
		let cli = Cli::try_parse_from(["rs-markov", "3", "abc", "10", "fixed", "corpus.txt"]).unwrap();
		assert_eq!(cli.window_length, 3);
		assert_eq!(cli.initial_text, "abc");
		assert_eq!(cli.length, 10);
		assert_eq!(cli.mode, Mode::Fixed);
		assert_eq!(cli.model_config(), ModelConfig::seeded(3, DEFAULT_SEED));
	}

	#[test]
	fn random_mode_uses_entropy() {
		let cli = Cli::try_parse_from(["rs-markov", "2", "ab", "5", "random", "c.txt", "--seed", "9"]).unwrap();
		assert_eq!(cli.model_config(), ModelConfig::entropy(2));
	}

	#[test]
	fn seeded_is_an_alias_of_fixed() {
		let cli = Cli::try_parse_from(["rs-markov", "2", "ab", "5", "seeded", "c.txt", "--seed", "9"]).unwrap();
		assert_eq!(cli.model_config(), ModelConfig::seeded(2, 9));
	}

	#[test]
	fn verbosity_flags_override_only_when_given() {
		assert_eq!(level_override(0, 0), None);
		assert_eq!(level_override(1, 0), Some(LevelFilter::Info));
		assert_eq!(level_override(2, 0), Some(LevelFilter::Debug));
		assert_eq!(level_override(5, 0), Some(LevelFilter::Trace));
		assert_eq!(level_override(2, 1), Some(LevelFilter::Error));
	}

	#[test]
	fn rejects_bad_numbers() {
		assert!(Cli::try_parse_from(["rs-markov", "-1", "ab", "5", "fixed", "c.txt"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "2", "ab", "many", "fixed", "c.txt"]).is_err());
		assert!(Cli::try_parse_from(["rs-markov", "2", "ab", "5", "sometimes", "c.txt"]).is_err());
	}
}
