//! cldr-rules CLI entry point.
//!
//! Provides command-line tools for working with CLDR rules files:
//! - `cldr-rules check` - Compile every rule in a rules file and report errors
//! - `cldr-rules explain` - Show how a plural condition was understood
//! - `cldr-rules plural` - Classify numbers into plural categories
//! - `cldr-rules spell` - Format numbers with an RBNF rule set

mod commands;
mod output;
mod rules_file;

use std::process::exit;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{
    run_check, run_explain, run_plural, run_spell, CheckArgs, ExplainArgs, PluralArgs, SpellArgs,
};
use log::LevelFilter;

/// CLDR plural and RBNF rule tools.
#[derive(Debug, Parser)]
#[command(name = "cldr-rules")]
#[command(about = "CLDR plural and RBNF rule tools", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Color output control
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto, global = true)]
    pub color: ColorWhen,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// When to use colored output.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorWhen {
    Auto,
    Always,
    Never,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Compile every rule in a rules file
    Check(CheckArgs),
    /// Print the canonical form of a plural condition
    Explain(ExplainArgs),
    /// Classify numbers with a file's plural rules
    Plural(PluralArgs),
    /// Format numbers with a file's RBNF rule sets
    Spell(SpellArgs),
}

/// Set up color output based on user preference.
fn setup_colors(color_when: ColorWhen) {
    match color_when {
        ColorWhen::Auto => {
            // owo-colors automatically checks TTY, NO_COLOR, FORCE_COLOR
        }
        ColorWhen::Always => {
            owo_colors::set_override(true);
        }
        ColorWhen::Never => {
            owo_colors::set_override(false);
        }
    }
}

/// Route library log output to stderr. `RUST_LOG` overrides the default level.
fn setup_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    setup_colors(cli.color);
    setup_logging(cli.verbose);

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))?;

    let result = match cli.command {
        Commands::Check(args) => run_check(args),
        Commands::Explain(args) => run_explain(args),
        Commands::Plural(args) => run_plural(args),
        Commands::Spell(args) => run_spell(args),
    };

    match result {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("{:?}", e);
            exit(exitcode::SOFTWARE);
        }
    }
}
