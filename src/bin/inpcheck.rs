//! Command line tool to validate MCNP input decks
//!
//! Parses every card in an INP file and reports each one that fails
//! validation with its line number, the offending field, and the reason.
//!
//! This is very useful for catching bad decks before they are submitted to
//! a cluster, where MCNP would die on the first bad card several minutes
//! into the run.
//!
//! # Usage
//!
//! ```text
//! Usage: inpcheck <inp> [options]
//! ```
//!
//! Help is printed with the `-h` flag, and `--help` will show examples,
//! default values, and any important behaviour.
//!
//! ## Options
//!
//! By default, every card in the file is checked and all problems are
//! reported at once.
//!
//! ### > How to stop on the first problem
//!
//! Use the `--strict` flag to fail immediately instead of collecting every
//! problem in the deck.
//!
//! ```bash
//! # Fail on the first invalid card
//! inpcheck /path/to/model.inp --strict
//! ```
//!
//! ### > How to dump the parsed deck
//!
//! The `--json` flag writes the full parsed deck to stdout as JSON for
//! anything downstream that would rather not parse INP itself.
//!
//! ```bash
//! # Dump the typed deck for other tooling
//! inpcheck /path/to/model.inp --json > model.json
//! ```
//!

// crate modules
use inpdeck::utils::{capitalise, f};
use inpdeck::{read_deck, read_deck_lenient};

// external crates
use anyhow::{bail, Result};
use clap::Parser;
use log::*;

#[doc(hidden)]
fn main() -> Result<()> {
    // set up the command line interface and match arguments
    let cli: Cli = Cli::parse();

    // set up logging (+2 to make 'Info' the default)
    let verbosity = cli.verbose as usize + 2;
    logging_init(verbosity, cli.quiet);

    info!("Checking \"{}\"", cli.inp);

    let deck = match cli.strict {
        true => read_deck(&cli.inp)?,
        false => read_deck_lenient(&cli.inp)?,
    };

    // report every card the reader had to skip
    for skipped in &deck.skipped {
        warn!("  - line {:<4} {}", skipped.line, skipped.reason);
        warn!("      |_ \"{}\"", skipped.text);
    }

    info!("{}", summary(&deck));

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&deck)?);
    }

    match deck.skipped.len() {
        0 => Ok(()),
        n => bail!("{n} invalid cards found"),
    }
}

/// Validate the cards of an MCNP input file
///
/// Every card is parsed against its registered schema and all problems
/// are reported with line numbers, field names, and reasons.
///
/// By default the whole deck is checked and problems are collected.
/// Use --strict to stop at the first invalid card instead.
///
/// Examples
/// --------
///
///  Typical use
///     $ inpcheck model.inp
///
///  Stop on the first problem
///     $ inpcheck model.inp --strict
///
///  Dump the parsed deck as JSON
///     $ inpcheck model.inp --json > model.json
///
#[doc(hidden)]
#[derive(Parser)]
#[command(
    verbatim_doc_comment,
    arg_required_else_help(true),
    before_help(banner()),
    after_help("Typical use: inpcheck model.inp\n\nNOTE: --help shows more detail and examples"),
    term_width(70),
    hide_possible_values(true),
    override_usage("inpcheck <inp> [options]")
)]
struct Cli {
    // * Positional
    /// Path to input INP file
    #[arg(name = "inp")]
    inp: String,

    /// Fail on the first invalid card
    ///
    /// By default every card is checked and all problems are reported at
    /// once. With this flag the first invalid card aborts the check.
    #[arg(help_heading("Check options"))]
    #[arg(short, long)]
    strict: bool,

    /// Dump the parsed deck to stdout as JSON
    ///
    /// Writes the typed cell, surface, and data cards as a JSON document
    /// for downstream tooling.
    #[arg(help_heading("Check options"))]
    #[arg(short, long)]
    json: bool,

    // * Flags
    /// Verbose logging (-v, -vv)
    ///
    /// If specified, the default log level of INFO is increased to DEBUG
    /// (-v) or TRACE (-vv). Errors and Warnings are always logged unless in
    /// quiet (-q) mode.
    #[arg(short, long)]
    #[arg(action = clap::ArgAction::Count)]
    verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long)]
    quiet: bool,
}

/// Sets up logging at runtime to allow for multiple verbosity levels
#[doc(hidden)]
fn logging_init(verbosity: usize, quiet: bool) {
    stderrlog::new()
        .modules(vec![module_path!(), "inpdeck"])
        .quiet(quiet)
        .verbosity(verbosity)
        .show_level(false)
        .color(stderrlog::ColorChoice::Never)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .unwrap();
}

/// Creates a banner fot the command line
#[doc(hidden)]
fn banner() -> String {
    let mut s = f!("{:-<1$}\n", "", 70);
    s += &f!("{:^70}\n", "Inpdeck :: InpCheck");
    s += &f!("{:-<1$}", "", 70);
    s
}

/// Constructs the one-line deck summary
#[doc(hidden)]
fn summary(deck: &inpdeck::Deck) -> String {
    let mut s = "Deck summary:".to_string();
    if let Some(title) = &deck.title {
        s += &f!("\n  > {}", capitalise(title));
    }
    s += &f!("\n  > Cells    : {}", deck.cells.len());
    s += &f!("\n  > Surfaces : {}", deck.surfaces.len());
    s += &f!("\n  > Data     : {}", deck.data.len());
    s += &f!("\n  > Skipped  : {}", deck.skipped.len());
    s
}
