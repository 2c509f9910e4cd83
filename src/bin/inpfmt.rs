//! Command line tool to canonicalise MCNP input decks
//!
//! Reads a deck and writes it back out in canonical form: comments gone,
//! continuations joined and re-wrapped at 80 columns, every card rendered
//! from its validated fields.
//!
//! This is very useful for diffing two decks that differ only in
//! formatting, or for cleaning up a file that has been hand-edited for
//! years.
//!
//! # Usage
//!
//! ```text
//! Usage: inpfmt <inp> [options]
//! ```
//!
//! Help is printed with the `-h` flag, and `--help` will show examples,
//! default values, and any important behaviour.
//!
//! ## Options
//!
//! By default the canonical deck is written to stdout.
//!
//! ### > How to write to a file
//!
//! Use the `--output` option to write the formatted deck somewhere instead.
//!
//! ```bash
//! # Write the canonical deck to a new file
//! inpfmt /path/to/model.inp --output model_clean.inp
//! ```
//!

// crate modules
use inpdeck::read_deck;
use inpdeck::utils::f;

// external crates
use anyhow::Result;
use clap::Parser;
use log::*;

#[doc(hidden)]
fn main() -> Result<()> {
    // set up the command line interface and match arguments
    let cli: Cli = Cli::parse();

    // set up logging (+2 to make 'Info' the default)
    let verbosity = cli.verbose as usize + 2;
    logging_init(verbosity, cli.quiet);

    info!("Formatting \"{}\"", cli.inp);

    // a deck must be fully valid before it is worth canonicalising
    let deck = read_deck(&cli.inp)?;

    match &cli.output {
        Some(path) => {
            info!("  - writing {path}");
            deck.write(path)?;
        }
        None => print!("{deck}"),
    }

    Ok(())
}

/// Rewrite an MCNP input file in canonical form
///
/// The deck is fully parsed and validated, then every card is re-rendered
/// from its typed fields: comments stripped, continuations joined and
/// re-wrapped at the 80 column limit, tokens lower-cased.
///
/// An invalid deck is refused; run inpcheck first to find out why.
///
/// Examples
/// --------
///
///  Typical use
///     $ inpfmt model.inp
///
///  Write to a file instead of stdout
///     $ inpfmt model.inp --output model_clean.inp
///
#[doc(hidden)]
#[derive(Parser)]
#[command(
    verbatim_doc_comment,
    arg_required_else_help(true),
    before_help(banner()),
    after_help("Typical use: inpfmt model.inp\n\nNOTE: --help shows more detail and examples"),
    term_width(70),
    hide_possible_values(true),
    override_usage("inpfmt <inp> [options]")
)]
struct Cli {
    // * Positional
    /// Path to input INP file
    #[arg(name = "inp")]
    inp: String,

    /// Write the formatted deck to a file ('stdout' default)
    ///
    /// Defaults to printing on stdout so the output can be piped or
    /// inspected directly.
    #[arg(help_heading("Format options"))]
    #[arg(short, long)]
    #[arg(value_name = "path")]
    output: Option<String>,

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
    s += &f!("{:^70}\n", "Inpdeck :: InpFmt");
    s += &f!("{:-<1$}", "", 70);
    s
}
