//! # Holecard CLI Library
//!
//! Command-line front end for the hole-carding simulator: EV estimates,
//! paired comparisons, practice hands and risk of ruin for three card poker
//! and Ultimate Texas Hold'em.
//!
//! ## Main Entry Point
//!
//! [`run`] parses the arguments, installs logging and dispatches to the
//! subcommand handler, returning the process exit code.
//!
//! ## Example Usage
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holecard", "ev", "--game", "ocp", "--strategy", "holecard", "--trials", "100000"];
//! let code = holecard_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Available Subcommands
//!
//! - `ev`: EV and variance of one strategy
//! - `compare`: basic strategy against hole-carding on the same hands
//! - `play`: interactive practice with a coach
//! - `deal`: one hand played street by street
//! - `ror`: risk of ruin
//! - `rng`: sample of the seeded random stream
//! - `cfg`: resolved configuration and its sources

use clap::Parser;
use std::io::Write;
pub mod cli;
mod commands;
mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, HolecardCli};
use commands::{
    EvArgs, RorArgs, handle_cfg_command, handle_compare_command, handle_deal_command,
    handle_ev_command, handle_play_command, handle_ror_command, handle_rng_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["ev", "compare", "play", "deal", "ror", "rng", "cfg"];

/// Main entry point for the CLI application.
///
/// # Returns
///
/// Exit code: `0` for success, `2` for errors, `130` when a run stops at its
/// deadline before every trial finished.
///
/// # Example
///
/// ```
/// use std::io;
/// let args = vec!["holecard", "rng", "--seed", "42"];
/// let code = holecard_cli::run(args, &mut io::stdout(), &mut io::stderr());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let parsed = HolecardCli::try_parse_from(&argv);
    let cli = match parsed {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    let _ = write_usage(err, &e.to_string());
                    exit_code::ERROR
                }
            };
        }
    };

    logging::init_logging(cli.verbose);
    let name = cli.cmd.name();
    tracing::debug!(command = name, "dispatching");

    let result = match cli.cmd {
        Commands::Ev {
            table,
            strategy,
            trials,
            range_policy,
            threads,
            batch_size,
            max_stderr,
            timeout_secs,
            json,
        } => handle_ev_command(
            EvArgs {
                table,
                strategy,
                trials,
                range_policy,
                threads,
                batch_size,
                max_stderr,
                timeout_secs,
                json,
            },
            out,
            err,
        ),
        Commands::Compare {
            table,
            challenger,
            trials,
            range_policy,
            threads,
            json,
        } => handle_compare_command(
            table,
            challenger,
            trials,
            range_policy,
            threads,
            json,
            out,
            err,
        ),
        Commands::Play { table, hands, coach } => {
            // Use stdin for real input (supports both TTY and piped stdin)
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(table, hands, coach, out, err, &mut stdin_lock)
        }
        Commands::Deal {
            table,
            strategy,
            json,
        } => handle_deal_command(table, strategy, json, out, err),
        Commands::Ror {
            table,
            strategy,
            bankroll,
            runs,
            max_hands,
            team,
            threads,
            json,
        } => handle_ror_command(
            RorArgs {
                table,
                strategy,
                bankroll,
                runs,
                max_hands,
                team,
                threads,
                json,
            },
            out,
            err,
        ),
        Commands::Rng { seed, count } => handle_rng_command(seed, count, out),
        Commands::Cfg => handle_cfg_command(out, err),
    };

    if let Err(e) = &result {
        tracing::debug!(command = name, error = %e, "command failed");
        if writeln!(err, "Error: {}", e).is_err() {
            return exit_code::ERROR;
        }
    }
    exit_code::for_result(&result)
}

fn write_usage(err: &mut dyn Write, clap_error: &str) -> std::io::Result<()> {
    writeln!(err, "{}", clap_error)?;
    writeln!(err)?;
    writeln!(err, "Holecard CLI")?;
    writeln!(err, "Usage: holecard <command> [options]\n")?;
    writeln!(err, "Commands:")?;
    for c in COMMANDS {
        writeln!(err, "  {}", c)?;
    }
    writeln!(err, "\nFor full help, run: holecard --help")
}
