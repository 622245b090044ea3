//! # genapp CLI
//!
//! Generates a SQL CRUD application from a JSON schema.
//!
//! ## Startup sequence
//!
//! 1. Parse CLI arguments (clap handles `--help` / `--version` early-exit).
//! 2. Read the execution file, if `generate --exec` was given; its `quiet`
//!    and `debug` keys affect logging.
//! 3. Initialise the tracing subscriber (logging).
//! 4. Load configuration (defaults + file + env).
//! 5. Build the [`OutputManager`].
//! 6. Dispatch to the appropriate command handler.
//! 7. Translate any [`CliError`] into a user-facing message and exit code.
//!
//! ## Exit codes
//!
//! | Code | Meaning                                  |
//! |------|------------------------------------------|
//! |  0   | Success                                  |
//! |  1   | Internal error or partial generation     |
//! |  2   | User / input / schema error              |
//! |  3   | Resource not found                       |
//! |  4   | Configuration error                      |

use std::process::ExitCode;

use clap::Parser;
use tracing::{debug, info, instrument};

use crate::{
    cli::{Cli, Commands},
    config::{AppConfig, ExecFile},
    error::{CliError, CliResult},
    logging::init_logging,
    output::OutputManager,
};

mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod output;

fn main() -> ExitCode {
    // Missing .env is fine.
    let _ = dotenvy::dotenv();

    // ── 1. Parse arguments ────────────────────────────────────────────────
    let mut cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version land here too, with exit code 0.
            let code = e.exit_code();
            if e.use_stderr() {
                eprintln!("{}", e.render().ansi());
            } else {
                print!("{}", e.render().ansi());
            }
            return ExitCode::from(u8::try_from(code).unwrap_or(2));
        }
    };

    // ── 2. Execution file ─────────────────────────────────────────────────
    let exec = match load_exec_file(&cli) {
        Ok(exec) => exec,
        Err(e) => {
            let code = e.exit_code();
            eprint!("{}", e.format_plain(false));
            return ExitCode::from(code);
        }
    };
    let mut debug_requested = matches!(&cli.command, Commands::Generate(args) if args.debug);
    if let Some(exec) = &exec {
        if let Some(debug) = exec.debug {
            debug_requested = debug;
        }
        if exec.quiet == Some(true) {
            cli.global.quiet = true;
            cli.global.verbose = 0;
        }
    }

    // ── 3. Initialise tracing ─────────────────────────────────────────────
    let _log_guard = match init_logging(&cli.global, debug_requested) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialise logging: {e}");
            return ExitCode::from(1);
        }
    };

    debug!(
        verbose = cli.global.verbose,
        quiet = cli.global.quiet,
        no_color = cli.global.no_color,
        exec_file = exec.is_some(),
        "CLI started"
    );

    // ── 4. Load configuration ─────────────────────────────────────────────
    let config = match AppConfig::load(cli.global.config.as_ref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            let err = CliError::ConfigError {
                message: format!("{e:#}"),
                source: None,
            };
            return handle_error(err, cli.global.verbose > 0);
        }
    };

    // ── 5. Build output manager ───────────────────────────────────────────
    let output = OutputManager::new(&cli.global, &config);

    // ── 6. Dispatch + 7. Error handling ──────────────────────────────────
    let verbose = cli.global.verbose > 0;
    match run(cli, config, exec, output) {
        Ok(()) => {
            info!("genapp completed successfully");
            ExitCode::SUCCESS
        }
        Err(e) => handle_error(e, verbose),
    }
}

/// The execution file named by `generate --exec`, if any.
fn load_exec_file(cli: &Cli) -> CliResult<Option<ExecFile>> {
    match &cli.command {
        Commands::Generate(args) => args.exec.as_deref().map(ExecFile::load).transpose(),
        _ => Ok(None),
    }
}

/// Dispatch to the correct command handler.
#[instrument(skip_all)]
fn run(cli: Cli, config: AppConfig, exec: Option<ExecFile>, output: OutputManager) -> CliResult<()> {
    match cli.command {
        Commands::Generate(cmd) => {
            commands::generate::execute(cmd, &cli.global, &config, exec.as_ref(), output)
        }
        Commands::Check(cmd) => commands::check::execute(cmd, output),
        Commands::Plan(cmd) => commands::plan::execute(cmd, output),
        Commands::Dialects(cmd) => commands::dialects::execute(cmd, output),
        Commands::Completions(cmd) => commands::completions::execute(cmd),
    }
}

/// Translate a `CliError` into a user message and an exit code.
///
/// Written to stderr so it stays visible when stdout is redirected.
fn handle_error(err: CliError, verbose: bool) -> ExitCode {
    err.log();

    let msg = if std::io::IsTerminal::is_terminal(&std::io::stderr()) {
        err.format_colored(verbose)
    } else {
        err.format_plain(verbose)
    };
    eprint!("{msg}");

    ExitCode::from(err.exit_code())
}

// ── tests ─────────────────────────────────────────────────────────────────────
