//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]; `genapp-core` and
//! `genapp-adapters` only emit spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)            | Filter level |
//! |--------------------|--------------|
//! | (none)             | WARN         |
//! | `-v`               | INFO         |
//! | `-vv` / `--debug`  | DEBUG        |
//! | `-vvv`             | TRACE        |
//! | `--quiet`          | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::fs::OpenOptions;
use std::io::IsTerminal as _;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, Layer as _, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Initialise the global tracing subscriber.
///
/// Must be called once, before any tracing macros fire. `debug` raises the
/// level to at least DEBUG unless `--quiet` is set.
///
/// With `--log-file`, the returned guard flushes the file writer on drop and
/// must be held until the process exits.
pub fn init_logging(args: &GlobalArgs, debug: bool) -> anyhow::Result<Option<WorkerGuard>> {
    let level = derive_level(args, debug);

    let filter = || {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "genapp={level},genapp_core={level},genapp_adapters={level}"
            ))
        })
    };

    let use_ansi = !args.no_color && std::io::stderr().is_terminal();

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr)
        .with_filter(filter());

    let (file_layer, guard) = match &args.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| anyhow::anyhow!("cannot open log file {}: {e}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            let layer = tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    // `try_init` errors instead of panicking if a subscriber is already set.
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(guard)
}

/// Translate the verbosity counter, quiet flag and `--debug` to a level.
fn derive_level(args: &GlobalArgs, debug: bool) -> &'static str {
    if args.quiet {
        return "error";
    }
    match (args.verbose, debug) {
        (0, false) => "warn",
        (1, false) => "info",
        (0..=2, _) => "debug",
        _ => "trace",
    }
}
