//! Flags accepted by every `genapp` subcommand.
//!
//! Flattened into [`super::Cli`] with `global = true`, so
//! `genapp generate -v` and `genapp -v generate` mean the same thing.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log more. Repeatable; `generate --debug` implies at least `-vv`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log more detail; repeat up to -vvv",
        long_help = "Log more detail on stderr. By default only warnings and errors are logged.
    -v      which files are planned and written
    -vv     settings, schema and per-file decisions
    -vvv    everything, including renderer internals"
    )]
    pub verbose: u8,

    /// Print errors and JSON only.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors (and JSON when asked for)"
    )]
    pub quiet: bool,

    /// Plain text even on a colour terminal. Set by a non-empty `NO_COLOR`.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Never colour the output"
    )]
    pub no_color: bool,

    /// genapp.toml to read instead of the per-user one.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read settings from this genapp.toml"
    )]
    pub config: Option<PathBuf>,

    /// Log file, appended to on every run.
    #[arg(
        long = "log-file",
        global = true,
        value_name = "FILE",
        help = "Append the log to FILE too"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "How results are printed on stdout"
    )]
    pub output_format: OutputFormat,
}

/// Rendering of command results on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `human` on a terminal, `plain` when piped.
    #[default]
    Auto,
    /// Coloured status marks.
    Human,
    /// Status marks, no colour.
    Plain,
    /// One JSON document per command.
    Json,
}
