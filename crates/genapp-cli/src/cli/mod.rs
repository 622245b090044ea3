//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "genapp",
    bin_name = "genapp",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Generate a SQL CRUD application from a JSON schema",
    long_about = "genapp reads a JSON database schema and writes the source of a \
                  small web application for one of five SQL dialects: \
                  mariadb, mssql, mysql, postgres or sqlite.",
    after_help = "EXAMPLES:\n\
        \x20 genapp generate movies.json --outdir ./movies\n\
        \x20 genapp check movies.json\n\
        \x20 genapp plan movies.json\n\
        \x20 genapp dialects --format json\n\
        \x20 genapp completions bash > /usr/share/bash-completion/completions/genapp",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate the application from a schema.
    #[command(
        visible_alias = "gen",
        about = "Generate application files from a schema",
        after_help = "EXAMPLES:\n\
            \x20 genapp generate movies.json\n\
            \x20 genapp gen movies.json --outdir ./out --replace\n\
            \x20 genapp gen movies.json -d Author=Ada -d Year=2026\n\
            \x20 genapp gen --exec run.exec.json"
    )]
    Generate(GenerateArgs),

    /// Validate a schema and report every problem found.
    #[command(
        about = "Check a schema without generating",
        after_help = "EXAMPLES:\n\
            \x20 genapp check movies.json\n\
            \x20 genapp --output-format json check movies.json"
    )]
    Check(CheckArgs),

    /// Print the files a schema would produce.
    #[command(
        about = "Show planned output files",
        after_help = "EXAMPLES:\n\
            \x20 genapp plan movies.json\n\
            \x20 genapp plan movies.json --outdir /tmp/movies"
    )]
    Plan(PlanArgs),

    /// List the registered SQL dialects.
    #[command(
        visible_alias = "ls",
        about = "List supported SQL dialects",
        after_help = "EXAMPLES:\n\
            \x20 genapp dialects\n\
            \x20 genapp ls --format json"
    )]
    Dialects(DialectsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 genapp completions bash > ~/.local/share/bash-completion/completions/genapp\n\
            \x20 genapp completions zsh  > ~/.zfunc/_genapp\n\
            \x20 genapp completions fish > ~/.config/fish/completions/genapp.fish"
    )]
    Completions(CompletionsArgs),
}

// ── generate ──────────────────────────────────────────────────────────────────

/// Arguments for `genapp generate`.
#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    /// Path to the JSON schema. May instead come from the execution file.
    #[arg(value_name = "SCHEMA", help = "JSON schema file")]
    pub schema: Option<PathBuf>,

    /// Directory holding the `sqlapp` model set.
    #[arg(
        long = "mdldir",
        value_name = "DIR",
        help = "Model directory (default: $GENAPP_MODELS or ./models)"
    )]
    pub model_dir: Option<PathBuf>,

    #[arg(
        short = 'o',
        long = "outdir",
        value_name = "DIR",
        help = "Output directory (default: /tmp)"
    )]
    pub output_dir: Option<PathBuf>,

    #[arg(long = "replace", help = "Overwrite files that already exist")]
    pub replace: bool,

    /// Remove the output directory before generating (destructive).
    #[arg(
        short = 'f',
        long = "force",
        help = "Remove the output directory first (destructive)"
    )]
    pub force: bool,

    #[arg(long = "noop", help = "Plan and check only; write nothing")]
    pub noop: bool,

    /// Same as `-vv`.
    #[arg(long = "debug", help = "Enable debug logging")]
    pub debug: bool,

    /// Template variable, repeatable.
    #[arg(
        short = 'd',
        long = "define",
        value_name = "KEY=VALUE",
        help = "Extra template variable (repeatable)"
    )]
    pub defines: Vec<String>,

    /// JSON execution file; its values override these flags.
    #[arg(
        short = 'x',
        long = "exec",
        value_name = "FILE",
        help = "Execution file (JSON), overrides flags"
    )]
    pub exec: Option<PathBuf>,

    /// Skip the confirmation prompt for `--force`.
    #[arg(short = 'y', long = "yes", help = "Do not ask before --force")]
    pub yes: bool,
}

// ── check / plan ──────────────────────────────────────────────────────────────

/// Arguments for `genapp check`.
#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(value_name = "SCHEMA", help = "JSON schema file")]
    pub schema: PathBuf,
}

/// Arguments for `genapp plan`.
#[derive(Debug, Args)]
pub struct PlanArgs {
    #[arg(value_name = "SCHEMA", help = "JSON schema file")]
    pub schema: PathBuf,

    /// Prefix the planned paths with this directory.
    #[arg(
        short = 'o',
        long = "outdir",
        value_name = "DIR",
        help = "Show paths under this output directory"
    )]
    pub output_dir: Option<PathBuf>,
}

// ── dialects ──────────────────────────────────────────────────────────────────

/// Arguments for `genapp dialects`.
#[derive(Debug, Args)]
pub struct DialectsArgs {
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: DialectsFormat,
}

/// Output format for the `dialects` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DialectsFormat {
    /// Human-readable table.
    Table,
    /// JSON array.
    Json,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `genapp completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
