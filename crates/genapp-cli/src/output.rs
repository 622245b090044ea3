//! What genapp prints for its user.
//!
//! Command results go to stdout through [`OutputManager`]. Diagnostics are
//! tracing events and go to stderr, so `genapp plan --output-format json | jq`
//! stays clean.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Kind of status line, each with its own mark and colour.
#[derive(Debug, Clone, Copy)]
enum Status {
    Done,
    Failed,
    Caution,
    Note,
}

impl Status {
    fn mark(self) -> &'static str {
        match self {
            Status::Done => "\u{2713}",
            Status::Failed => "\u{2717}",
            Status::Caution => "\u{26a0}",
            Status::Note => "\u{2139}",
        }
    }

    fn coloured(self, msg: &str) -> String {
        let mark = self.mark();
        match self {
            Status::Done => format!("{} {}", mark.green().bold(), msg.green()),
            Status::Failed => format!("{} {}", mark.red().bold(), msg.red()),
            Status::Caution => format!("{} {}", mark.yellow().bold(), msg.yellow()),
            Status::Note => format!("{} {}", mark.blue().bold(), msg.blue()),
        }
    }
}

/// Stdout writer for one command run.
///
/// `--quiet` silences everything except [`error`](Self::error) and
/// [`json`](Self::json).
pub struct OutputManager {
    format: OutputFormat,
    quiet: bool,
    color: bool,
    term: Term,
}

impl OutputManager {
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let format = match args.output_format {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            chosen => chosen,
        };
        let color = !(args.no_color || config.output.no_color || format == OutputFormat::Plain);

        Self {
            format,
            quiet: args.quiet,
            color,
            term: Term::stdout(),
        }
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        self.line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        self.line(&self.status(Status::Done, msg))
    }

    /// Shown even with `--quiet`.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        self.term.write_line(&self.status(Status::Failed, msg))
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        self.line(&self.status(Status::Caution, msg))
    }

    pub fn info(&self, msg: &str) -> io::Result<()> {
        self.line(&self.status(Status::Note, msg))
    }

    /// One bulleted entry of a list, such as a written file.
    pub fn item(&self, msg: &str) -> io::Result<()> {
        let bullet = if self.color {
            "\u{2022}".dimmed().to_string()
        } else {
            "\u{2022}".to_owned()
        };
        self.line(&format!("  {bullet} {msg}"))
    }

    /// Pretty-printed; written with `--quiet` too.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.term.write_line(&text)
    }

    /// Column titles and section headings.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.color {
            self.line(&text.cyan().bold().to_string())
        } else {
            self.line(text)
        }
    }

    pub fn supports_color(&self) -> bool {
        self.color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn status(&self, status: Status, msg: &str) -> String {
        if self.color {
            status.coloured(msg)
        } else {
            format!("{} {msg}", status.mark())
        }
    }

    fn line(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(format: OutputFormat, quiet: bool, no_color: bool) -> OutputManager {
        let args = GlobalArgs {
            quiet,
            no_color,
            output_format: format,
            ..GlobalArgs::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn quiet_still_accepts_writes() {
        let out = manager(OutputFormat::Plain, true, true);
        assert!(out.is_quiet());
        assert!(out.print("hello").is_ok());
        assert!(out.item("hello").is_ok());
        assert!(out.error("something went wrong").is_ok());
        assert!(out.json(&["mysql", "sqlite"]).is_ok());
    }

    #[test]
    fn colour_follows_flag_and_format() {
        assert!(manager(OutputFormat::Human, false, false).supports_color());
        assert!(!manager(OutputFormat::Human, false, true).supports_color());
        assert!(!manager(OutputFormat::Plain, false, false).supports_color());
    }

    #[test]
    fn config_can_turn_colour_off() {
        let mut config = AppConfig::default();
        config.output.no_color = true;
        let args = GlobalArgs {
            output_format: OutputFormat::Human,
            ..GlobalArgs::default()
        };
        assert!(!OutputManager::new(&args, &config).supports_color());
    }

    #[test]
    fn plain_status_lines_carry_only_the_mark() {
        let out = manager(OutputFormat::Plain, false, false);
        assert_eq!(out.status(Status::Done, "wrote 3 files"), "\u{2713} wrote 3 files");
        assert_eq!(out.status(Status::Failed, "b.sh"), "\u{2717} b.sh");
    }

    #[test]
    fn json_format_is_reported() {
        assert!(manager(OutputFormat::Json, false, false).is_json());
        assert!(!manager(OutputFormat::Human, false, false).is_json());
    }
}
