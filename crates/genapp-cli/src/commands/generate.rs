//! Implementation of the `genapp generate` command.
//!
//! Responsibility: merge config, flags and the execution file into
//! [`GenerationSettings`], run the core generator, and display the report.

use std::io::IsTerminal as _;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, instrument};

use genapp_core::application::{GenerationReport, GenerationSettings};

use crate::{
    cli::{GenerateArgs, GlobalArgs},
    config::{AppConfig, ExecFile, resolve_generate},
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute `genapp generate`.
///
/// 1. Resolve settings (exec file > flags > env > config file > defaults)
/// 2. Confirm `--force` unless `--yes` or `--quiet`
/// 3. Prepare the schema and plan the tasks; schema errors stop here
/// 4. Execute the tasks and print the report
#[instrument(skip_all)]
pub fn execute(
    args: GenerateArgs,
    global: &GlobalArgs,
    config: &AppConfig,
    exec: Option<&ExecFile>,
    output: OutputManager,
) -> CliResult<()> {
    let resolved = resolve_generate(&args, config, exec)?;
    let settings = &resolved.settings;

    debug!(
        schema = %resolved.schema.display(),
        model_dir = %settings.model_dir.display(),
        output_dir = %settings.output_dir.display(),
        replace = settings.replace,
        noop = settings.noop,
        force = settings.force,
        defines = settings.defines.len(),
        debug_requested = resolved.debug,
        exec_quiet = resolved.quiet,
        "Settings resolved"
    );

    if settings.force && settings.noop {
        output.warning("Dry run: the output directory is not removed")?;
    }

    if settings.force && !settings.noop && !args.yes && !output.is_quiet() {
        if !confirm_force(&settings.output_dir)? {
            return Err(CliError::Cancelled);
        }
    }

    let service = super::service();
    let db = service.prepare(&resolved.schema)?;
    let tasks = service.plan(&db)?;

    let spinner = spinner(&output);
    spinner.set_message(format!(
        "Generating {} ({}) into {}",
        db.name,
        db.sql_type,
        settings.output_dir.display()
    ));
    let report = service.execute(&db, &tasks, settings);
    spinner.finish_and_clear();
    let report = report?;

    if output.is_json() {
        output.json(&report)?;
    } else {
        print_report(&report, settings, global.verbose > 0, &output)?;
    }

    if report.is_success() {
        Ok(())
    } else {
        Err(CliError::GenerationIncomplete {
            failed: report.failures.len(),
            total: report.attempted(),
        })
    }
}

fn spinner(output: &OutputManager) -> ProgressBar {
    if output.is_quiet() || output.is_json() || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let template = if output.supports_color() {
        "{spinner:.green} {msg}"
    } else {
        "{spinner} {msg}"
    };
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template(template) {
        bar.set_style(style);
    }
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn print_report(
    report: &GenerationReport,
    settings: &GenerationSettings,
    verbose: bool,
    output: &OutputManager,
) -> CliResult<()> {
    if report.dry_run {
        output.info(&format!(
            "Dry run: {} file(s) would be written to {}",
            report.written.len(),
            settings.output_dir.display()
        ))?;
        for path in &report.written {
            output.item(&path.display().to_string())?;
        }
    } else {
        if verbose {
            for path in &report.written {
                output.item(&path.display().to_string())?;
            }
        }
        output.success(&format!(
            "Wrote {} file(s) to {}",
            report.written.len(),
            settings.output_dir.display()
        ))?;
    }

    for failure in &report.failures {
        let shown = failure
            .path
            .strip_prefix(&settings.output_dir)
            .unwrap_or(&failure.path);
        output.error(&format!("{}: {}", shown.display(), failure.error))?;
    }
    Ok(())
}

/// Ask before deleting the output directory.
///
/// Without a terminal there is nobody to ask; `--yes` is required instead.
#[cfg(feature = "interactive")]
fn confirm_force(dir: &Path) -> CliResult<bool> {
    if !std::io::stdin().is_terminal() {
        return Err(CliError::InvalidInput {
            message: "--force removes the output directory; pass --yes to confirm".into(),
            source: None,
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(format!("Remove {} before generating?", dir.display()))
        .default(false)
        .interact()
        .map_err(|e| CliError::IoError {
            message: "failed to read confirmation".into(),
            source: std::io::Error::other(e),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm_force(_dir: &Path) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}
