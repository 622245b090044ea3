//! `genapp plan`: print the files a schema would produce.

use serde::Serialize;
use tracing::instrument;

use crate::{
    cli::PlanArgs,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct PlannedFile {
    path: String,
    model: String,
    mode: String,
}

#[instrument(skip_all, fields(schema = %args.schema.display()))]
pub fn execute(args: PlanArgs, output: OutputManager) -> CliResult<()> {
    let service = super::service();
    let db = service
        .prepare(&args.schema)
        .with_cli_context(|| "preparing schema")?;
    let tasks = service.plan(&db)?;

    let planned: Vec<PlannedFile> = tasks
        .iter()
        .map(|task| PlannedFile {
            path: match &args.output_dir {
                Some(root) => task.output_path(root).display().to_string(),
                None => task.output.to_string(),
            },
            model: task.model.clone(),
            mode: task.mode.to_string(),
        })
        .collect();

    if output.is_json() {
        output.json(&planned)?;
        return Ok(());
    }

    output.header(&format!(
        "{} ({}): {} task(s)",
        db.name,
        db.sql_type,
        planned.len()
    ))?;
    for file in &planned {
        output.item(&format!("{:<8} {}", file.mode, file.path))?;
    }
    Ok(())
}
