//! `genapp check`: report every problem in a schema without generating.

use serde::Serialize;
use tracing::instrument;

use crate::{
    cli::CheckArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct CheckReport {
    schema: String,
    valid: bool,
    problems: Vec<String>,
}

#[instrument(skip_all, fields(schema = %args.schema.display()))]
pub fn execute(args: CheckArgs, output: OutputManager) -> CliResult<()> {
    let service = super::service();
    let problems = service.check(&args.schema)?;

    if output.is_json() {
        output.json(&CheckReport {
            schema: args.schema.display().to_string(),
            valid: problems.is_empty(),
            problems: problems.iter().map(ToString::to_string).collect(),
        })?;
    } else if problems.is_empty() {
        output.success(&format!("{} is valid", args.schema.display()))?;
    } else {
        output.header(&format!("{}:", args.schema.display()))?;
        for problem in &problems {
            output.error(&problem.to_string())?;
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(CliError::SchemaRejected {
            count: problems.len(),
        })
    }
}
