//! Status command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_status, status_json};

/// Print the cell's status as text or JSON. Read-only.
pub fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let status = ctx
        .supervisor
        .status(&ctx.config)
        .map_err(|e| CliError::operation("inspect", ctx.cell_name(), e))?;

    if json {
        println!("{}", status_json(&status)?);
    } else {
        println!("{}", format_status(&status));
    }
    Ok(())
}
