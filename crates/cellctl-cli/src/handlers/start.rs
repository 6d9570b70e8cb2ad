//! Start command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Start the cell and print its pid.
pub fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let pid = ctx
        .supervisor
        .start(&ctx.config)
        .map_err(|e| CliError::operation("start", ctx.cell_name(), e))?;
    println!("{pid}");
    Ok(())
}
