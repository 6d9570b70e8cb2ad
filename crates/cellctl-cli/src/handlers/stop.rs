//! Stop command handler.

use super::report_stop;
use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let outcome = ctx
        .supervisor
        .stop(&ctx.config)
        .map_err(|e| CliError::operation("stop", ctx.cell_name(), e))?;
    report_stop(ctx, outcome);
    Ok(())
}
