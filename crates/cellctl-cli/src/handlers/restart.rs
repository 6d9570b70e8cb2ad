//! Restart command handler.
//!
//! The stop half never aborts the restart; its result is only reported.

use super::report_stop;
use crate::bootstrap::CliContext;
use crate::error::CliError;

pub fn execute(ctx: &CliContext) -> Result<(), CliError> {
    let outcome = ctx
        .supervisor
        .restart(&ctx.config)
        .map_err(|e| CliError::operation("restart", ctx.cell_name(), e))?;

    match outcome.stop {
        Ok(stop) => report_stop(ctx, stop),
        Err(e) => eprintln!("!!! stop failed, started anyway: {e}"),
    }
    println!("{}", outcome.pid);
    Ok(())
}
