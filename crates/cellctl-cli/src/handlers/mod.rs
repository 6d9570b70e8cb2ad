//! Command handlers.
//!
//! Handlers follow one pattern:
//! - Signature: `pub fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that call the supervisor and format output for the
//!   terminal; no lifecycle logic lives here

pub mod paths;
pub mod restart;
pub mod start;
pub mod status;
pub mod stop;

use cellctl_core::domain::StopOutcome;

use crate::bootstrap::CliContext;
use crate::presentation::stop_notice;

/// Print the notice for a stop outcome, if any.
fn report_stop(ctx: &CliContext, outcome: StopOutcome) {
    let identity = ctx.config.cell.identity_name();
    if let Some((text, warning)) = stop_notice(identity, outcome, ctx.config.stop_timeout) {
        if warning {
            eprintln!("{text}");
        } else {
            println!("{text}");
        }
    }
}
