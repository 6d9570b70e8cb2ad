//! Paths command handler.
//!
//! Displays every name and path derived for the cell, in `key = value`
//! format. Needs no privileges and touches nothing on disk.

use cellctl_core::domain::Cell;

use crate::bootstrap::cell_layout;
use crate::error::CliError;
use crate::parser::Cli;

pub fn execute(cli: &Cli) -> Result<(), CliError> {
    let cell = Cell::resolve(&cli.cell, &cell_layout(cli))?;
    println!("{cell}");
    Ok(())
}
