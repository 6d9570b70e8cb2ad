//! Subcommands.

use clap::Subcommand;

/// Lifecycle operations on the selected cell.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start the cell unless it is already running; prints the new pid
    Start,

    /// Kill the cell and wait for it to exit
    Stop,

    /// Stop the cell, then start it again
    Restart,

    /// Show whether the cell is running and which identity it uses
    Status {
        /// Print the status as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the resolved paths and names for the cell
    Paths,
}
