//! Command-line adapter for the cell controller.
//!
//! Parses arguments, composes the runtime adapters into a
//! [`cellctl_core::Supervisor`] and renders operation results.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

// Used by the binary only
use anyhow as _;
use dotenvy as _;

#[cfg(test)]
use tempfile as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod parser;
pub mod presentation;

// Re-export primary types for convenient access
pub use bootstrap::{CliContext, bootstrap, cell_layout, controller_config};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
