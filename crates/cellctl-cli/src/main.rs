//! CLI entry point.
//!
//! `paths` is answered straight from the arguments; every other command goes
//! through [`bootstrap`] first, which is the only place the runtime adapters
//! are wired together.

use std::process::ExitCode;

use clap::Parser;

use cellctl_cli::{Cli, CliError, Commands, bootstrap, handlers, logging};

fn main() -> ExitCode {
    // Load environment variables before clap reads CELLCTL_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERR {err}");
            let code = err.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Paths => handlers::paths::execute(cli)?,
        Commands::Start => handlers::start::execute(&bootstrap(cli)?)?,
        Commands::Stop => handlers::stop::execute(&bootstrap(cli)?)?,
        Commands::Restart => handlers::restart::execute(&bootstrap(cli)?)?,
        Commands::Status { json } => handlers::status::execute(&bootstrap(cli)?, *json)?,
    }
    Ok(())
}
