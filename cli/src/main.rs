#![deny(missing_docs)]

//! # Petstore API Tests CLI
//!
//! Command Line Interface for the Petstore API test harness.
//!
//! Supported Commands:
//! - `run`: Executes the pet, store and user suites and writes a JSON report.
//! - `schema`: Prints a fully resolved schema from the API description.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod error;
mod logging;
mod report;
mod run;
mod schema_cmd;
mod suite;

#[derive(Parser, Debug)]
#[clap(author, version, about = "Petstore API test harness")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the scenario suites against a Petstore deployment.
    Run(run::RunArgs),
    /// Resolve and print schemas from the API description.
    Schema(schema_cmd::SchemaArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(args),
        Commands::Schema(args) => schema_cmd::execute(args),
    };

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
