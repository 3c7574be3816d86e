//! planloop: break a goal into subtasks, edit the plan, and solve each
//! subtask with an external text generator.
//!
//! This is the main entry point for the `planloop` CLI. It parses arguments,
//! dispatches to the appropriate command handler, and handles errors with
//! proper exit codes.

mod agent;
mod cli;
mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod events;
pub mod exit_codes;
pub mod fs;
pub mod plan;
pub mod session;

#[cfg(test)]
mod test_support;

use cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match commands::dispatch(cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}
