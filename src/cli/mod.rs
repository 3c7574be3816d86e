//! CLI argument parsing for planloop.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// planloop: break a goal into subtasks, edit the plan, and solve it with a
/// text generator.
///
/// The generator is any command that prints text for a prompt, configured
/// in `planloop.yaml`.
#[derive(Parser, Debug)]
#[command(name = "planloop")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: ./planloop.yaml).
    #[arg(long, global = true, env = "PLANLOOP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Append an NDJSON event journal to this file.
    #[arg(long, global = true)]
    pub event_log: Option<PathBuf>,
}

/// Available commands for planloop.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a default planloop.yaml in the current directory.
    Init(InitArgs),

    /// Break a goal into subtasks and print the plan.
    Plan(PlanArgs),

    /// Plan a goal, solve every subtask, and print the solutions.
    Run(RunArgs),

    /// Interactive session: plan, edit, solve and reflect.
    ///
    /// Reads one command per line from stdin. Type `help` for the list.
    Shell,

    /// Print the effective configuration as YAML.
    Config,
}

/// Arguments for the `init` command.
#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Overwrite an existing planloop.yaml.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for the `plan` command.
#[derive(Parser, Debug)]
pub struct PlanArgs {
    /// The goal to break down.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,
}

/// Arguments for the `run` command.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// The goal to break down and solve.
    #[arg(required = true, num_args = 1..)]
    pub query: Vec<String>,

    /// Also print a reflection for each solution.
    #[arg(long)]
    pub reflect: bool,
}

impl PlanArgs {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

impl RunArgs {
    pub fn query_text(&self) -> String {
        self.query.join(" ")
    }
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_plan_joins_words() {
        let cli = Cli::try_parse_from(["planloop", "plan", "write", "a", "novel"]).unwrap();
        if let Command::Plan(args) = cli.command {
            assert_eq!(args.query_text(), "write a novel");
        } else {
            panic!("Expected Plan command");
        }
    }

    #[test]
    fn parse_plan_requires_query() {
        assert!(Cli::try_parse_from(["planloop", "plan"]).is_err());
    }

    #[test]
    fn parse_run_with_reflect() {
        let cli = Cli::try_parse_from(["planloop", "run", "--reflect", "ship it"]).unwrap();
        if let Command::Run(args) = cli.command {
            assert!(args.reflect);
            assert_eq!(args.query_text(), "ship it");
        } else {
            panic!("Expected Run command");
        }
    }

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "planloop",
            "shell",
            "--config",
            "custom.yaml",
            "--event-log",
            "events.ndjson",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Shell));
        assert_eq!(cli.global.config, Some(PathBuf::from("custom.yaml")));
        assert_eq!(cli.global.event_log, Some(PathBuf::from("events.ndjson")));
    }

    #[test]
    fn parse_init_force() {
        let cli = Cli::try_parse_from(["planloop", "init", "--force"]).unwrap();
        if let Command::Init(args) = cli.command {
            assert!(args.force);
        } else {
            panic!("Expected Init command");
        }
    }

    #[test]
    fn parse_config() {
        let cli = Cli::try_parse_from(["planloop", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config));
    }
}
