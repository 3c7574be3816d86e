//! Implementation of the interactive `planloop shell` command.
//!
//! Reads one command per line and answers with the flat text that
//! [`Session::perform`] produces. Every action runs to completion before the
//! next line is read.

use crate::context::AppContext;
use crate::error::{PlanloopError, Result};
use crate::session::{Action, Session};
use std::io::{BufRead, Write};

const PROMPT: &str = "planloop> ";

const HELP: &str = "\
Commands:
  plan <goal>          Break a goal into subtasks (replaces the plan)
  show                 Print the current plan
  add <text>           Append a subtask
  modify <n> <text>    Replace subtask n (1-based)
  delete <n>           Remove subtask n (1-based)
  solve                Solve every subtask
  reflect              Solve again and tag each solution adequate/inadequate
  help                 Show this help
  quit                 Leave the shell";

/// One parsed shell line.
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Run(Action),
    Help,
    Quit,
    Empty,
}

/// Execute the `planloop shell` command.
pub fn cmd_shell(ctx: &AppContext) -> Result<()> {
    if !ctx.config.generator.is_configured() {
        eprintln!("Note: no generator configured; only editing commands will succeed.");
    }
    let mut session = ctx.session();
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_shell(&mut session, stdin.lock(), &mut stdout.lock())
}

fn run_shell<R: BufRead, W: Write>(session: &mut Session, input: R, out: &mut W) -> Result<()> {
    writeln!(out, "Type `help` for commands.").map_err(write_error)?;
    let mut lines = input.lines();

    loop {
        write!(out, "{}", PROMPT).map_err(write_error)?;
        out.flush().map_err(write_error)?;

        let Some(line) = lines.next() else {
            writeln!(out).map_err(write_error)?;
            return Ok(());
        };
        let line = line.map_err(|e| {
            PlanloopError::UserError(format!("failed to read input: {}", e))
        })?;

        let reply = match parse_line(&line) {
            Ok(ShellCommand::Quit) => return Ok(()),
            Ok(ShellCommand::Empty) => continue,
            Ok(ShellCommand::Help) => HELP.to_string(),
            Ok(ShellCommand::Run(action)) => {
                let show_empty = matches!(action, Action::Show);
                let text = session.perform(action);
                if text.is_empty() && show_empty {
                    "(no subtasks)".to_string()
                } else {
                    text
                }
            }
            Err(message) => message,
        };

        if !reply.is_empty() {
            writeln!(out, "{}", reply).map_err(write_error)?;
        }
    }
}

/// Parse one input line.
///
/// Errors are messages for the user; the plan is not touched.
fn parse_line(line: &str) -> std::result::Result<ShellCommand, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(ShellCommand::Empty);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_lowercase().as_str() {
        "plan" | "decompose" => ShellCommand::Run(Action::Decompose {
            query: required_text(rest, "plan <goal>")?,
        }),
        "show" | "list" => ShellCommand::Run(Action::Show),
        "add" => ShellCommand::Run(Action::Add {
            text: required_text(rest, "add <text>")?,
        }),
        "modify" | "edit" => {
            let (position, text) = match rest.split_once(char::is_whitespace) {
                Some((n, text)) => (n, text.trim()),
                None => (rest, ""),
            };
            ShellCommand::Run(Action::Modify {
                position: parse_position(position, "modify <n> <text>")?,
                text: required_text(text, "modify <n> <text>")?,
            })
        }
        "delete" | "rm" => ShellCommand::Run(Action::Delete {
            position: parse_position(rest, "delete <n>")?,
        }),
        "solve" => ShellCommand::Run(Action::SolveAll),
        "reflect" => ShellCommand::Run(Action::ReflectAll),
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => {
            return Err(format!(
                "Unknown command '{}'. Type `help` for commands.",
                other
            ));
        }
    };

    Ok(command)
}

fn required_text(text: &str, usage: &str) -> std::result::Result<String, String> {
    if text.is_empty() {
        Err(format!("Subtask text cannot be empty. Usage: {}", usage))
    } else {
        Ok(text.to_string())
    }
}

fn parse_position(raw: &str, usage: &str) -> std::result::Result<usize, String> {
    raw.parse::<usize>().map_err(|_| {
        format!(
            "Invalid position '{}': expected a number starting at 1. Usage: {}",
            raw, usage
        )
    })
}

fn write_error(e: std::io::Error) -> PlanloopError {
    PlanloopError::UserError(format!("failed to write output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::events::EventLog;
    use crate::test_support::ScriptedGenerator;

    fn run(generator: ScriptedGenerator, input: &str) -> String {
        let mut session =
            Session::new(Box::new(generator), &Config::default(), EventLog::disabled());
        let mut out = Vec::new();
        run_shell(&mut session, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_edit_commands() {
        assert_eq!(
            parse_line("modify 2 Write the intro").unwrap(),
            ShellCommand::Run(Action::Modify {
                position: 2,
                text: "Write the intro".to_string()
            })
        );
        assert_eq!(
            parse_line("  DELETE 3 ").unwrap(),
            ShellCommand::Run(Action::Delete { position: 3 })
        );
        assert_eq!(
            parse_line("add   Proofread   everything").unwrap(),
            ShellCommand::Run(Action::Add {
                text: "Proofread   everything".to_string()
            })
        );
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_line("").unwrap(), ShellCommand::Empty);
        assert_eq!(parse_line("help").unwrap(), ShellCommand::Help);
        assert_eq!(parse_line("exit").unwrap(), ShellCommand::Quit);
        assert_eq!(
            parse_line("solve").unwrap(),
            ShellCommand::Run(Action::SolveAll)
        );
        assert_eq!(
            parse_line("reflect").unwrap(),
            ShellCommand::Run(Action::ReflectAll)
        );
        assert_eq!(
            parse_line("plan Write a novel").unwrap(),
            ShellCommand::Run(Action::Decompose {
                query: "Write a novel".to_string()
            })
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(parse_line("delete two").unwrap_err().contains("Invalid position 'two'"));
        assert!(parse_line("delete -1").unwrap_err().contains("Invalid position"));
        assert!(parse_line("modify 1").unwrap_err().contains("cannot be empty"));
        assert!(parse_line("add").unwrap_err().contains("cannot be empty"));
        assert!(parse_line("plan").unwrap_err().contains("Usage: plan <goal>"));
        assert!(parse_line("frobnicate").unwrap_err().contains("Unknown command"));
    }

    #[test]
    fn test_position_zero_parses_and_is_rejected_by_session() {
        let output = run(ScriptedGenerator::new().reply("a"), "plan g\ndelete 0\nshow\n");
        assert!(output.contains("Invalid task index: 0 (plan has 1 subtask(s))"));
        assert!(output.ends_with("planloop> a\nplanloop> \n"));
    }

    #[test]
    fn test_full_session_flow() {
        let generator = ScriptedGenerator::new()
            .reply("- Research topic\n- Draft outline")
            .reply("a success")
            .reply("not yet")
            .reply("Success!");
        let input = "plan Write an essay\n\
                     modify 2 Outline sections\n\
                     add Proofread\n\
                     delete 3\n\
                     solve\n\
                     reflect\n\
                     quit\n";

        let output = run(generator, input);

        assert!(output.contains("planloop> Research topic\nDraft outline\n"));
        assert!(output.contains("Research topic\nOutline sections\n"));
        assert!(output.contains("Research topic\nOutline sections\nProofread\n"));
        assert!(output.contains(
            "Task: Research topic\nSolution: a success\n\n\
             Task: Outline sections\nSolution: not yet\n"
        ));
        // Reflect re-solves: "Success!" for the first subtask, script exhausted for the second.
        assert!(output.contains(
            "Reflection on result: The solution seems adequate.\n\n\
             Reflection on result: The solution seems inadequate.\n"
        ));
        assert!(!output.ends_with("planloop> \n"));
    }

    #[test]
    fn test_show_on_empty_plan() {
        let output = run(ScriptedGenerator::new(), "show\n");
        assert!(output.contains("(no subtasks)"));
    }

    #[test]
    fn test_help_and_unknown_command() {
        let output = run(ScriptedGenerator::new(), "help\nbogus\n");
        assert!(output.contains("modify <n> <text>"));
        assert!(output.contains("Unknown command 'bogus'"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let output = run(ScriptedGenerator::new(), "");
        assert_eq!(output, "Type `help` for commands.\nplanloop> \n");
    }
}
