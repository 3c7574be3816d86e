//! Implementation of the `planloop init` command.
//!
//! Writes a commented `planloop.yaml` with the built-in defaults into the
//! current directory.

use crate::cli::InitArgs;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::{PlanloopError, Result};
use crate::fs::atomic_write_file;
use std::path::Path;

/// Starter configuration. Must parse to `Config::default()` plus a command.
const CONFIG_TEMPLATE: &str = r#"# planloop configuration

generator:
  # Command that prints generated text for a prompt.
  # Placeholders: {prompt} {prompt_file} {max_tokens}
  command: "llm -m gpt2 {prompt}"
  timeout_seconds: 300
  environment:
    KMP_DUPLICATE_LIB_OK: "TRUE"

decompose:
  max_tokens: 150
  prompt_template: "Break down the following task into detailed, actionable steps:\n\nTask: {query}\n\nSubtasks:"

solve:
  # Must be smaller than decompose.max_tokens.
  max_tokens: 100
  prompt_template: "How to solve the following task:\n\nTask: {task}\n\nSolution:"

# Append an NDJSON journal of session actions.
# events_path: planloop-events.ndjson
"#;

/// Execute the `planloop init` command.
pub fn cmd_init(args: InitArgs) -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_FILE);
    write_config_template(path, args.force)?;

    println!("Created {}", path.display());
    println!();
    println!("Next steps:");
    println!("  1. Set `generator.command` to a command that prints text for {{prompt}}");
    println!("  2. Run `planloop shell` to plan, edit and solve interactively");

    Ok(())
}

fn write_config_template(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(PlanloopError::UserError(format!(
            "'{}' already exists\n\
             Fix: use `planloop init --force` to overwrite it.",
            path.display()
        )));
    }

    // Never write a file planloop itself would reject.
    Config::from_yaml(CONFIG_TEMPLATE)?;
    atomic_write_file(path, CONFIG_TEMPLATE)
}
