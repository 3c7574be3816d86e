//! Generator subprocess executor.
//!
//! Runs the configured command with timeout, capturing output to scratch
//! files rather than pipes.

use crate::agent::config::{COMMAND_VARIABLES, GeneratorProfile};
use crate::agent::prompt::{TemplateError, render_template};
use crate::error::GenerationError;
use std::collections::HashMap;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Number of trailing stderr bytes kept in a failure message.
const STDERR_TAIL_BYTES: usize = 2000;

static CALL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Result of one generator invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code of the process (None if killed or didn't exit normally).
    pub exit_code: Option<i32>,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Whether the process was killed due to timeout.
    pub timed_out: bool,
    /// Directory holding the prompt and log files for this call.
    pub call_dir: PathBuf,
}

impl CommandOutput {
    /// Check if the generator exited cleanly.
    pub fn is_success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }
}

/// Run the generator command once for `prompt`.
///
/// The prompt is written to `prompt.txt` inside a fresh call directory under
/// the profile's work dir, so commands can use either `{prompt}` or
/// `{prompt_file}`. Each word of the command template is rendered on its
/// own, so prompt text containing quotes or spaces stays one argument.
pub fn execute_generator(
    profile: &GeneratorProfile,
    prompt: &str,
    max_tokens: usize,
) -> Result<CommandOutput, GenerationError> {
    if !profile.is_configured() {
        return Err(GenerationError::NotConfigured);
    }

    let words = shell_words::split(&profile.command).map_err(|e| {
        GenerationError::InvalidCommand(format!(
            "failed to parse '{}': {}",
            profile.command, e
        ))
    })?;

    let call_dir = new_call_dir(&profile.effective_work_dir())?;

    // Scratch files outlive the call only when it produced an output.
    run_in_call_dir(profile, &words, prompt, max_tokens, &call_dir).inspect_err(|_| {
        let _ = fs::remove_dir_all(&call_dir);
    })
}

fn run_in_call_dir(
    profile: &GeneratorProfile,
    words: &[String],
    prompt: &str,
    max_tokens: usize,
    call_dir: &Path,
) -> Result<CommandOutput, GenerationError> {
    let prompt_path = call_dir.join("prompt.txt");
    fs::write(&prompt_path, prompt).map_err(|e| io_error("write prompt file", &prompt_path, e))?;

    let mut variables = HashMap::new();
    variables.insert("prompt".to_string(), prompt.to_string());
    variables.insert(
        "prompt_file".to_string(),
        prompt_path.display().to_string(),
    );
    variables.insert("max_tokens".to_string(), max_tokens.to_string());

    let args = words
        .iter()
        .map(|word| render_template(word, &variables))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| describe_template_error(&profile.command, e))?;

    let Some((program, cmd_args)) = args.split_first() else {
        return Err(GenerationError::InvalidCommand(format!(
            "command is empty after parsing: '{}'",
            profile.command
        )));
    };

    let stdout_path = call_dir.join("stdout.log");
    let stderr_path = call_dir.join("stderr.log");
    let stdout_file =
        File::create(&stdout_path).map_err(|e| io_error("create stdout log", &stdout_path, e))?;
    let stderr_file =
        File::create(&stderr_path).map_err(|e| io_error("create stderr log", &stderr_path, e))?;

    let mut command = Command::new(program);
    command
        .args(cmd_args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout_file))
        .stderr(Stdio::from(stderr_file));

    for (key, value) in &profile.environment {
        command.env(key, value);
    }

    let mut child = command.spawn().map_err(|e| GenerationError::Spawn {
        program: program.clone(),
        message: format!("{}. Fix: ensure the command is installed and in PATH.", e),
    })?;

    let timeout = Duration::from_secs(profile.timeout_seconds);
    let (exit_code, timed_out) = wait_with_timeout(&mut child, timeout)?;

    let stdout = read_lossy(&stdout_path)?;
    let stderr = read_lossy(&stderr_path)?;

    Ok(CommandOutput {
        exit_code,
        stdout,
        stderr,
        timed_out,
        call_dir: call_dir.to_path_buf(),
    })
}

/// Create a unique directory for one call's scratch files.
fn new_call_dir(work_dir: &Path) -> Result<PathBuf, GenerationError> {
    let n = CALL_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = work_dir.join(format!("call-{}-{}", std::process::id(), n));
    fs::create_dir_all(&dir).map_err(|e| io_error("create scratch directory", &dir, e))?;
    Ok(dir)
}

/// Wait for a child process with timeout.
///
/// Returns (exit_code, timed_out).
fn wait_with_timeout(
    child: &mut Child,
    timeout: Duration,
) -> Result<(Option<i32>, bool), GenerationError> {
    let start = Instant::now();
    let poll_interval = Duration::from_millis(50);

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((status.code(), false)),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    // On Unix this is SIGKILL; on Windows it is TerminateProcess.
                    let _ = child.kill();
                    let _ = child.wait();
                    return Ok((None, true));
                }
                std::thread::sleep(poll_interval);
            }
            Err(e) => {
                return Err(GenerationError::Io(format!(
                    "failed to check generator process status: {}",
                    e
                )));
            }
        }
    }
}

fn read_lossy(path: &Path) -> Result<String, GenerationError> {
    let bytes = fs::read(path).map_err(|e| io_error("read output", path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Keep the end of stderr, where the actual error usually is.
pub(crate) fn stderr_tail(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.len() <= STDERR_TAIL_BYTES {
        return trimmed.to_string();
    }
    let mut start = trimmed.len() - STDERR_TAIL_BYTES;
    while !trimmed.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &trimmed[start..])
}

fn io_error(action: &str, path: &Path, e: std::io::Error) -> GenerationError {
    GenerationError::Io(format!("failed to {} '{}': {}", action, path.display(), e))
}

fn describe_template_error(command: &str, e: TemplateError) -> GenerationError {
    match e {
        TemplateError::UndefinedVariable { name, .. } => GenerationError::InvalidCommand(format!(
            "command template references undefined variable '{}'\n\
             Command: {}\n\
             Available variables: {}",
            name,
            command,
            COMMAND_VARIABLES.join(", ")
        )),
        other => GenerationError::InvalidCommand(format!("{} (command: {})", other, command)),
    }
}
