//! External command execution
//!
//! Every VCS and toolchain invocation goes through [`CommandRunner`], so tests
//! can substitute canned output and the CLI can echo what is being run.

use std::process::Stdio;

#[cfg(test)]
use mockall::automock;
use tokio::process::Command;
use tracing::debug;

/// Error returned when an external command does not succeed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The command ran and exited non-zero with diagnostics on stderr
    #[error("{0}")]
    Failed(String),

    /// The command could not be started, or failed without saying why
    #[error("cannot run {command}: {reason}")]
    Launch { command: String, reason: String },
}

/// Capability that runs a program and returns its standard output
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` and return stdout on success
    async fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError>;
}

/// [`CommandRunner`] backed by real child processes
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner {
    echo_commands: bool,
}

impl ProcessRunner {
    /// Creates a runner; with `echo_commands` every command line is printed to stderr
    pub fn new(echo_commands: bool) -> Self {
        Self { echo_commands }
    }
}

#[async_trait::async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<String, CommandError> {
        if self.echo_commands {
            eprintln!("{}", shell_command_line(program, args));
        }
        debug!("Running command: {} {:?}", program, args);

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| CommandError::Launch {
                command: quoted_argv(program, args),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        debug!("Command {} failed with status {}", program, output.status);
        if !stderr.is_empty() {
            return Err(CommandError::Failed(stderr.to_string()));
        }

        Err(CommandError::Launch {
            command: quoted_argv(program, args),
            reason: output.status.to_string(),
        })
    }
}

/// Renders a command the way a shell user would type it, quoting each argument.
pub fn shell_command_line(program: &str, args: &[String]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&shell_quote(arg));
    }
    line
}

/// Single-quotes `s` for a POSIX shell.
fn shell_quote(s: &str) -> String {
    format!("'{}'", s.replace('\'', r#"'"'"'"#))
}

fn quoted_argv(program: &str, args: &[String]) -> String {
    let argv: Vec<&str> = std::iter::once(program)
        .chain(args.iter().map(String::as_str))
        .collect();
    format!("{:?}", argv)
}

/// Convenience for building argument vectors from string literals.
pub(crate) fn args<const N: usize>(parts: [&str; N]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}
