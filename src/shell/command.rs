//! External command execution.

use crate::error::Result;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// A program and its arguments, run without an intermediate shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name or path.
    pub program: String,

    /// Arguments passed to the program.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Parse a whitespace-separated command line such as `python3 -m pip`.
    ///
    /// Returns `None` for an empty line. No quoting rules are applied.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = line.split_whitespace();
        let program = words.next()?;
        Some(Self {
            program: program.to_string(),
            args: words.map(str::to_string).collect(),
        })
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", quote_arg(&self.program))?;
        for arg in &self.args {
            write!(f, " {}", quote_arg(arg))?;
        }
        Ok(())
    }
}

/// Quote an argument for display in a POSIX shell.
pub fn quote_arg(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "_-./=:,+@%".contains(c));
    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output (empty unless captured).
    pub stdout: String,

    /// Standard error (empty unless captured).
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Working directory.
    pub cwd: Option<PathBuf>,

    /// Environment variables (merged with system env).
    pub env: BTreeMap<String, String>,

    /// Capture stdout (if false, inherits from parent).
    pub capture_stdout: bool,

    /// Capture stderr (if false, inherits from parent).
    pub capture_stderr: bool,
}

impl CommandOptions {
    /// Options that capture both output streams.
    pub fn captured() -> Self {
        Self {
            capture_stdout: true,
            capture_stderr: true,
            ..Default::default()
        }
    }
}

/// Execute a command and wait for it to finish.
///
/// Returns `Err` only when the program could not be started. A program
/// that runs and exits non-zero yields `Ok` with `success == false`.
pub fn execute(spec: &CommandSpec, options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(&spec.program);
    cmd.args(&spec.args);

    if let Some(cwd) = &options.cwd {
        cmd.current_dir(cwd);
    }

    for (key, value) in &options.env {
        cmd.env(key, value);
    }

    cmd.stdin(Stdio::inherit());
    cmd.stdout(if options.capture_stdout {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });
    cmd.stderr(if options.capture_stderr {
        Stdio::piped()
    } else {
        Stdio::inherit()
    });

    tracing::debug!("Launching: {}", spec);
    let output = cmd.output()?;
    let duration = start.elapsed();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    tracing::debug!(
        "Command exited with {:?} after {:?}",
        output.status.code(),
        duration
    );

    Ok(CommandResult {
        exit_code: output.status.code(),
        stdout,
        stderr,
        duration,
        success: output.status.success(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_splits_program_and_args() {
        let spec = CommandSpec::parse("python3 -m pip").unwrap();
        assert_eq!(spec.program, "python3");
        assert_eq!(spec.args, vec!["-m", "pip"]);
    }

    #[test]
    fn parse_rejects_blank_line() {
        assert!(CommandSpec::parse("   ").is_none());
    }

    #[test]
    fn builder_appends_args() {
        let spec = CommandSpec::new("pip")
            .arg("install")
            .args(["-r", "requirements.txt"]);
        assert_eq!(spec.args, vec!["install", "-r", "requirements.txt"]);
    }

    #[test]
    fn display_quotes_unsafe_args() {
        let spec = CommandSpec::new("pip").args(["install", "-r", "my reqs.txt"]);
        assert_eq!(spec.to_string(), "pip install -r 'my reqs.txt'");
    }

    #[test]
    fn quote_arg_escapes_single_quotes() {
        assert_eq!(quote_arg("it's"), r"'it'\''s'");
        assert_eq!(quote_arg(""), "''");
        assert_eq!(quote_arg("requests>=2.0"), "'requests>=2.0'");
    }

    #[cfg(unix)]
    #[test]
    fn execute_successful_command() {
        let spec = CommandSpec::new("sh").args(["-c", "echo hello"]);
        let result = execute(&spec, &CommandOptions::captured()).unwrap();

        assert!(result.success);
        assert_eq!(result.exit_code, Some(0));
        assert!(result.stdout.contains("hello"));
    }

    #[cfg(unix)]
    #[test]
    fn execute_failing_command_reports_code() {
        let spec = CommandSpec::new("sh").args(["-c", "exit 7"]);
        let result = execute(&spec, &CommandOptions::captured()).unwrap();

        assert!(!result.success);
        assert_eq!(result.exit_code, Some(7));
    }

    #[cfg(unix)]
    #[test]
    fn execute_with_env_and_cwd() {
        let temp = tempfile::TempDir::new().unwrap();
        let mut options = CommandOptions::captured();
        options.cwd = Some(temp.path().to_path_buf());
        options
            .env
            .insert("MY_VAR".to_string(), "my_value".to_string());

        let spec = CommandSpec::new("sh").args(["-c", "echo $MY_VAR; pwd"]);
        let result = execute(&spec, &options).unwrap();

        assert!(result.success);
        assert!(result.stdout.contains("my_value"));
    }

    #[test]
    fn execute_missing_program_is_error() {
        let spec = CommandSpec::new("definitely-not-a-real-program-7f3a");
        let result = execute(&spec, &CommandOptions::captured());
        assert!(result.is_err());
    }
}
