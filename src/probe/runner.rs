//! Command execution capability.
//!
//! Renderers never spawn processes themselves; they go through a
//! [`CommandRunner`] so the probe can be replaced in tests. A non-zero exit
//! status is an ordinary [`CommandOutput`], not an error.

use log::{debug, warn};
use std::process::{Command, Output, Stdio};
use std::time::{Duration, Instant};

/// Default time allowed for a probe command.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit status; -1 when the process was terminated by a signal
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(status: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            status,
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.status == 0
    }

    fn from_output(output: Output) -> Self {
        Self {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }
}

/// Errors raised when a command could not be run to completion.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Empty command line")]
    EmptyCommand,
    #[error("Failed to spawn {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Command '{command}' timed out after {timeout_secs}s")]
    Timeout { command: String, timeout_secs: u64 },
    #[error("Failed to wait for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

/// Runs a command line and reports its exit status and output.
pub trait CommandRunner: Send + Sync {
    fn run(&self, command: &str) -> Result<CommandOutput, ProbeError>;
}

impl<F> CommandRunner for F
where
    F: Fn(&str) -> Result<CommandOutput, ProbeError> + Send + Sync,
{
    fn run(&self, command: &str) -> Result<CommandOutput, ProbeError> {
        self(command)
    }
}

/// Runs commands on the local host without a shell.
///
/// The command line is split on whitespace; the process is killed if it
/// outlives the timeout.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, command: &str) -> Result<CommandOutput, ProbeError> {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or(ProbeError::EmptyCommand)?;
        let args: Vec<&str> = parts.collect();

        debug!("Executing {} {:?} (timeout {}s)", program, args, self.timeout.as_secs());

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| ProbeError::Spawn {
                program: program.to_string(),
                source,
            })?;

        let start = Instant::now();
        let poll_interval = Duration::from_millis(50);

        loop {
            match child.try_wait() {
                Ok(Some(_)) => {
                    let output = child.wait_with_output().map_err(|source| ProbeError::Wait {
                        program: program.to_string(),
                        source,
                    })?;
                    let result = CommandOutput::from_output(output);
                    debug!(
                        "{} exited with status {} after {}ms",
                        program,
                        result.status,
                        start.elapsed().as_millis()
                    );
                    return Ok(result);
                }
                Ok(None) => {
                    if start.elapsed() > self.timeout {
                        warn!("{} timed out after {}s, killing", program, self.timeout.as_secs());
                        if let Err(e) = child.kill() {
                            warn!("Failed to kill {}: {}", program, e);
                        }
                        // Reap the killed process
                        let _ = child.wait();
                        return Err(ProbeError::Timeout {
                            command: command.to_string(),
                            timeout_secs: self.timeout.as_secs(),
                        });
                    }
                    std::thread::sleep(poll_interval);
                }
                Err(source) => {
                    return Err(ProbeError::Wait {
                        program: program.to_string(),
                        source,
                    });
                }
            }
        }
    }
}
