//! Fake HAL implementation for testing.
//!
//! This implementation records all commands without executing them and answers with
//! scripted output, allowing CI-safe testing without a device attached.

use super::ProcessOps;
use crate::{HalError, HalResult};
#[cfg(unix)]
use std::os::unix::process::ExitStatusExt;
#[cfg(windows)]
use std::os::windows::process::ExitStatusExt;
use std::process::{ExitStatus, Output};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Command {
        program: String,
        args: Vec<String>,
        timeout_secs: Option<u64>,
    },
}

impl Operation {
    pub fn args(&self) -> &[String] {
        match self {
            Operation::Command { args, .. } => args,
        }
    }
}

/// Scripted answer for a command.
#[derive(Debug, Clone)]
pub enum FakeResponse {
    Output {
        code: i32,
        stdout: String,
        stderr: String,
    },
    NotFound,
    TimedOut,
}

impl FakeResponse {
    pub fn success(stdout: &str) -> Self {
        FakeResponse::Output {
            code: 0,
            stdout: stdout.to_string(),
            stderr: String::new(),
        }
    }

    pub fn failure(code: i32, stderr: &str) -> Self {
        FakeResponse::Output {
            code,
            stdout: String::new(),
            stderr: stderr.to_string(),
        }
    }
}

/// Shared state for FakeHal operations.
#[derive(Debug, Clone, Default)]
struct FakeHalState {
    /// All operations that were recorded
    operations: Vec<Operation>,
    /// Responses keyed by the trailing arguments they answer
    responses: Vec<(Vec<String>, FakeResponse)>,
}

/// Fake HAL implementation that records commands without executing them.
///
/// A command is answered by the first scripted response whose key is a suffix of the
/// command's argument list; unmatched commands succeed with empty output.
#[derive(Debug, Clone, Default)]
pub struct FakeHal {
    state: Arc<Mutex<FakeHalState>>,
}

impl FakeHal {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeHalState::default())),
        }
    }

    /// Script the answer for commands ending with `args_suffix`.
    pub fn respond(&self, args_suffix: &[&str], response: FakeResponse) -> &Self {
        let key = args_suffix.iter().map(|s| s.to_string()).collect();
        self.state.lock().unwrap().responses.push((key, response));
        self
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    fn record_operation(&self, op: Operation) {
        self.state.lock().unwrap().operations.push(op);
    }

    fn lookup(&self, args: &[String]) -> Option<FakeResponse> {
        let state = self.state.lock().unwrap();
        state
            .responses
            .iter()
            .find(|(key, _)| args.ends_with(key))
            .map(|(_, response)| response.clone())
    }
}

fn exit_status(code: i32) -> ExitStatus {
    #[cfg(unix)]
    {
        ExitStatus::from_raw(code << 8)
    }
    #[cfg(windows)]
    {
        ExitStatus::from_raw(code as u32)
    }
}

impl ProcessOps for FakeHal {
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        log::info!("FAKE HAL: {} {}", program, args.join(" "));
        self.record_operation(Operation::Command {
            program: program.to_string(),
            args: args.clone(),
            timeout_secs: timeout.map(|t| t.as_secs()),
        });

        match self.lookup(&args) {
            None => Ok(Output {
                status: exit_status(0),
                stdout: Vec::new(),
                stderr: Vec::new(),
            }),
            Some(FakeResponse::Output {
                code,
                stdout,
                stderr,
            }) => Ok(Output {
                status: exit_status(code),
                stdout: stdout.into_bytes(),
                stderr: stderr.into_bytes(),
            }),
            Some(FakeResponse::NotFound) => Err(HalError::CommandNotFound(program.to_string())),
            Some(FakeResponse::TimedOut) => Err(HalError::CommandTimeout {
                program: program.to_string(),
                timeout_secs: timeout.map(|t| t.as_secs()).unwrap_or_default(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unscripted_command_succeeds_empty() {
        let hal = FakeHal::new();
        let out = hal.command_output("fastboot", &["devices"], None).unwrap();
        assert!(out.status.success());
        assert!(out.stdout.is_empty());
        assert_eq!(hal.operation_count(), 1);
    }

    #[test]
    fn scripted_response_matches_argument_suffix() {
        let hal = FakeHal::new();
        hal.respond(&["erase", "userdata"], FakeResponse::failure(1, "locked"));

        let out = hal
            .command_output("fastboot", &["-s", "ABC", "erase", "userdata"], None)
            .unwrap();
        assert_eq!(out.status.code(), Some(1));
        assert_eq!(String::from_utf8_lossy(&out.stderr), "locked");

        let other = hal
            .command_output("fastboot", &["-s", "ABC", "erase", "cache"], None)
            .unwrap();
        assert!(other.status.success());
    }

    #[test]
    fn not_found_response_is_an_error() {
        let hal = FakeHal::new();
        hal.respond(&["devices"], FakeResponse::NotFound);
        let err = hal.command_output("fastboot", &["devices"], None).unwrap_err();
        assert!(matches!(err, HalError::CommandNotFound(_)));
        assert!(hal.has_operation(|op| op.args() == ["devices"]));
    }
}
