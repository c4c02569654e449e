//! Device Gateway: one logical device operation, one invocation of the flashing tool.

use fastbuster_hal::ProcessOps;
use std::time::Duration;

pub const DEFAULT_PROGRAM: &str = "fastboot";

/// Outcome of a single flashing-tool invocation. Consumed immediately, never retained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub succeeded: bool,
    pub stdout: String,
    pub stderr: String,
}

impl CommandResult {
    pub fn failed(diagnostic: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            stdout: String::new(),
            stderr: diagnostic.into(),
        }
    }

    /// stdout followed by stderr; the tool splits its chatter across both.
    pub fn combined_output(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(&self.stdout);
        if !self.stdout.is_empty() && !self.stdout.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&self.stderr);
        text
    }

    /// Text to show an operator when the command failed.
    pub fn diagnostic(&self) -> &str {
        let stderr = self.stderr.trim();
        if stderr.is_empty() {
            self.stdout.trim()
        } else {
            stderr
        }
    }
}

/// Wraps the external protocol client.
///
/// Never fails: a missing tool, an unreachable device or a non-zero exit all come back
/// as `CommandResult { succeeded: false, .. }`.
#[derive(Debug, Clone)]
pub struct DeviceGateway<H: ProcessOps> {
    hal: H,
    program: String,
    timeout: Option<Duration>,
}

impl<H: ProcessOps> DeviceGateway<H> {
    pub fn new(hal: H) -> Self {
        Self {
            hal,
            program: DEFAULT_PROGRAM.to_string(),
            timeout: None,
        }
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// `<tool> -s <serial> <args...>`
    pub fn execute(&self, serial: &str, args: &[&str]) -> CommandResult {
        let mut full: Vec<&str> = Vec::with_capacity(args.len() + 2);
        full.push("-s");
        full.push(serial);
        full.extend_from_slice(args);
        self.run(&full)
    }

    /// `<tool> devices`; the only call made without a serial.
    pub fn devices(&self) -> CommandResult {
        self.run(&["devices"])
    }

    fn run(&self, args: &[&str]) -> CommandResult {
        log::info!("{} {}", self.program, args.join(" "));
        match self.hal.command_output(&self.program, args, self.timeout) {
            Ok(output) => {
                let result = CommandResult {
                    succeeded: output.status.success(),
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                };
                if !result.succeeded {
                    log::warn!(
                        "{} {} exited with {:?}: {}",
                        self.program,
                        args.join(" "),
                        output.status.code(),
                        result.diagnostic()
                    );
                }
                result
            }
            Err(err) => {
                log::warn!("{} {} failed: {}", self.program, args.join(" "), err);
                CommandResult::failed(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastbuster_hal::{FakeHal, FakeResponse, Operation};

    #[test]
    fn execute_prefixes_serial() {
        let hal = FakeHal::new();
        let gateway = DeviceGateway::new(hal.clone());
        let result = gateway.execute("ABC123", &["erase", "cache"]);
        assert!(result.succeeded);
        assert_eq!(
            hal.operations(),
            vec![Operation::Command {
                program: "fastboot".to_string(),
                args: vec!["-s", "ABC123", "erase", "cache"]
                    .into_iter()
                    .map(String::from)
                    .collect(),
                timeout_secs: None,
            }]
        );
    }

    #[test]
    fn nonzero_exit_becomes_failed_result() {
        let hal = FakeHal::new();
        hal.respond(&["reboot"], FakeResponse::failure(1, "FAILED (no device)\n"));
        let gateway = DeviceGateway::new(hal);
        let result = gateway.execute("ABC123", &["reboot"]);
        assert!(!result.succeeded);
        assert_eq!(result.diagnostic(), "FAILED (no device)");
    }

    #[test]
    fn missing_tool_becomes_failed_result() {
        let hal = FakeHal::new();
        hal.respond(&["devices"], FakeResponse::NotFound);
        let gateway = DeviceGateway::new(hal).with_program("/opt/platform-tools/fastboot");
        let result = gateway.devices();
        assert!(!result.succeeded);
        assert!(result.stderr.contains("Command not found"));
        assert!(result.stderr.contains("/opt/platform-tools/fastboot"));
    }

    #[test]
    fn timeout_is_forwarded() {
        let hal = FakeHal::new();
        let gateway = DeviceGateway::new(hal.clone()).with_timeout(Some(Duration::from_secs(30)));
        gateway.devices();
        assert!(hal.has_operation(|op| matches!(
            op,
            Operation::Command { timeout_secs: Some(30), .. }
        )));
    }

    #[test]
    fn diagnostic_falls_back_to_stdout() {
        let result = CommandResult {
            succeeded: false,
            stdout: "  something broke \n".to_string(),
            stderr: "   ".to_string(),
        };
        assert_eq!(result.diagnostic(), "something broke");
    }

    #[test]
    fn combined_output_separates_streams() {
        let result = CommandResult {
            succeeded: true,
            stdout: "a".to_string(),
            stderr: "b\n".to_string(),
        };
        assert_eq!(result.combined_output(), "a\nb\n");
    }
}
