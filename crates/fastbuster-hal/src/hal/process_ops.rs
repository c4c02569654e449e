//! Process execution helpers.
//!
//! External commands are considered "world-touching" and must go through the HAL so we can
//! test workflows without spawning real processes.

use crate::HalResult;
use std::process::Output;
use std::time::Duration;

/// Process execution trait (external command runner).
pub trait ProcessOps {
    /// Run `program` with `args` and capture its output.
    ///
    /// A non-zero exit is NOT an error here; it is reported through `Output::status`.
    /// `timeout: None` waits until the process exits on its own.
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output>;
}

impl<T: ProcessOps + ?Sized> ProcessOps for &T {
    fn command_output(
        &self,
        program: &str,
        args: &[&str],
        timeout: Option<Duration>,
    ) -> HalResult<Output> {
        (**self).command_output(program, args, timeout)
    }
}
