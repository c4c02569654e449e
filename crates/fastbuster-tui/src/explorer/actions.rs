//! Action Executor: flash, wipe, boot and reboot through the Device Gateway.
//!
//! Every action follows the same shape: show an "in progress" status line, make exactly
//! one gateway call, show the outcome, then block until the operator acknowledges it.

use anyhow::Result;
use fastbuster_core::{CommandResult, DeviceGateway, Messages};
use fastbuster_hal::ProcessOps;
use std::path::{Path, PathBuf};

/// A device operation the explorer can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceAction {
    Flash { partition: String, image: PathBuf },
    Wipe { partition: String },
    Boot { image: PathBuf },
    Reboot,
}

impl DeviceAction {
    /// Arguments after `-s <serial>`.
    pub fn args(&self) -> Vec<String> {
        match self {
            DeviceAction::Flash { partition, image } => vec![
                "flash".to_string(),
                partition.clone(),
                image.to_string_lossy().into_owned(),
            ],
            DeviceAction::Wipe { partition } => vec!["erase".to_string(), partition.clone()],
            DeviceAction::Boot { image } => {
                vec!["boot".to_string(), image.to_string_lossy().into_owned()]
            }
            DeviceAction::Reboot => vec!["reboot".to_string()],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    InProgress,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub kind: StatusKind,
    pub text: String,
}

impl StatusLine {
    pub fn in_progress(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::InProgress,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: StatusKind::Error,
            text: text.into(),
        }
    }
}

/// Where status lines end up. Errors here are rendering failures, not device failures.
pub trait StatusSink {
    fn show(&mut self, status: StatusLine) -> Result<()>;
    /// Block until the operator presses a key.
    fn acknowledge(&mut self) -> Result<()>;
}

/// Base name for status text; falls back to the full path.
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub struct ActionExecutor<H: ProcessOps> {
    gateway: DeviceGateway<H>,
    serial: String,
    messages: &'static Messages,
}

impl<H: ProcessOps> ActionExecutor<H> {
    pub fn new(gateway: DeviceGateway<H>, serial: impl Into<String>, messages: &'static Messages) -> Self {
        Self {
            gateway,
            serial: serial.into(),
            messages,
        }
    }

    pub fn run(&self, action: &DeviceAction, sink: &mut impl StatusSink) -> Result<CommandResult> {
        match action {
            DeviceAction::Flash { partition, image } => self.flash(partition, image, sink),
            DeviceAction::Wipe { partition } => self.wipe(partition, sink),
            DeviceAction::Boot { image } => self.boot(image, sink),
            DeviceAction::Reboot => self.reboot(sink),
        }
    }

    pub fn flash(
        &self,
        partition: &str,
        image: &Path,
        sink: &mut impl StatusSink,
    ) -> Result<CommandResult> {
        let file = file_label(image);
        let m = self.messages;
        self.perform(
            &DeviceAction::Flash {
                partition: partition.to_string(),
                image: image.to_path_buf(),
            },
            m.flashing(&file, partition),
            || m.flash_success(&file, partition),
            |error| m.flash_error(partition, error),
            sink,
        )
    }

    pub fn wipe(&self, partition: &str, sink: &mut impl StatusSink) -> Result<CommandResult> {
        let m = self.messages;
        self.perform(
            &DeviceAction::Wipe {
                partition: partition.to_string(),
            },
            m.wiping(partition),
            || m.wipe_success(partition),
            |error| m.wipe_error(partition, error),
            sink,
        )
    }

    pub fn boot(&self, image: &Path, sink: &mut impl StatusSink) -> Result<CommandResult> {
        let file = file_label(image);
        let m = self.messages;
        self.perform(
            &DeviceAction::Boot {
                image: image.to_path_buf(),
            },
            m.booting(&file),
            || m.boot_success(&file),
            |error| m.boot_error(&file, error),
            sink,
        )
    }

    pub fn reboot(&self, sink: &mut impl StatusSink) -> Result<CommandResult> {
        let m = self.messages;
        self.perform(
            &DeviceAction::Reboot,
            m.rebooting.to_string(),
            || m.reboot_success.to_string(),
            |error| m.reboot_error(error),
            sink,
        )
    }

    fn perform(
        &self,
        action: &DeviceAction,
        progress: String,
        on_success: impl FnOnce() -> String,
        on_error: impl FnOnce(&str) -> String,
        sink: &mut impl StatusSink,
    ) -> Result<CommandResult> {
        sink.show(StatusLine::in_progress(progress))?;

        let args = action.args();
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let result = self.gateway.execute(&self.serial, &args);

        let status = if result.succeeded {
            log::info!("{:?} succeeded on {}", action, self.serial);
            StatusLine::success(on_success())
        } else {
            StatusLine::error(on_error(result.diagnostic()))
        };
        sink.show(status)?;
        sink.acknowledge()?;
        Ok(result)
    }
}
