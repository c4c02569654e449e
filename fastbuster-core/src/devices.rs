//! Device enumeration (`fastboot devices`).

use crate::gateway::{CommandResult, DeviceGateway};
use fastbuster_hal::ProcessOps;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceInfo {
    pub serial: String,
    /// Second column of the listing (usually `fastboot`); empty if absent.
    pub state: String,
}

/// Parse `devices` output: one device per non-blank line, first token is the serial.
pub fn parse_devices(stdout: &str) -> Vec<DeviceInfo> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            let serial = tokens.next()?;
            Some(DeviceInfo {
                serial: serial.to_string(),
                state: tokens.collect::<Vec<_>>().join(" "),
            })
        })
        .collect()
}

/// Enumerate attached devices. A failed enumeration yields no devices.
pub fn enumerate_devices<H: ProcessOps>(gateway: &DeviceGateway<H>) -> (Vec<DeviceInfo>, CommandResult) {
    let result = gateway.devices();
    let devices = if result.succeeded {
        parse_devices(&result.stdout)
    } else {
        Vec::new()
    };
    log::info!("found {} device(s)", devices.len());
    (devices, result)
}

/// Choose the session's serial: the requested one if given, otherwise the first device.
///
/// Returns `None` only when nothing is attached.
pub fn select_serial(devices: &[DeviceInfo], requested: Option<&str>) -> Option<String> {
    let first = devices.first()?;
    match requested {
        Some(serial) => {
            if !devices.iter().any(|d| d.serial == serial) {
                log::warn!("requested serial {} is not in the device list", serial);
            }
            Some(serial.to_string())
        }
        None => Some(first.serial.clone()),
    }
}
