//! fastbuster Hardware Abstraction Layer (HAL).
//!
//! Every external process goes through [`ProcessOps`] so the device workflows can be
//! exercised without a phone on the other end of the cable.

pub mod hal;

pub use fastbuster_error::{HalError, HalResult};
pub use hal::{FakeHal, FakeResponse, LinuxHal, Operation, ProcessOps};
