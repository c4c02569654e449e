//! fastbuster core: everything that talks to the flashing tool, minus the terminal.

pub mod catalog;
pub mod cli;
pub mod devices;
pub mod gateway;
pub mod locale;
pub mod logging;
pub mod settings;

pub use catalog::{list_partitions, parse_partitions, CatalogQuery, PartitionEntry};
pub use devices::{enumerate_devices, parse_devices, select_serial, DeviceInfo};
pub use gateway::{CommandResult, DeviceGateway};
pub use locale::{Language, Messages};
