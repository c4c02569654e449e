use anyhow::Context;
use clap::Parser;
use fastbuster_core::cli::{Cli, Command};
use fastbuster_core::settings::{default_log_path, Settings};
use fastbuster_core::{enumerate_devices, list_partitions, select_serial, DeviceGateway};
use fastbuster_hal::{LinuxHal, ProcessOps};
use std::io::Write;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::resolve(&cli).context("Failed to load settings")?;

    let log_file = settings.log_file.clone().unwrap_or_else(default_log_path);
    fastbuster_core::logging::init_with(&log_file, cli.command.is_none());
    log::info!("fastbuster {} starting", env!("CARGO_PKG_VERSION"));

    let gateway = || {
        DeviceGateway::new(LinuxHal::new())
            .with_program(settings.fastboot_path.clone())
            .with_timeout(settings.timeout)
    };
    let stdout = std::io::stdout();

    match &cli.command {
        // No subcommand = launch the explorer (default)
        None => fastbuster_tui::explorer::run(&settings)?,
        Some(Command::Devices) => print_devices(&gateway(), &mut stdout.lock())?,
        Some(Command::Partitions) => print_partitions(
            &gateway(),
            settings.serial.as_deref(),
            &mut stdout.lock(),
        )?,
    }
    Ok(())
}

/// `serial<TAB>state`, one device per line.
pub fn print_devices<H: ProcessOps>(
    gateway: &DeviceGateway<H>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let (devices, result) = enumerate_devices(gateway);
    if !result.succeeded {
        anyhow::bail!("devices failed: {}", result.diagnostic());
    }
    for device in devices {
        writeln!(out, "{}\t{}", device.serial, device.state)?;
    }
    Ok(())
}

/// `name<TAB>details`, sorted by name.
pub fn print_partitions<H: ProcessOps>(
    gateway: &DeviceGateway<H>,
    requested_serial: Option<&str>,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let (devices, _) = enumerate_devices(gateway);
    let serial = select_serial(&devices, requested_serial)
        .context("No device in fastboot mode")?;
    let query = list_partitions(gateway, &serial);
    if let Some(failure) = query.failure {
        anyhow::bail!("getvar all failed on {}: {}", serial, failure);
    }
    for entry in query.partitions {
        writeln!(out, "{}\t{}", entry.name, entry.details)?;
    }
    Ok(())
}
