//! CLI argument parsing for fastbuster
//!
//! Makes the partition explorer the default entry point when no subcommand is provided.

use crate::locale::Language;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fastbuster")]
#[command(about = "Terminal partition explorer for devices in fastboot mode")]
#[command(long_about = "Terminal partition explorer for devices in fastboot mode.\n\n\
    Run without arguments to browse, flash, wipe and boot partitions interactively.\n\
    Use subcommands for scripting.")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Interface language (skips the language picker)
    #[arg(long, value_enum, global = true)]
    pub lang: Option<Language>,

    /// Device serial to use instead of the first one listed
    #[arg(short = 's', long, global = true)]
    pub serial: Option<String>,

    /// Path to the fastboot executable
    #[arg(long, global = true)]
    pub fastboot: Option<String>,

    /// Give up on a fastboot command after this many seconds (0 = wait forever)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Write logs here instead of the default state directory
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List devices in fastboot mode (serial and state)
    Devices,

    /// Print the partition catalog of a device
    Partitions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_explorer() {
        let cli = Cli::try_parse_from(["fastbuster"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.lang.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "fastbuster",
            "partitions",
            "-s",
            "ABC123",
            "--lang",
            "en",
            "--timeout-secs",
            "90",
        ])
        .unwrap();
        assert_eq!(cli.command, Some(Command::Partitions));
        assert_eq!(cli.serial.as_deref(), Some("ABC123"));
        assert_eq!(cli.lang, Some(Language::En));
        assert_eq!(cli.timeout_secs, Some(90));
    }

    #[test]
    fn unknown_language_is_rejected() {
        assert!(Cli::try_parse_from(["fastbuster", "--lang", "fr"]).is_err());
    }
}
