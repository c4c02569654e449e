//! Runtime settings: defaults, then the TOML settings file, then CLI flags.

use crate::cli::Cli;
use crate::gateway::DEFAULT_PROGRAM;
use crate::locale::Language;
use fastbuster_error::{FastbusterError, FastbusterResult};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// On-disk shape of `config.toml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SettingsFile {
    pub language: Option<Language>,
    pub fastboot_path: Option<String>,
    pub timeout_secs: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub serial: Option<String>,
}

impl SettingsFile {
    pub fn load(path: &Path) -> FastbusterResult<Self> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| FastbusterError::Settings {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// `None` means ask interactively.
    pub language: Option<Language>,
    pub fastboot_path: String,
    pub timeout: Option<Duration>,
    pub log_file: Option<PathBuf>,
    pub serial: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: None,
            fastboot_path: DEFAULT_PROGRAM.to_string(),
            timeout: None,
            log_file: None,
            serial: None,
        }
    }
}

impl Settings {
    /// Resolve settings for this run.
    ///
    /// An explicit `--config` must exist; the default location is optional.
    pub fn resolve(cli: &Cli) -> FastbusterResult<Self> {
        let file = match &cli.config {
            Some(path) => SettingsFile::load(path)?,
            None => match default_config_path() {
                Some(path) if path.is_file() => SettingsFile::load(&path)?,
                _ => SettingsFile::default(),
            },
        };
        Ok(Self::merge(file, cli))
    }

    pub fn merge(file: SettingsFile, cli: &Cli) -> Self {
        let defaults = Settings::default();
        let timeout_secs = cli.timeout_secs.or(file.timeout_secs);
        Self {
            language: cli.lang.or(file.language),
            fastboot_path: cli
                .fastboot
                .clone()
                .or(file.fastboot_path)
                .unwrap_or(defaults.fastboot_path),
            timeout: timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            log_file: cli.log_file.clone().or(file.log_file),
            serial: cli.serial.clone().or(file.serial),
        }
    }
}

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// `$XDG_CONFIG_HOME/fastbuster/config.toml`, falling back to `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    env_dir("XDG_CONFIG_HOME")
        .or_else(|| env_dir("HOME").map(|home| home.join(".config")))
        .map(|dir| dir.join("fastbuster").join("config.toml"))
}

/// `$XDG_STATE_HOME/fastbuster/fastbuster.log`, falling back to `~/.local/state`, then
/// the temp directory.
pub fn default_log_path() -> PathBuf {
    env_dir("XDG_STATE_HOME")
        .or_else(|| env_dir("HOME").map(|home| home.join(".local").join("state")))
        .map(|dir| dir.join("fastbuster"))
        .unwrap_or_else(std::env::temp_dir)
        .join("fastbuster.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_without_file_or_flags() {
        let cli = Cli::try_parse_from(["fastbuster"]).unwrap();
        let settings = Settings::merge(SettingsFile::default(), &cli);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.fastboot_path, "fastboot");
        assert_eq!(settings.timeout, None);
    }

    #[test]
    fn test_file_values_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "language = \"en\"\nfastboot_path = \"/opt/pt/fastboot\"\ntimeout_secs = 120\n",
        )
        .unwrap();

        let cli = Cli::try_parse_from(["fastbuster", "--config", path.to_str().unwrap()]).unwrap();
        let settings = Settings::resolve(&cli).unwrap();
        assert_eq!(settings.language, Some(Language::En));
        assert_eq!(settings.fastboot_path, "/opt/pt/fastboot");
        assert_eq!(settings.timeout, Some(Duration::from_secs(120)));
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = SettingsFile {
            language: Some(Language::Es),
            fastboot_path: Some("/file/fastboot".to_string()),
            timeout_secs: Some(60),
            log_file: None,
            serial: Some("FILE".to_string()),
        };
        let cli = Cli::try_parse_from([
            "fastbuster",
            "--lang",
            "en",
            "--serial",
            "CLI",
            "--timeout-secs",
            "0",
        ])
        .unwrap();
        let settings = Settings::merge(file, &cli);
        assert_eq!(settings.language, Some(Language::En));
        assert_eq!(settings.serial.as_deref(), Some("CLI"));
        assert_eq!(settings.fastboot_path, "/file/fastboot");
        // zero disables the timeout
        assert_eq!(settings.timeout, None);
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "langauge = \"en\"\n").unwrap();
        let err = SettingsFile::load(&path).unwrap_err();
        assert!(matches!(err, FastbusterError::Settings { .. }));
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        let cli =
            Cli::try_parse_from(["fastbuster", "--config", missing.to_str().unwrap()]).unwrap();
        assert!(matches!(
            Settings::resolve(&cli),
            Err(FastbusterError::Io(_))
        ));
    }
}
