//! Partition Catalog.
//!
//! Grammar of a partition line in `getvar all` output (stdout and stderr combined):
//!
//! ```text
//! (bootloader) partition-<name>:<value>
//! ```
//!
//! `<name>` runs up to the first `:`; both parts are trimmed. Anything else is ignored.

use crate::gateway::DeviceGateway;
use fastbuster_hal::ProcessOps;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static PARTITION_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\(bootloader\) partition-(.+?):(.+)$").expect("partition line pattern")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionEntry {
    pub name: String,
    pub details: String,
}

impl PartitionEntry {
    pub fn new(name: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            details: details.into(),
        }
    }
}

/// Result of querying the catalog once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Sorted by name, unique names.
    pub partitions: Vec<PartitionEntry>,
    /// Diagnostic of a failed gateway call; `None` when the query itself succeeded.
    pub failure: Option<String>,
}

/// Parse a single line against the partition grammar.
pub fn parse_partition_line(line: &str) -> Option<PartitionEntry> {
    let caps = PARTITION_LINE.captures(line)?;
    let name = caps[1].trim();
    if name.is_empty() {
        return None;
    }
    Some(PartitionEntry::new(name, caps[2].trim()))
}

/// Extract partition entries, ordered by name (ordinal comparison).
///
/// A repeated name keeps its last value.
pub fn parse_partitions(output: &str) -> Vec<PartitionEntry> {
    let mut by_name: BTreeMap<String, String> = BTreeMap::new();
    for entry in output.lines().filter_map(parse_partition_line) {
        if let Some(previous) = by_name.insert(entry.name.clone(), entry.details) {
            log::debug!("duplicate partition {} (dropped '{}')", entry.name, previous);
        }
    }
    by_name
        .into_iter()
        .map(|(name, details)| PartitionEntry { name, details })
        .collect()
}

/// Query the device for all variables and build a snapshot of its partitions.
pub fn list_partitions<H: ProcessOps>(gateway: &DeviceGateway<H>, serial: &str) -> CatalogQuery {
    let result = gateway.execute(serial, &["getvar", "all"]);
    if !result.succeeded {
        return CatalogQuery {
            partitions: Vec::new(),
            failure: Some(result.diagnostic().to_string()),
        };
    }
    let partitions = parse_partitions(&result.combined_output());
    log::info!("{}: {} partition(s)", serial, partitions.len());
    CatalogQuery {
        partitions,
        failure: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fastbuster_hal::{FakeHal, FakeResponse};

    #[test]
    fn parses_literal_sample_lines() {
        assert_eq!(
            parse_partition_line("(bootloader) partition-boot_a:active"),
            Some(PartitionEntry::new("boot_a", "active"))
        );
        assert_eq!(
            parse_partition_line("(bootloader) partition- system :  0x1000 "),
            Some(PartitionEntry::new("system", "0x1000"))
        );
        // name stops at the first colon
        assert_eq!(
            parse_partition_line("(bootloader) partition-size:vbmeta: 0x10000"),
            Some(PartitionEntry::new("size", "vbmeta: 0x10000"))
        );
    }

    #[test]
    fn rejects_non_matching_lines() {
        assert_eq!(parse_partition_line("(bootloader) version:0.5"), None);
        assert_eq!(parse_partition_line("partition-boot:raw"), None);
        assert_eq!(parse_partition_line(" (bootloader) partition-boot:raw"), None);
        assert_eq!(parse_partition_line("(bootloader) partition-boot:"), None);
        assert_eq!(parse_partition_line("(bootloader) partition-  :x"), None);
        assert_eq!(parse_partition_line("all: Done!!"), None);
    }

    #[test]
    fn sorts_by_name_and_keeps_last_duplicate() {
        let output = "\
(bootloader) partition-vendor:raw
(bootloader) partition-Boot:upper
(bootloader) partition-boot:first
(bootloader) version-bootloader:1.0
(bootloader) partition-boot:second
Finished. Total time: 0.010s
";
        let names: Vec<_> = parse_partitions(output)
            .into_iter()
            .map(|p| (p.name, p.details))
            .collect();
        assert_eq!(
            names,
            vec![
                ("Boot".to_string(), "upper".to_string()),
                ("boot".to_string(), "second".to_string()),
                ("vendor".to_string(), "raw".to_string()),
            ]
        );
    }

    #[test]
    fn zero_matches_is_empty_not_failure() {
        let hal = FakeHal::new();
        hal.respond(&["getvar", "all"], FakeResponse::success("all: Done!!\n"));
        let query = list_partitions(&DeviceGateway::new(hal), "ABC");
        assert!(query.partitions.is_empty());
        assert_eq!(query.failure, None);
    }

    #[test]
    fn reads_both_streams() {
        let hal = FakeHal::new();
        hal.respond(
            &["getvar", "all"],
            FakeResponse::Output {
                code: 0,
                stdout: "(bootloader) partition-userdata:ext4".to_string(),
                stderr: "(bootloader) partition-cache:raw\n".to_string(),
            },
        );
        let query = list_partitions(&DeviceGateway::new(hal), "ABC");
        let names: Vec<_> = query.partitions.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["cache", "userdata"]);
    }

    #[test]
    fn gateway_failure_is_reported() {
        let hal = FakeHal::new();
        hal.respond(
            &["getvar", "all"],
            FakeResponse::failure(1, "< waiting for device >\nerror: no device\n"),
        );
        let query = list_partitions(&DeviceGateway::new(hal), "ABC");
        assert!(query.partitions.is_empty());
        assert_eq!(
            query.failure.as_deref(),
            Some("< waiting for device >\nerror: no device")
        );
    }
}
