//! Active mount listing via the `mount` command.

use crate::errors::ProbeError;
use anyhow::{Context, Result};
use spud_hal::ProcessOps;

/// One active mount, as reported by `mount` with no arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRecord {
    /// What is mounted, e.g. `/dev/sdb1` (also tmpfs names, fstab labels).
    pub source: String,
    pub mountpoint: String,
    /// Filesystem type, e.g. `vfat`.
    pub format: String,
    /// Remaining text on the line, usually the parenthesized option list.
    pub details: String,
}

/// Parses `mount` output lines of the form
/// `SOURCE on MOUNTPOINT type FSTYPE OPTIONS`.
///
/// Any non-empty line that does not match is fatal: a mount table we cannot
/// read fully is worse than none, since missed rows silently hide devices.
pub fn parse_mount_table(output: &str) -> std::result::Result<Vec<MountRecord>, ProbeError> {
    let mut records = Vec::new();
    for line in output.lines() {
        if line.is_empty() {
            continue;
        }
        let record = parse_mount_line(line).ok_or_else(|| ProbeError::MountLine(line.to_string()))?;
        records.push(record);
    }
    Ok(records)
}

fn parse_mount_line(line: &str) -> Option<MountRecord> {
    let (source, rest) = line.split_once(" on ")?;
    let (mountpoint, rest) = rest.split_once(" type ")?;
    let (format, details) = rest.split_once(' ')?;
    Some(MountRecord {
        source: source.to_string(),
        mountpoint: mountpoint.to_string(),
        format: format.to_string(),
        details: details.to_string(),
    })
}

/// Runs `mount` and parses every line of its output.
pub fn read_mount_table<H: ProcessOps + ?Sized>(hal: &H) -> Result<Vec<MountRecord>> {
    let output = hal
        .command_stdout("mount", &[])
        .context("listing active mounts")?;
    let records = parse_mount_table(&output)?;
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use spud_hal::FakeHal;

    const MOUNT_OUTPUT: &str = "\
proc on /proc type proc (rw,nosuid,nodev,noexec,relatime)
/dev/nvme0n1p2 on / type ext4 (rw,relatime)
/dev/sdb1 on /media/sdb type vfat (rw,nosuid,uid=1000,gid=1000)
";

    #[test]
    fn parses_each_line_into_fields() {
        let records = parse_mount_table(MOUNT_OUTPUT).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].source, "proc");
        assert_eq!(records[0].mountpoint, "/proc");
        assert_eq!(records[0].format, "proc");
        assert_eq!(records[2].source, "/dev/sdb1");
        assert_eq!(records[2].mountpoint, "/media/sdb");
        assert_eq!(records[2].format, "vfat");
        assert_eq!(records[2].details, "(rw,nosuid,uid=1000,gid=1000)");
    }

    #[test]
    fn details_need_no_parentheses() {
        let records =
            parse_mount_table("/dev/sdb1 on /media/sdb1 type vfat rw,relatime\n").unwrap();

        assert_eq!(records[0].source, "/dev/sdb1");
        assert_eq!(records[0].mountpoint, "/media/sdb1");
        assert_eq!(records[0].format, "vfat");
        assert_eq!(records[0].details, "rw,relatime");
    }

    #[test]
    fn mountpoint_may_contain_spaces() {
        let records =
            parse_mount_table("/dev/sdb1 on /media/my stick type vfat (rw)\n").unwrap();

        assert_eq!(records[0].mountpoint, "/media/my stick");
    }

    #[test]
    fn unrecognized_line_is_fatal_and_quoted() {
        let err = parse_mount_table("no separators here\n").unwrap_err();

        assert_eq!(err, ProbeError::MountLine("no separators here".to_string()));
        assert!(err.to_string().contains("no separators here"));
    }

    #[test]
    fn empty_output_yields_no_records() {
        assert!(parse_mount_table("").unwrap().is_empty());
        assert!(parse_mount_table("\n\n").unwrap().is_empty());
    }

    #[test]
    fn read_runs_bare_mount_command() {
        let hal = FakeHal::new();
        hal.script_stdout("mount", MOUNT_OUTPUT);

        let records = read_mount_table(&hal).unwrap();

        assert_eq!(records.len(), 3);
        assert!(hal.has_operation(|op| matches!(
            op,
            spud_hal::Operation::Command { program, args }
                if program == "mount" && args.is_empty()
        )));
    }

    #[test]
    fn read_propagates_command_failure() {
        let hal = FakeHal::new();
        hal.script_failure("mount", 1, "mount: permission denied");

        let err = read_mount_table(&hal).unwrap_err();

        assert!(err.to_string().contains("listing active mounts"));
    }
}
