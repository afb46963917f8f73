//! Correlation of discovered USB devices with the active mount table.

use crate::device::BlockDevice;
use crate::mount_table::MountRecord;

const BYTES_PER_GB: f64 = (1024u64 * 1024 * 1024) as f64;

/// Text rendered in digests for attributes the kernel did not publish.
const UNKNOWN: &str = "unknown";

/// One mounted USB storage medium: a discovered device paired with the mount
/// record whose source is the device's primary partition.
///
/// A device mounted in several places yields several records, one per mount.
#[derive(Debug, Clone, PartialEq)]
pub struct UsbStorageRecord {
    pub device: BlockDevice,
    pub mount: MountRecord,
}

impl UsbStorageRecord {
    pub fn size_gb(&self) -> Option<f64> {
        self.device.size_bytes.map(|bytes| bytes as f64 / BYTES_PER_GB)
    }

    /// One-line parsable summary of this storage medium.
    ///
    /// Field order is stable; consumers split on spaces and `:`. Unpublished
    /// attributes render as `unknown` rather than being omitted, so every
    /// digest has the same shape.
    pub fn digest(&self) -> String {
        format!(
            "mountpoint:{} partition:{} size_bytes:{} size_gb:{} format:{} model:{} vendor:{} device_name:{} block_path:{} media_path:{}",
            self.mount.mountpoint,
            self.mount.source,
            render_opt(self.device.size_bytes.as_ref()),
            render_opt(self.size_gb().as_ref()),
            self.mount.format,
            render_opt(self.device.model.as_ref()),
            render_opt(self.device.vendor.as_ref()),
            self.device.device_name,
            self.device.sys_block_path.display(),
            self.device.media_path.display(),
        )
    }
}

fn render_opt<T: std::fmt::Display>(value: Option<&T>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => UNKNOWN.to_string(),
    }
}

/// Pairs every mount whose source matches a device's primary partition.
///
/// Iteration is mount-major, so record order follows the mount table. Mounts
/// that match no discovered device are dropped without comment; the mount
/// table is full of rootfs, tmpfs, and pseudo-filesystem rows that are not
/// USB media.
pub fn correlate(devices: &[BlockDevice], mounts: &[MountRecord]) -> Vec<UsbStorageRecord> {
    let mut records = Vec::new();
    for mount in mounts {
        for device in devices {
            if device.primary_partition == mount.source {
                records.push(UsbStorageRecord {
                    device: device.clone(),
                    mount: mount.clone(),
                });
            }
        }
    }
    records
}

/// How many mounts each device matched, in first-appearance order.
///
/// More than one mount per device usually means a leftover mount from an
/// earlier probe; callers surface that as a warning.
pub fn device_match_counts(records: &[UsbStorageRecord]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for record in records {
        let name = &record.device.device_name;
        match counts.iter_mut().find(|(counted, _)| counted == name) {
            Some((_, count)) => *count += 1,
            None => counts.push((name.clone(), 1)),
        }
    }
    counts
}
