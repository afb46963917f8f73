//! End-to-end probing entry points.

use crate::correlate::{self, UsbStorageRecord};
use crate::device::{BlockDevice, MEDIA_DIR, SYS_BLOCK_DIR};
use crate::discovery::{self, DEV_DIR, PARTITION_LISTING, SYS_CLASS_BLOCK};
use crate::mount_table::read_mount_table;
use crate::resolver::FdiskResolver;
use anyhow::Result;
use spud_hal::ProcessOps;
use std::path::PathBuf;

/// Filesystem locations a probe reads from.
///
/// Production code uses [`ProbeRoots::default`]; tests point every root at a
/// fixture tree.
#[derive(Debug, Clone)]
pub struct ProbeRoots {
    pub partition_listing: PathBuf,
    pub sys_class_block: PathBuf,
    pub dev_dir: PathBuf,
    pub sys_block: PathBuf,
    pub media_dir: PathBuf,
}

impl Default for ProbeRoots {
    fn default() -> Self {
        Self {
            partition_listing: PathBuf::from(PARTITION_LISTING),
            sys_class_block: PathBuf::from(SYS_CLASS_BLOCK),
            dev_dir: PathBuf::from(DEV_DIR),
            sys_block: PathBuf::from(SYS_BLOCK_DIR),
            media_dir: PathBuf::from(MEDIA_DIR),
        }
    }
}

/// Discover USB whole disks and probe each one's metadata.
pub fn probe_block_devices<H: ProcessOps + ?Sized>(hal: &H) -> Result<Vec<BlockDevice>> {
    probe_block_devices_in(hal, &ProbeRoots::default())
}

pub fn probe_block_devices_in<H: ProcessOps + ?Sized>(
    hal: &H,
    roots: &ProbeRoots,
) -> Result<Vec<BlockDevice>> {
    let disks = discovery::discover_usb_disks_in(
        &roots.partition_listing,
        &roots.sys_class_block,
        &roots.dev_dir,
    )?;
    let resolver = FdiskResolver::new(hal);
    let mut devices = Vec::new();
    for disk in &disks {
        devices.push(BlockDevice::probe_in(
            disk,
            &resolver,
            &roots.sys_block,
            &roots.media_dir,
        )?);
    }
    Ok(devices)
}

/// Full probe: mount table, then devices, then correlation.
///
/// The mount table is read before any device probing so records reflect the
/// mounts that existed when the probe started.
pub fn probe_usb_storage<H: ProcessOps + ?Sized>(hal: &H) -> Result<Vec<UsbStorageRecord>> {
    probe_usb_storage_in(hal, &ProbeRoots::default())
}

pub fn probe_usb_storage_in<H: ProcessOps + ?Sized>(
    hal: &H,
    roots: &ProbeRoots,
) -> Result<Vec<UsbStorageRecord>> {
    let mounts = read_mount_table(hal)?;
    let devices = probe_block_devices_in(hal, roots)?;
    Ok(correlate::correlate(&devices, &mounts))
}
