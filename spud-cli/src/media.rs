//! `mount`, `unmount`, and `verify` commands.
//!
//! These enforce operator policy: exactly one attached USB device unless
//! `--device` names one. The probing core treats any device count as an
//! ordinary result.

use anyhow::{bail, Context, Result};
use spud_core::device::BlockDevice;
use spud_core::probe::{probe_block_devices_in, ProbeRoots};
use spud_hal::SystemHal;
use std::fs;
use std::path::Path;

/// Scratch file `verify` writes to prove the medium accepts data.
const VERIFY_FILE: &str = "spud-verify.txt";

/// Pick the device to operate on.
fn select_device(mut devices: Vec<BlockDevice>, requested: Option<&Path>) -> Result<BlockDevice> {
    if let Some(requested) = requested {
        return match devices
            .iter()
            .position(|device| device.device_path == requested)
        {
            Some(index) => Ok(devices.remove(index)),
            None => bail!(
                "{} is not an attached USB block device",
                requested.display()
            ),
        };
    }
    match devices.len() {
        1 => Ok(devices.remove(0)),
        0 => bail!("no USB block device attached"),
        found => {
            let candidates = devices
                .iter()
                .map(|device| device.device_path.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            bail!("expected exactly one USB device, found {found}: {candidates} (pick one with --device)")
        }
    }
}

pub fn run_mount<H: SystemHal + ?Sized>(
    hal: &H,
    roots: &ProbeRoots,
    requested: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let device = select_device(probe_block_devices_in(hal, roots)?, requested)?;

    if dry_run {
        device.mount_default_partition(hal, true)?;
        return Ok(());
    }

    if device.is_mounted(hal)? {
        log::info!(
            "💾 {} is already mounted at {}",
            device.device_path.display(),
            device.media_path.display()
        );
    } else {
        log::info!(
            "💾 Mounting {} at {}",
            device.primary_partition,
            device.media_path.display()
        );
        if !device.mount_default_partition(hal, false)? {
            bail!(
                "{} did not become a mount point after mounting {}",
                device.media_path.display(),
                device.primary_partition
            );
        }
    }
    println!("{}", device.media_path.display());
    Ok(())
}

pub fn run_unmount<H: SystemHal + ?Sized>(
    hal: &H,
    roots: &ProbeRoots,
    requested: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let device = select_device(probe_block_devices_in(hal, roots)?, requested)?;

    if dry_run {
        device.unmount_default_partition(hal, true)?;
        return Ok(());
    }

    if !device.is_mounted(hal)? {
        log::info!(
            "⏏️  {} is not mounted, nothing to do",
            device.device_path.display()
        );
        return Ok(());
    }
    log::info!("⏏️  Unmounting {}", device.media_path.display());
    if !device.unmount_default_partition(hal, false)? {
        bail!(
            "{} is still a mount point after unmounting",
            device.media_path.display()
        );
    }
    Ok(())
}

/// Mount if needed, then write a scratch file to the media path.
pub fn run_verify<H: SystemHal + ?Sized>(
    hal: &H,
    roots: &ProbeRoots,
    requested: Option<&Path>,
    dry_run: bool,
) -> Result<()> {
    let device = select_device(probe_block_devices_in(hal, roots)?, requested)?;

    if dry_run {
        device.mount_default_partition(hal, true)?;
        log::info!(
            "DRY RUN: write {} under {}",
            VERIFY_FILE,
            device.media_path.display()
        );
        return Ok(());
    }

    if !device.mount_default_partition(hal, false)? {
        bail!(
            "could not mount {} at {}",
            device.primary_partition,
            device.media_path.display()
        );
    }
    let scratch = device.media_path.join(VERIFY_FILE);
    fs::write(&scratch, "spud was here\n")
        .with_context(|| format!("writing {}", scratch.display()))?;
    log::info!("✅ Wrote {}", scratch.display());
    println!("{}", scratch.display());
    Ok(())
}
