//! `probe` and `devices` command implementations.

use anyhow::Result;
use spud_core::correlate::device_match_counts;
use spud_core::device::BlockDevice;
use spud_core::probe::{probe_block_devices_in, probe_usb_storage_in, ProbeRoots};
use spud_hal::ProcessOps;

const GB: f64 = (1024u64 * 1024 * 1024) as f64;

/// Full probe: one digest line per mounted USB medium.
pub fn run_probe<H: ProcessOps + ?Sized>(hal: &H, roots: &ProbeRoots) -> Result<()> {
    let records = probe_usb_storage_in(hal, roots)?;

    for (device_name, count) in device_match_counts(&records) {
        if count > 1 {
            log::warn!(
                "⚠️ {device_name} matched {count} mounts; a stale mount may be lingering"
            );
        }
    }

    for record in &records {
        println!("{}", record.digest());
    }
    Ok(())
}

/// Discovery-only listing, one line per USB block device.
pub fn run_devices<H: ProcessOps + ?Sized>(hal: &H, roots: &ProbeRoots) -> Result<()> {
    let devices = probe_block_devices_in(hal, roots)?;

    if devices.is_empty() {
        log::info!("No USB block devices attached");
        return Ok(());
    }
    for device in &devices {
        println!("{}", device_line(device));
    }
    Ok(())
}

fn device_line(device: &BlockDevice) -> String {
    let removable = match device.removable {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    };
    let size = match device.size_bytes {
        Some(bytes) => format!("{:.1} GB", bytes as f64 / GB),
        None => "unknown".to_string(),
    };
    format!(
        "{} partition:{} removable:{} size:{} vendor:{} model:{}",
        device.device_path.display(),
        device.primary_partition,
        removable,
        size,
        device.vendor.as_deref().unwrap_or("unknown"),
        device.model.as_deref().unwrap_or("unknown"),
    )
}
