//! CLI argument parsing for SPUD.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "spud")]
#[command(about = "🥔 SPUD - USB storage probe and mount helper")]
#[command(long_about = "🥔 SPUD - USB storage probe and mount helper\n\n\
    Finds USB-attached block devices, correlates them with the active mount\n\
    table, and mounts or unmounts their primary partition under /media.\n\n\
    `probe` prints one parsable digest line per mounted USB medium;\n\
    `mount`, `unmount` and `verify` operate on the single attached device.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Run in dry-run mode (no changes made)
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Append logs to this file instead of stderr
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// 🔍 Correlate USB devices with active mounts and print one digest per medium
    Probe,

    /// 🧾 List USB block devices and their metadata (no mount correlation)
    Devices,

    /// 💾 Mount the USB device's primary partition at its media path
    Mount {
        /// Device node to operate on when several USB devices are attached (e.g., /dev/sdb)
        #[arg(long)]
        device: Option<PathBuf>,
    },

    /// ⏏️  Unmount the USB device's media path
    Unmount {
        /// Device node to operate on when several USB devices are attached (e.g., /dev/sdb)
        #[arg(long)]
        device: Option<PathBuf>,
    },

    /// ✅ Mount if needed, then write a scratch file to prove the medium is writable
    Verify {
        /// Device node to operate on when several USB devices are attached (e.g., /dev/sdb)
        #[arg(long)]
        device: Option<PathBuf>,
    },
}
