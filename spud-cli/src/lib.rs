//! 🥔 SPUD command-line entry points.

pub mod cli;
pub mod logging;
pub mod media;
pub mod probe;

use anyhow::Context;
use clap::Parser;
use spud_core::probe::ProbeRoots;
use spud_hal::LinuxHal;

pub fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    logging::init_with(cli.log_file.clone());

    let hal = LinuxHal::new();
    let roots = ProbeRoots::default();

    match &cli.command {
        cli::Command::Probe => probe::run_probe(&hal, &roots),
        cli::Command::Devices => probe::run_devices(&hal, &roots),
        cli::Command::Mount { device } => {
            if !cli.dry_run {
                spud_hal::ensure_root().context("mount requires root (or use --dry-run)")?;
            }
            media::run_mount(&hal, &roots, device.as_deref(), cli.dry_run)
        }
        cli::Command::Unmount { device } => {
            if !cli.dry_run {
                spud_hal::ensure_root().context("unmount requires root (or use --dry-run)")?;
            }
            media::run_unmount(&hal, &roots, device.as_deref(), cli.dry_run)
        }
        cli::Command::Verify { device } => {
            if !cli.dry_run {
                spud_hal::ensure_root().context("verify requires root (or use --dry-run)")?;
            }
            media::run_verify(&hal, &roots, device.as_deref(), cli.dry_run)
        }
    }
}
