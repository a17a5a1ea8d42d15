//! Checksum command - verify the CRC-16 trailer of files
//!
//! Works on the raw bytes, so no module catalog is needed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

/// Arguments for the checksum command
#[derive(Args)]
pub struct ChecksumArgs {
    /// Patch or performance files (.pch2 / .prf2)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Rewrite files whose stored checksum is wrong
    #[arg(long)]
    pub fix: bool,
}

/// Execute the checksum command
pub fn execute(args: ChecksumArgs) -> Result<()> {
    crate::for_each_file(&args.files, |path| check_file(path, args.fix))
}

fn check_file(path: &Path, fix: bool) -> Result<()> {
    let mut data = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let nul = data
        .iter()
        .position(|&b| b == 0)
        .context("Text header is missing its NUL terminator")?;
    let signed_end = data
        .len()
        .checked_sub(2)
        .filter(|&end| end > nul + 1)
        .context("File too short for a checksum")?;

    let stored = u16::from_be_bytes([data[signed_end], data[signed_end + 1]]);
    let computed = g2_patch::checksum(&data[nul + 1..signed_end]);
    if stored == computed {
        println!("{}: ok (0x{:04x})", path.display(), stored);
        return Ok(());
    }

    println!(
        "{}: stored 0x{:04x}, computed 0x{:04x}",
        path.display(),
        stored,
        computed
    );
    if !fix {
        anyhow::bail!("checksum mismatch");
    }
    data[signed_end..].copy_from_slice(&computed.to_be_bytes());
    std::fs::write(path, &data).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!("Fixed checksum of {}", path.display());
    Ok(())
}
