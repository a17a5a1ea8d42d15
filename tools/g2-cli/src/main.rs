//! G2 CLI - Inspect and rewrite Nord Modular G2 patch files
//!
//! # Commands
//!
//! - `g2 info` - Print the modules, cables and bindings of a patch or performance
//! - `g2 checksum` - Verify (and optionally repair) file checksums
//! - `g2 roundtrip` - Parse, re-encode and compare against the original bytes
//!
//! # Usage
//!
//! ```bash
//! # Describe a patch, resolving module types through a catalog
//! g2 --catalog modules.toml info bass.pch2
//!
//! # Check every file in a bank directory
//! g2 checksum bank/*.pch2
//!
//! # Make sure the codec reproduces a set of files byte for byte
//! g2 --catalog modules.toml roundtrip bank/*.pch2 bank/*.prf2
//! ```

mod checksum;
mod info;
mod roundtrip;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use g2_patch::ModuleCatalog;
use tracing_subscriber::EnvFilter;

/// G2 CLI - Inspect and rewrite Nord Modular G2 patch files
#[derive(Parser)]
#[command(name = "g2")]
#[command(about = "Inspect and rewrite Nord Modular G2 patch files")]
#[command(version)]
struct Cli {
    /// Module type catalog (TOML) used to decode module lists
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Log section-level parsing details
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the content of patch and performance files
    Info(info::InfoArgs),

    /// Verify the trailing checksum of files
    Checksum(checksum::ChecksumArgs),

    /// Parse and re-encode files, reporting any byte difference
    Roundtrip(roundtrip::RoundtripArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Info(args) => info::execute(args, &load_catalog(cli.catalog)?),
        Commands::Checksum(args) => checksum::execute(args),
        Commands::Roundtrip(args) => roundtrip::execute(args, &load_catalog(cli.catalog)?),
    }
}

/// Load the module catalog, or an empty one when none was given
fn load_catalog(path: Option<PathBuf>) -> Result<ModuleCatalog> {
    let Some(path) = path else {
        tracing::warn!("No --catalog given, only patches without modules will decode");
        return Ok(ModuleCatalog::new());
    };
    let catalog = ModuleCatalog::load(&path)
        .with_context(|| format!("Failed to load module catalog {}", path.display()))?;
    tracing::debug!("Loaded {} module types from {}", catalog.len(), path.display());
    Ok(catalog)
}

/// Run `f` on every file, logging failures, and fail if any file failed
fn for_each_file(files: &[PathBuf], mut f: impl FnMut(&PathBuf) -> Result<()>) -> Result<()> {
    let mut failed = 0;
    for path in files {
        if let Err(e) = f(path) {
            tracing::error!("{}: {:#}", path.display(), e);
            failed += 1;
        }
    }
    if failed > 0 {
        anyhow::bail!("{} of {} files failed", failed, files.len());
    }
    Ok(())
}
