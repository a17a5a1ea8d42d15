//! Roundtrip command - parse, re-encode and compare files byte for byte

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use g2_patch::{G2File, ModuleCatalog};

/// Arguments for the roundtrip command
#[derive(Args)]
pub struct RoundtripArgs {
    /// Patch or performance files (.pch2 / .prf2)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory to write the re-encoded files to
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the roundtrip command
pub fn execute(args: RoundtripArgs, catalog: &ModuleCatalog) -> Result<()> {
    if let Some(dir) = &args.output {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    crate::for_each_file(&args.files, |path| {
        roundtrip_file(path, catalog, args.output.as_deref())
    })
}

fn roundtrip_file(path: &Path, catalog: &ModuleCatalog, output: Option<&Path>) -> Result<()> {
    let original = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let file = G2File::parse(&original, catalog)?;
    let encoded = file.to_bytes()?;

    if let Some(dir) = output {
        let name = path.file_name().context("Input path has no file name")?;
        let target = dir.join(name);
        std::fs::write(&target, &encoded)
            .with_context(|| format!("Failed to write {}", target.display()))?;
    }

    match first_difference(&original, &encoded) {
        None => {
            println!("{}: identical ({} bytes)", path.display(), original.len());
            Ok(())
        }
        Some(offset) => anyhow::bail!(
            "re-encoded file differs at byte {} (original {} bytes, re-encoded {} bytes)",
            offset,
            original.len(),
            encoded.len()
        ),
    }
}

/// Offset of the first differing byte, including a length mismatch
fn first_difference(a: &[u8], b: &[u8]) -> Option<usize> {
    a.iter()
        .zip(b)
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_difference() {
        assert_eq!(first_difference(b"abc", b"abc"), None);
        assert_eq!(first_difference(b"abc", b"abd"), Some(2));
        assert_eq!(first_difference(b"ab", b"abc"), Some(2));
    }

    #[test]
    fn test_roundtrip_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("perf.prf2");
        G2File::new_performance().write(&input).unwrap();

        let out = dir.path().join("out");
        std::fs::create_dir_all(&out).unwrap();
        roundtrip_file(&input, &ModuleCatalog::new(), Some(&out)).unwrap();
        assert_eq!(
            std::fs::read(out.join("perf.prf2")).unwrap(),
            std::fs::read(&input).unwrap()
        );
    }
}
