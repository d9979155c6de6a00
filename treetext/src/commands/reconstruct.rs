use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use treetext_format::{ArchiveReader, RemapMode, RestoreOptions, RestoreProgress};

pub fn run(
    input_file: &Path,
    dest_dir: &Path,
    source_root: Option<PathBuf>,
    quiet: bool,
) -> Result<()> {
    let reader = ArchiveReader::open(input_file)?;

    let options = RestoreOptions {
        remap: source_root
            .map(RemapMode::SourceRoot)
            .unwrap_or_default(),
    };

    let stats = reader
        .restore_with_progress(dest_dir, &options, |progress| {
            tracing::debug!(?progress, "restore progress");
            if quiet {
                return;
            }
            if let RestoreProgress::Restored { path, .. } = progress {
                println!("Reconstructed: {}", path.display());
            }
        })
        .with_context(|| format!("Cannot reconstruct into `{}`", dest_dir.display()))?;

    tracing::info!(
        restored = stats.restored,
        skipped = stats.skipped,
        bytes = stats.bytes,
        "reconstruct finished"
    );

    if !quiet {
        println!(
            "Reconstructed {} files into {}",
            stats.restored,
            dest_dir.display()
        );
    }

    Ok(())
}
