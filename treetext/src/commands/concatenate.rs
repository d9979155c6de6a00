use std::path::Path;

use anyhow::{Context, Result};
use treetext_format::{archive_dir_with_progress, ArchiveProgress};

pub fn run(source_dir: &Path, output_file: &Path, quiet: bool) -> Result<()> {
    let stats = archive_dir_with_progress(source_dir, output_file, |progress| {
        tracing::debug!(?progress, "archive progress");
        if quiet {
            return;
        }
        match progress {
            ArchiveProgress::Appended { path, unreadable } => {
                if unreadable {
                    println!("Appended (unreadable): {}", path.display());
                } else {
                    println!("Appended: {}", path.display());
                }
            }
            ArchiveProgress::SkippedSelf { path } => {
                println!("Skipped archive itself: {}", path.display());
            }
        }
    })
    .with_context(|| {
        format!(
            "Cannot concatenate `{}` into `{}`",
            source_dir.display(),
            output_file.display()
        )
    })?;

    tracing::info!(
        files = stats.files,
        unreadable = stats.unreadable,
        bytes = stats.bytes,
        "concatenate finished"
    );

    if !quiet {
        println!(
            "Concatenated {} files into {}",
            stats.files,
            output_file.display()
        );
    }

    if stats.unreadable > 0 {
        eprintln!(
            "WARNING: {} files could not be read and were replaced with a placeholder",
            stats.unreadable
        );
    }

    Ok(())
}
