use std::path::{Path, PathBuf};

use super::{RestoreOptions, RestoreProgress, RestoreStats};
use crate::de::Segments;
use crate::error::RestoreError;
use crate::record::ArchiveEntry;

/// An archive held fully in memory.
#[derive(Debug)]
pub struct ArchiveReader {
    text: String,
    path: Option<PathBuf>,
}

impl ArchiveReader {
    /// Read an archive file. Fails if the file cannot be opened or is not
    /// valid UTF-8.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<ArchiveReader, RestoreError> {
        let path = path.as_ref();
        let text = crate::fs::read_text(path).map_err(|source| RestoreError::OpenArchive {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "loaded archive");

        Ok(ArchiveReader {
            text,
            path: Some(path.to_path_buf()),
        })
    }

    pub fn from_text<S: Into<String>>(text: S) -> ArchiveReader {
        ArchiveReader {
            text: crate::fs::normalize_newlines(text.into()),
            path: None,
        }
    }

    #[inline(always)]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[inline(always)]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Every separator-delimited segment, parsed or skipped, in order.
    #[inline(always)]
    pub fn segments(&self) -> Segments<'_> {
        Segments::new(&self.text)
    }

    /// Only the segments that form valid records.
    pub fn entries(&self) -> impl Iterator<Item = ArchiveEntry> + '_ {
        self.segments().filter_map(Result::ok)
    }

    pub fn restore<P: AsRef<Path>>(
        &self,
        dest: P,
        options: &RestoreOptions,
    ) -> Result<RestoreStats, RestoreError> {
        self.restore_with_progress(dest, options, |_| {})
    }

    /// Write every valid record below `dest`, calling `progress` once per
    /// segment. The first failing write aborts the rest of the restore.
    pub fn restore_with_progress<P, F>(
        &self,
        dest: P,
        options: &RestoreOptions,
        mut progress: F,
    ) -> Result<RestoreStats, RestoreError>
    where
        P: AsRef<Path>,
        F: FnMut(RestoreProgress),
    {
        let dest = dest.as_ref();
        let mut stats = RestoreStats::default();

        for segment in self.segments() {
            let entry = match segment {
                Ok(entry) => entry,
                Err(reason) => {
                    tracing::trace!(%reason, "skipped segment");
                    stats.skipped += 1;
                    progress(RestoreProgress::Skipped { reason });
                    continue;
                }
            };

            let path = restore_entry(&entry, dest, options)?;
            stats.restored += 1;
            stats.bytes += entry.content_len() as u64;
            progress(RestoreProgress::Restored {
                original: entry.original_path,
                path,
            });
        }

        tracing::info!(
            dest = %dest.display(),
            restored = stats.restored,
            skipped = stats.skipped,
            "archive restored"
        );

        Ok(stats)
    }
}

/// Write a single record below `dest`, creating parent directories and
/// overwriting any existing file. Returns the path written.
pub fn restore_entry(
    entry: &ArchiveEntry,
    dest: &Path,
    options: &RestoreOptions,
) -> Result<PathBuf, RestoreError> {
    let out_path = options
        .remap
        .destination(entry.path(), dest)
        .map_err(|source| RestoreError::ResolvePath {
            path: entry.path().to_string(),
            source,
        })?;

    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| RestoreError::CreateDirectory {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    std::fs::write(&out_path, entry.content().to_archive_text().as_bytes()).map_err(|source| {
        RestoreError::WriteFile {
            path: out_path.clone(),
            source,
        }
    })?;

    tracing::debug!(original = entry.path(), path = %out_path.display(), "restored file");
    Ok(out_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SEPARATOR;

    fn archive(records: &[(&str, &str)]) -> String {
        let mut out = String::new();
        for (path, content) in records {
            out.push_str(&format!(
                "{sep}\nfile: {}\n~~~~~~~~~~\n{}\n{sep}\n",
                path,
                content,
                sep = SEPARATOR
            ));
        }
        out
    }

    #[test]
    fn entries_skip_garbage() {
        let mut text = String::from("preamble that is not a record\n");
        text.push_str(&archive(&[("a", "1"), ("b", "2")]));
        text.push_str("trailing junk");

        let reader = ArchiveReader::from_text(text);
        let paths: Vec<_> = reader.entries().map(|e| e.original_path).collect();
        assert_eq!(paths, vec!["a", "b"]);
    }

    #[test]
    fn from_text_normalizes_crlf() {
        let text = archive(&[("a", "line one\nline two")]).replace('\n', "\r\n");
        let reader = ArchiveReader::from_text(text);
        let entries: Vec<_> = reader.entries().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].content().as_text(), Some("line one\nline two"));
    }

    #[test]
    fn from_text_keeps_double_break() {
        let text = archive(&[("a", "one\r\r\ntwo")]);
        let reader = ArchiveReader::from_text(text);
        let entries: Vec<_> = reader.entries().collect();
        assert_eq!(entries[0].content().as_text(), Some("one\n\ntwo"));
    }

    #[test]
    fn open_missing_archive_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ArchiveReader::open(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, RestoreError::OpenArchive { .. }));
    }

    #[test]
    fn restore_counts_skips() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        let text = archive(&[("a.txt", "1"), ("empty.txt", "")]);

        let reader = ArchiveReader::from_text(text);
        let options = RestoreOptions {
            remap: crate::RemapMode::SourceRoot(PathBuf::from(".")),
        };

        let mut seen = vec![];
        let stats = reader
            .restore_with_progress(&dest, &options, |p| seen.push(p))
            .unwrap();

        assert_eq!(stats.restored, 1);
        // leading, empty record, between, trailing
        assert_eq!(stats.skipped, 4);
        assert_eq!(seen.len(), 5);
        assert_eq!(std::fs::read_to_string(dest.join("a.txt")).unwrap(), "1");
        assert!(!dest.join("empty.txt").exists());
    }

    #[test]
    fn write_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("out");
        std::fs::create_dir_all(&dest).unwrap();
        // A directory where the file should go cannot be overwritten.
        std::fs::create_dir_all(dest.join("a.txt")).unwrap();

        let reader = ArchiveReader::from_text(archive(&[("a.txt", "1"), ("b.txt", "2")]));
        let options = RestoreOptions {
            remap: crate::RemapMode::SourceRoot(PathBuf::from(".")),
        };
        let err = reader.restore(&dest, &options).unwrap_err();

        assert!(matches!(err, RestoreError::WriteFile { .. }));
        assert!(!dest.join("b.txt").exists());
    }
}
