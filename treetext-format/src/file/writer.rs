use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::{ArchiveProgress, ArchiveStats};
use crate::error::ArchiveError;
use crate::record::ArchiveEntry;
use crate::ser::Serialize;

/// Appends records to an archive stream.
#[derive(Debug)]
pub struct ArchiveWriter<W: Write> {
    inner: W,
    records: u64,
}

impl ArchiveWriter<BufWriter<File>> {
    /// Create (or truncate) an archive file for writing.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path.as_ref())?;
        Ok(ArchiveWriter::new(BufWriter::new(file)))
    }
}

impl<W: Write> ArchiveWriter<W> {
    pub fn new(inner: W) -> ArchiveWriter<W> {
        ArchiveWriter { inner, records: 0 }
    }

    #[inline(always)]
    pub fn records(&self) -> u64 {
        self.records
    }

    pub fn append(&mut self, entry: &ArchiveEntry) -> std::io::Result<()> {
        entry.write(&mut self.inner)?;
        self.records += 1;
        Ok(())
    }

    /// Flush and hand back the underlying writer.
    pub fn finish(mut self) -> std::io::Result<W> {
        self.inner.flush()?;
        Ok(self.inner)
    }
}

/// Read one file into a record, substituting the placeholder when the file
/// cannot be read as text.
pub fn read_entry<P: AsRef<Path>>(path: P) -> ArchiveEntry {
    let path = path.as_ref();
    let original_path = path.to_string_lossy().into_owned();

    match crate::fs::read_text(path) {
        Ok(text) => ArchiveEntry::new(original_path, text),
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "cannot read file, writing placeholder");
            ArchiveEntry::unreadable(original_path, err)
        }
    }
}

/// Archive every file below `source` into `output`.
pub fn archive_dir<S: AsRef<Path>, O: AsRef<Path>>(
    source: S,
    output: O,
) -> Result<ArchiveStats, ArchiveError> {
    archive_dir_with_progress(source, output, |_| {})
}

/// Same as [`archive_dir`], calling `progress` for every file handled.
pub fn archive_dir_with_progress<S, O, F>(
    source: S,
    output: O,
    mut progress: F,
) -> Result<ArchiveStats, ArchiveError>
where
    S: AsRef<Path>,
    O: AsRef<Path>,
    F: FnMut(ArchiveProgress),
{
    let source = source.as_ref();
    let output = output.as_ref();

    let files = crate::fs::list_files(source).map_err(|source_err| ArchiveError::Enumerate {
        path: source.to_path_buf(),
        source: source_err,
    })?;

    let mut writer = ArchiveWriter::create(output).map_err(|source| ArchiveError::CreateArchive {
        path: output.to_path_buf(),
        source,
    })?;

    let mut stats = ArchiveStats::default();

    for (path, _relative) in files.into_iter() {
        if crate::fs::is_same_file(&path, output) {
            tracing::debug!(path = %path.display(), "skipping the archive itself");
            progress(ArchiveProgress::SkippedSelf { path });
            continue;
        }

        let entry = read_entry(&path);
        writer
            .append(&entry)
            .map_err(|source| ArchiveError::WriteRecord {
                path: path.clone(),
                source,
            })?;

        let unreadable = entry.content().is_unreadable();
        stats.files += 1;
        stats.bytes += entry.content_len() as u64;
        if unreadable {
            stats.unreadable += 1;
        }

        progress(ArchiveProgress::Appended { path, unreadable });
    }

    let records = writer.records();
    writer.finish().map_err(|source| ArchiveError::FinishArchive {
        path: output.to_path_buf(),
        source,
    })?;

    tracing::info!(
        source = %source.display(),
        output = %output.display(),
        records,
        unreadable = stats.unreadable,
        "archive written"
    );

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_records() {
        let mut writer = ArchiveWriter::new(Vec::new());
        writer.append(&ArchiveEntry::new("a", "1")).unwrap();
        writer.append(&ArchiveEntry::new("b", "2")).unwrap();
        assert_eq!(writer.records(), 2);

        let buf = writer.finish().unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with(crate::SEPARATOR));
        assert!(text.ends_with(&format!("{}\n", crate::SEPARATOR)));
    }

    #[test]
    fn read_entry_substitutes_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blob.bin");
        std::fs::write(&path, [0xffu8, 0xfe, 0x00, 0x80]).unwrap();

        let entry = read_entry(&path);
        assert!(entry.content().is_unreadable());
        assert!(entry
            .content()
            .to_string()
            .starts_with("[Error reading file: "));
    }

    #[test]
    fn read_entry_normalizes_newlines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dos.txt");
        std::fs::write(&path, "one\r\ntwo\r\n").unwrap();

        let entry = read_entry(&path);
        assert_eq!(entry.content().as_text(), Some("one\ntwo\n"));
    }
}
