//! A flat text archive of a directory tree.
//!
//! Every file becomes one record framed by [`SEPARATOR`] lines:
//!
//! ```text
//! ~=~=~=...~=
//! file: root/sub/b.txt
//! ~~~~~~~~~~
//! bye
//! ~=~=~=...~=
//! ```
//!
//! Content is stored verbatim, so a file containing the separator itself
//! splits into two segments on restore. Content is also trimmed on restore:
//! trailing blank lines do not survive, and empty files are dropped.

mod de;
mod error;
mod file;
pub mod fs;
mod header;
pub mod path;
mod record;
mod ser;

pub use de::{parse_segment, ParseSkip, Segment, Segments};
pub use error::{ArchiveError, RestoreError};
pub use file::reader::{restore_entry, ArchiveReader};
pub use file::writer::{archive_dir, archive_dir_with_progress, read_entry, ArchiveWriter};
pub use file::{ArchiveProgress, ArchiveStats, RestoreOptions, RestoreProgress, RestoreStats};
pub use fs::list_files;
pub use header::{HEADER_PREFIX, MARKER, SEPARATOR};
pub use path::RemapMode;
pub use record::{ArchiveEntry, EntryContent};

/// Restore an archive file into `dest` using the default remapping.
pub fn restore_file<I: AsRef<std::path::Path>, D: AsRef<std::path::Path>>(
    input: I,
    dest: D,
) -> Result<RestoreStats, RestoreError> {
    ArchiveReader::open(input)?.restore(dest, &RestoreOptions::default())
}
