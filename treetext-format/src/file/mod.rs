use std::path::PathBuf;

use crate::de::ParseSkip;
use crate::path::RemapMode;

pub mod reader;
pub mod writer;

/// Totals for one archiving run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ArchiveStats {
    pub files: u64,
    pub unreadable: u64,
    pub bytes: u64,
}

/// Totals for one restore run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RestoreStats {
    pub restored: u64,
    pub skipped: u64,
    pub bytes: u64,
}

/// Reported once per record while archiving.
#[derive(Debug, Clone)]
pub enum ArchiveProgress {
    Appended { path: PathBuf, unreadable: bool },
    SkippedSelf { path: PathBuf },
}

/// Reported once per segment while restoring.
#[derive(Debug, Clone)]
pub enum RestoreProgress {
    Restored { original: String, path: PathBuf },
    Skipped { reason: ParseSkip },
}

#[derive(Debug, Clone, Default)]
pub struct RestoreOptions {
    pub remap: RemapMode,
}
