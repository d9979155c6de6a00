use std::fmt;

use crate::header::unreadable_placeholder;

/// The content slot of a record.
///
/// A file that could not be read while archiving still produces a record;
/// its content is replaced with an inline placeholder naming the error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryContent {
    Text(String),
    Unreadable(String),
}

impl EntryContent {
    #[inline(always)]
    pub fn is_unreadable(&self) -> bool {
        matches!(self, EntryContent::Unreadable(_))
    }

    #[inline(always)]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            EntryContent::Text(text) => Some(text),
            EntryContent::Unreadable(_) => None,
        }
    }

    /// The text that ends up in the archive for this slot.
    pub fn to_archive_text(&self) -> std::borrow::Cow<'_, str> {
        match self {
            EntryContent::Text(text) => text.as_str().into(),
            EntryContent::Unreadable(message) => unreadable_placeholder(message).into(),
        }
    }
}

impl fmt::Display for EntryContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_archive_text())
    }
}

/// One path and content unit of an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub original_path: String,
    pub content: EntryContent,
}

impl ArchiveEntry {
    #[inline(always)]
    pub fn new<P: Into<String>, C: Into<String>>(original_path: P, content: C) -> ArchiveEntry {
        ArchiveEntry {
            original_path: original_path.into(),
            content: EntryContent::Text(content.into()),
        }
    }

    #[inline(always)]
    pub fn unreadable<P: Into<String>, E: fmt::Display>(original_path: P, error: E) -> ArchiveEntry {
        ArchiveEntry {
            original_path: original_path.into(),
            content: EntryContent::Unreadable(error.to_string()),
        }
    }

    #[inline(always)]
    pub fn path(&self) -> &str {
        &self.original_path
    }

    #[inline(always)]
    pub fn content(&self) -> &EntryContent {
        &self.content
    }

    /// Byte length of the content as it appears in the archive.
    #[inline(always)]
    pub fn content_len(&self) -> usize {
        self.content.to_archive_text().len()
    }
}
