use std::io::Write;

use crate::header::{header_line, MARKER, SEPARATOR};
use crate::record::ArchiveEntry;

pub(crate) trait Serialize {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()>;
}

impl Serialize for ArchiveEntry {
    fn write<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let content = self.content.to_archive_text();

        writer.write_all(SEPARATOR.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(header_line(&self.original_path).as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(MARKER.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(content.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.write_all(SEPARATOR.as_bytes())?;
        writer.write_all(b"\n")?;

        tracing::debug!(
            path = %self.original_path,
            bytes = content.len(),
            unreadable = self.content.is_unreadable(),
            "serialized ArchiveEntry"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_text(entries: &[ArchiveEntry]) -> String {
        let mut buf = Vec::new();
        for entry in entries {
            entry.write(&mut buf).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn single_record_layout() {
        let text = to_text(&[ArchiveEntry::new("root/a.txt", "hi")]);
        let expected = format!(
            "{sep}\nfile: root/a.txt\n~~~~~~~~~~\nhi\n{sep}\n",
            sep = "~=".repeat(25)
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn records_are_back_to_back() {
        let entries = vec![
            ArchiveEntry::new("root/a.txt", "hi"),
            ArchiveEntry::new("root/sub/b.txt", "bye"),
        ];
        let text = to_text(&entries);
        assert_eq!(text.matches(SEPARATOR).count(), 4);
        assert!(text.contains(&format!("{}\n{}\n", SEPARATOR, SEPARATOR)));
    }

    #[test]
    fn placeholder_is_inline() {
        let text = to_text(&[ArchiveEntry::unreadable("root/x.bin", "bad bytes")]);
        assert!(text.contains("~~~~~~~~~~\n[Error reading file: bad bytes]\n"));
    }
}
