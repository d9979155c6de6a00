/// Token written before and after every record. Fifty characters of
/// alternating `~` and `=`; archives are only interoperable if this is
/// reproduced exactly.
pub const SEPARATOR: &str = "~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=~=";

/// Divider line between a record's header and its content.
pub const MARKER: &str = "~~~~~~~~~~";

/// Prefix of the first line of every record.
pub const HEADER_PREFIX: &str = "file: ";

/// Minimum number of lines a trimmed segment needs to be considered a record:
/// header, marker and at least one line of content.
pub(crate) const MIN_RECORD_LINES: usize = 3;

#[inline(always)]
pub(crate) fn header_line(original_path: &str) -> String {
    format!("{}{}", HEADER_PREFIX, original_path)
}

#[inline(always)]
pub(crate) fn unreadable_placeholder(message: &str) -> String {
    format!("[Error reading file: {}]", message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separator_shape() {
        assert_eq!(SEPARATOR.len(), 50);
        assert_eq!(SEPARATOR, "~=".repeat(25));
        assert_ne!(MARKER, SEPARATOR);
        assert!(!SEPARATOR.contains(MARKER));
    }

    #[test]
    fn header() {
        assert_eq!(header_line("root/a.txt"), "file: root/a.txt");
    }
}
