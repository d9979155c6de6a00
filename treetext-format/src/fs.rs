//! Filesystem helpers shared by the archiver and the restorer.

use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};

/// Recursively list every regular file below `root`.
///
/// Each item is `(path, relative_path)`, where `path` is `root` joined with
/// `relative_path`. Hidden files are included, symlinks to files are listed
/// and symlinked directories are not descended. Any directory that cannot be
/// read fails the whole listing.
pub fn list_files<P: AsRef<Path>>(root: P) -> std::io::Result<Vec<(PathBuf, PathBuf)>> {
    let root = root.as_ref();

    let meta = std::fs::metadata(root)?;
    if !meta.is_dir() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("`{}` is not a directory", root.display()),
        ));
    }

    let walker = WalkDir::new(root)
        .sort(true)
        .skip_hidden(false)
        .follow_links(false)
        .parallelism(Parallelism::Serial);

    let mut out = vec![];
    for entry in walker {
        let entry =
            entry.map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        let path = entry.path();
        let file_type = entry.file_type();

        let is_file = if file_type.is_symlink() {
            std::fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false)
        } else {
            file_type.is_file()
        };

        if !is_file {
            continue;
        }

        let relative = match path.strip_prefix(root) {
            Ok(v) => v.to_path_buf(),
            Err(_) => continue,
        };
        out.push((path, relative));
    }

    tracing::debug!(root = %root.display(), files = out.len(), "listed files");
    Ok(out)
}

/// Read a file as UTF-8 text with newlines normalized.
pub fn read_text<P: AsRef<Path>>(path: P) -> std::io::Result<String> {
    std::fs::read_to_string(path).map(normalize_newlines)
}

/// Convert `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Check if `path` is `other`, resolving symlinks and relative components.
pub(crate) fn is_same_file(path: &Path, other: &Path) -> bool {
    match (path.canonicalize(), other.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newline_variants() {
        assert_eq!(normalize_newlines("a\r\nb\rc\n".into()), "a\nb\nc\n");
        assert_eq!(normalize_newlines("plain\n".into()), "plain\n");
    }

    #[test]
    fn carriage_return_before_crlf() {
        // `\r` then `\r\n` is two line breaks, as in text-mode reading.
        assert_eq!(normalize_newlines("one\r\r\ntwo".into()), "one\n\ntwo");
    }

    #[test]
    fn lists_nested_and_hidden_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("root");
        std::fs::create_dir_all(root.join("sub").join("deeper")).unwrap();
        std::fs::create_dir_all(root.join("empty")).unwrap();
        std::fs::write(root.join("a.txt"), "hi").unwrap();
        std::fs::write(root.join(".hidden"), "h").unwrap();
        std::fs::write(root.join("sub").join("deeper").join("c.txt"), "c").unwrap();

        let mut files = list_files(&root).unwrap();
        files.sort();

        let relative: Vec<_> = files.iter().map(|(_, rel)| rel.clone()).collect();
        assert_eq!(
            relative,
            vec![
                PathBuf::from(".hidden"),
                PathBuf::from("a.txt"),
                PathBuf::from("sub").join("deeper").join("c.txt"),
            ]
        );
        for (path, rel) in files.iter() {
            assert_eq!(path, &root.join(rel));
        }
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(list_files(dir.path().join("nope")).is_err());
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        let err = list_files(&file).unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }
}
