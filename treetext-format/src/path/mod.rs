//! Mapping archived paths onto a destination directory.

use std::path::{Component, Path, PathBuf};

use relative_path::RelativePathBuf;

/// How an archived path is placed below the destination root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemapMode {
    /// Strip the longest common *string* prefix shared by the archived path
    /// and the destination root. Compatible with existing archives, but not
    /// path aware: `/home/alice/x` against `/home/alan` shares `/home/al`.
    CommonPrefix,
    /// Strip a known source root by whole path components. Paths outside the
    /// root keep their normal components, so nothing lands outside the
    /// destination.
    SourceRoot(PathBuf),
}

impl Default for RemapMode {
    fn default() -> Self {
        RemapMode::CommonPrefix
    }
}

impl RemapMode {
    /// Compute where `original_path` is written below `dest`.
    pub fn destination<P: AsRef<Path>>(
        &self,
        original_path: &str,
        dest: P,
    ) -> std::io::Result<PathBuf> {
        match self {
            RemapMode::CommonPrefix => remap_common_prefix(original_path, dest.as_ref()),
            RemapMode::SourceRoot(root) => remap_source_root(original_path, root, dest.as_ref()),
        }
    }
}

/// Longest common prefix of two strings, compared character by character.
pub fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let end = a
        .char_indices()
        .zip(b.chars())
        .find(|((_, x), y)| x != y)
        .map(|((i, _), _)| i)
        .unwrap_or_else(|| a.len().min(b.len()));
    &a[..end]
}

/// Lexically resolve `.` and `..` and collapse repeated separators.
pub fn normalize<P: AsRef<Path>>(path: P) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Make `path` absolute against the working directory and normalize it.
/// An empty path resolves to the working directory itself.
pub fn absolutize<P: AsRef<Path>>(path: P) -> std::io::Result<PathBuf> {
    let path = path.as_ref();
    if path.is_absolute() {
        Ok(normalize(path))
    } else {
        Ok(normalize(std::env::current_dir()?.join(path)))
    }
}

/// The relative path from `start` to `path`, computed lexically on absolute
/// forms of both.
pub fn relative_to<P: AsRef<Path>, S: AsRef<Path>>(path: P, start: S) -> std::io::Result<PathBuf> {
    let path = absolutize(path)?;
    let start = absolutize(start)?;
    let rel = pathdiff::diff_paths(&path, &start).unwrap_or(path);
    if rel.as_os_str().is_empty() {
        Ok(PathBuf::from("."))
    } else {
        Ok(rel)
    }
}

fn remap_common_prefix(original_path: &str, dest: &Path) -> std::io::Result<PathBuf> {
    let dest_str = dest.to_string_lossy();
    let prefix = common_prefix(original_path, &dest_str);
    let rel = relative_to(original_path, prefix)?;
    Ok(dest.join(rel))
}

fn remap_source_root(original_path: &str, root: &Path, dest: &Path) -> std::io::Result<PathBuf> {
    let path = absolutize(original_path)?;
    let root = absolutize(root)?;

    let tail = match path.strip_prefix(&root) {
        Ok(tail) => tail.to_path_buf(),
        Err(_) => {
            tracing::warn!(
                path = original_path,
                root = %root.display(),
                "archived path is outside the source root"
            );
            normalize(original_path)
        }
    };

    let mut rel = RelativePathBuf::new();
    for component in tail.components() {
        if let Component::Normal(name) = component {
            rel.push(&*name.to_string_lossy());
        }
    }

    Ok(rel.to_logical_path(dest))
}
