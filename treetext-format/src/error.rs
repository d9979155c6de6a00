use std::path::PathBuf;

/// Fatal errors while writing an archive.
#[derive(Debug, thiserror::Error)]
pub enum ArchiveError {
    #[error("Cannot walk source directory `{}`", .path.display())]
    Enumerate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create archive `{}`", .path.display())]
    CreateArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write record for `{}`", .path.display())]
    WriteRecord {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot finish archive `{}`", .path.display())]
    FinishArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Fatal errors while restoring an archive. Malformed records are not
/// errors; see [`ParseSkip`](crate::ParseSkip).
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
    #[error("Cannot open archive `{}`", .path.display())]
    OpenArchive {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot resolve destination for `{path}`")]
    ResolvePath {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot create directory `{}`", .path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write file `{}`", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
