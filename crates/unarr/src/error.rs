use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failure of an extract or list operation.
///
/// Display strings keep the wording callers of the tool wrappers have
/// always matched on.
#[derive(Debug, Error)]
pub enum Error {
    /// Archive path (or, for the unpack-only preset, target or selection) missing.
    #[error("Error: {0}")]
    InvalidRequest(String),

    #[error("options.indexes must be an array of integer, but it is: {0}")]
    InvalidIndexList(String),

    /// The tool wrote to stderr or exited abnormally.
    #[error("Error: {0}")]
    Subprocess(String),

    /// The tool reported in its stdout that nothing could be extracted.
    #[error("Error: No files extracted")]
    NoFilesExtracted,

    #[error("Error: no files found in archive. {0}")]
    EmptyArchiveOrNoMatch(String),

    #[error(transparent)]
    Launch(#[from] unarr_platform::Error),

    #[error("invalid JSON listing: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn missing_archive() -> Self {
        Self::InvalidRequest("archiveFile or options.archiveFile missing.".to_string())
    }
}
