use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("command not found: {cmd}")]
    CommandNotFound { cmd: String },

    #[error("command failed: {cmd}, source: {source}")]
    CommandFailed { cmd: String, source: std::io::Error },

    #[error("child process has no {stream} pipe: {cmd}")]
    MissingPipe { cmd: String, stream: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn spawn(cmd: &str, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::CommandNotFound {
                cmd: cmd.to_string(),
            }
        } else {
            Self::CommandFailed {
                cmd: cmd.to_string(),
                source,
            }
        }
    }
}
