use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("source directory does not exist: '{0}'")]
    SourceDirMissing(PathBuf),

    #[error("not a regular file: '{0}'")]
    NotAFile(PathBuf),

    #[error("{tool} failed on '{archive}' (exit code {code:?}): {stderr}")]
    ToolFailed {
        tool: String,
        archive: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    #[error("failed to {op} '{path}': {source}")]
    FileOp {
        op: &'static str,
        path: PathBuf,
        source: io::Error,
    },

    #[error(transparent)]
    Platform(#[from] unpackr_platform::Error),
}

impl Error {
    pub(crate) fn file_op(
        op: &'static str,
        path: impl Into<PathBuf>,
    ) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::FileOp { op, path, source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
