use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RootError>;

#[derive(Debug, Error)]
pub enum RootError {
    #[error("no supported root manager found (KernelSU, APatch, Magisk)")]
    NoRuntime,

    #[error("module archive not found: {}", path.display())]
    MissingArchive { path: PathBuf },

    #[error(transparent)]
    CommandFailed(#[from] rmmp_platform::Error),

    #[error("`{cmd}` exited with {}", code.map_or_else(|| "a signal".to_string(), |c| format!("status {c}")))]
    ExitStatus { cmd: String, code: Option<i32> },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse module list: {0}")]
    Json(#[from] serde_json::Error),
}

impl RootError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RootError::Io {
            path: path.into(),
            source,
        }
    }
}
