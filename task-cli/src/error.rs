use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize tasks: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("no task ids left, the highest id {} is already in use", u32::MAX)]
    IdExhausted,
}

impl TaskError {
    /// Which step of a command failed, used as the console prefix.
    pub fn stage(&self) -> &'static str {
        match self {
            TaskError::Read { .. } | TaskError::Parse { .. } => "loading",
            TaskError::Write { .. } | TaskError::Serialize(_) => "saving",
            TaskError::IdExhausted => "adding",
        }
    }
}
