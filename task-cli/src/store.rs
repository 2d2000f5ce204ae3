use crate::TaskRepository;
use crate::error::TaskError;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

/// Durable home of the task list. Every command loads once and saves at most once.
#[cfg_attr(test, mockall::automock)]
pub trait Storage {
    fn load(&self) -> Result<TaskRepository, TaskError>;
    fn save(&self, tasks: &TaskRepository) -> Result<(), TaskError>;
}

/// Stores tasks as a pretty-printed JSON array in a single file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn directory(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn write_error(&self, source: std::io::Error) -> TaskError {
        TaskError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl Storage for JsonFileStore {
    /// Missing and zero-length files both read as an empty list.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> Result<TaskRepository, TaskError> {
        let contents = match std::fs::read(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("task file does not exist yet");
                return Ok(TaskRepository::new());
            }
            Err(source) => {
                return Err(TaskError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if contents.is_empty() {
            debug!("task file is empty");
            return Ok(TaskRepository::new());
        }

        let tasks = TaskRepository::from_json(&contents).map_err(|source| TaskError::Parse {
            path: self.path.clone(),
            source,
        })?;
        debug!(count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Writes to a sibling temporary file and renames it over the target,
    /// so an interrupted save leaves the previous contents in place.
    #[tracing::instrument(skip(self, tasks), fields(path = %self.path.display()))]
    fn save(&self, tasks: &TaskRepository) -> Result<(), TaskError> {
        let mut file =
            NamedTempFile::new_in(self.directory()).map_err(|err| self.write_error(err))?;
        tasks.save_as_json(&mut file)?;
        file.flush().map_err(|err| self.write_error(err))?;
        file.as_file()
            .sync_all()
            .map_err(|err| self.write_error(err))?;
        file.persist(&self.path)
            .map_err(|err| self.write_error(err.error))?;
        debug!(count = tasks.len(), "saved tasks");
        Ok(())
    }
}
