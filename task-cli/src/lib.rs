pub mod cli;
pub mod config;
pub mod error;
pub mod store;
pub mod task;

pub use error::TaskError;
pub use store::{JsonFileStore, Storage};
pub use task::{Status, Task};

use serde::{Deserialize, Serialize};

/// The ordered list of tasks, serialized as a plain JSON array.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(transparent)]
pub struct TaskRepository {
    tasks: Vec<Task>,
}

impl TaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(json)
    }

    pub fn save_as_json(&self, writer: impl std::io::Write) -> Result<(), serde_json::Error> {
        serde_json::to_writer_pretty(writer, &self)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// The id the next added task will receive.
    ///
    /// One past the highest live id, so removing a task never lets a later
    /// addition collide with a task that is still present. `None` once the
    /// highest id is `u32::MAX`.
    pub fn next_id(&self) -> Option<u32> {
        self.tasks
            .iter()
            .map(Task::id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
    }

    pub fn add(&mut self, description: String) -> Result<u32, TaskError> {
        let id = self.next_id().ok_or(TaskError::IdExhausted)?;
        self.tasks.push(Task::new(id, description));
        Ok(id)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    fn find_by_id_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|task| task.id == id)
    }

    /// Replaces the description of the task with `id`. Returns `false` when no task matches.
    pub fn update(&mut self, id: u32, description: String) -> bool {
        match self.find_by_id_mut(id) {
            Some(task) => {
                task.description = description;
                task.touch();
                true
            }
            None => false,
        }
    }

    pub fn set_status(&mut self, id: u32, status: Status) -> bool {
        match self.find_by_id_mut(id) {
            Some(task) => {
                task.status = status;
                task.touch();
                true
            }
            None => false,
        }
    }

    /// Removes the task with `id`, keeping the order of the rest.
    pub fn delete(&mut self, id: u32) -> Option<Task> {
        let index = self.tasks.iter().position(|task| task.id == id)?;
        Some(self.tasks.remove(index))
    }

    /// Tasks in file order whose status name equals `status` exactly.
    /// `None` or an empty filter yields every task.
    pub fn list<'a>(&'a self, status: Option<&'a str>) -> impl Iterator<Item = &'a Task> + 'a {
        let status = status.filter(|s| !s.is_empty());
        self.tasks
            .iter()
            .filter(move |task| status.is_none_or(|s| task.status.as_str() == s))
    }
}
