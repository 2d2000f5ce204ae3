use crate::error::TaskError;
use crate::store::Storage;
use crate::{Status, Task, TaskRepository};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Parser, Subcommand};
use std::fmt::{Display, Formatter};
use tracing::info;

/// Track tasks in a local JSON file
#[derive(Parser, Debug)]
#[command(name = "task-cli", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Add a new task
    Add { description: String },
    /// Replace the description of a task
    Update {
        #[arg(allow_negative_numbers = true)]
        id: i64,
        description: String,
    },
    /// Delete a task
    Delete {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Mark a task as in progress
    MarkInProgress {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// Mark a task as done
    MarkDone {
        #[arg(allow_negative_numbers = true)]
        id: i64,
    },
    /// List tasks, optionally only those with the given status
    List { status: Option<String> },
}

/// How a rejected command line is reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgumentFailure {
    /// A required argument or the subcommand is missing: print usage, exit successfully.
    Usage,
    /// The first argument names no command.
    UnknownCommand(String),
    /// Anything else, left to clap.
    Invalid,
}

impl ArgumentFailure {
    pub fn classify(err: &clap::Error) -> Self {
        match err.kind() {
            ErrorKind::MissingRequiredArgument
            | ErrorKind::MissingSubcommand
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => ArgumentFailure::Usage,
            ErrorKind::InvalidSubcommand => match err.get(ContextKind::InvalidSubcommand) {
                Some(ContextValue::String(command)) => {
                    ArgumentFailure::UnknownCommand(command.clone())
                }
                _ => ArgumentFailure::Invalid,
            },
            _ => ArgumentFailure::Invalid,
        }
    }
}

/// What a command did, rendered as the text printed to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Added(u32),
    Updated,
    Deleted,
    Marked(Status),
    NotFound,
    Listed(Vec<Task>),
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Report::Added(id) => writeln!(f, "Task added successfully (ID: {id})"),
            Report::Updated => writeln!(f, "Task updated successfully"),
            Report::Deleted => writeln!(f, "Task deleted successfully"),
            Report::Marked(status) => writeln!(f, "Task marked as {status}"),
            Report::NotFound => writeln!(f, "Task not found"),
            Report::Listed(tasks) => tasks.iter().try_for_each(|task| writeln!(f, "{task}")),
        }
    }
}

/// Runs one command: a single load, then a save only if a task changed.
pub fn run(command: Commands, store: &impl Storage) -> Result<Report, TaskError> {
    let mut tasks = store.load()?;

    let report = match command {
        Commands::Add { description } => Report::Added(tasks.add(description)?),
        Commands::Update { id, description } => {
            if task_id(id).is_some_and(|id| tasks.update(id, description)) {
                Report::Updated
            } else {
                Report::NotFound
            }
        }
        Commands::Delete { id } => match task_id(id).and_then(|id| tasks.delete(id)) {
            Some(_) => Report::Deleted,
            None => Report::NotFound,
        },
        Commands::MarkInProgress { id } => mark(&mut tasks, id, Status::InProgress),
        Commands::MarkDone { id } => mark(&mut tasks, id, Status::Done),
        Commands::List { status } => {
            return Ok(Report::Listed(
                tasks.list(status.as_deref()).cloned().collect(),
            ));
        }
    };

    if report == Report::NotFound {
        return Ok(report);
    }
    store.save(&tasks)?;
    info!(?report, "saved change");
    Ok(report)
}

/// Ids outside the stored range can never match a task.
fn task_id(id: i64) -> Option<u32> {
    u32::try_from(id).ok()
}

fn mark(tasks: &mut TaskRepository, id: i64, status: Status) -> Report {
    if task_id(id).is_some_and(|id| tasks.set_status(id, status)) {
        Report::Marked(status)
    } else {
        Report::NotFound
    }
}
