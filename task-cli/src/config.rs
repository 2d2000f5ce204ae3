use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TASK_FILE: &str = "tasks.json";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Runtime settings. With nothing configured the task file is `tasks.json`
/// in the working directory and the tool takes no input besides its
/// arguments. The optional `task-cli.*` file and `TASK_CLI_*` variables only
/// exist to point the store at another file or raise the log level.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_file")]
    pub file: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: default_file(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads settings from an optional `task-cli.*` file in the working
    /// directory, overridden by `TASK_CLI_*` environment variables.
    pub fn new() -> anyhow::Result<Self> {
        Self::from_sources(
            config::File::with_name("task-cli").required(false),
            config::Environment::with_prefix("TASK_CLI"),
        )
    }

    fn from_sources<F, E>(file: F, environment: E) -> anyhow::Result<Self>
    where
        F: config::Source + Send + Sync + 'static,
        E: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn default_file() -> PathBuf {
    PathBuf::from(DEFAULT_TASK_FILE)
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}
