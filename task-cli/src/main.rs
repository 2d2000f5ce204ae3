use anyhow::Context;
use clap::Parser;
use std::process::ExitCode;
use std::str::FromStr;
use task_cli::JsonFileStore;
use task_cli::cli::{self, ArgumentFailure, Cli};
use task_cli::config::Config;
use tracing::debug;
use tracing_subscriber::filter::LevelFilter;

fn main() -> anyhow::Result<ExitCode> {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(err) => match ArgumentFailure::classify(&err) {
            ArgumentFailure::Usage => {
                err.print()?;
                return Ok(ExitCode::SUCCESS);
            }
            ArgumentFailure::UnknownCommand(command) => {
                eprintln!("Unknown command: {command}");
                return Ok(ExitCode::from(2));
            }
            ArgumentFailure::Invalid => err.exit(),
        },
    };
    let config = Config::new()?;

    let level = LevelFilter::from_str(&config.log_level)
        .with_context(|| format!("invalid log level {:?}", config.log_level))?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "starting");

    let store = JsonFileStore::new(config.file);
    match cli::run(args.command, &store) {
        Ok(report) => {
            print!("{report}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("Error {} tasks: {err}", err.stage());
            Ok(ExitCode::FAILURE)
        }
    }
}
