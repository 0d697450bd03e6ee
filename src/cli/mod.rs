//! `cashflow_cli` entry point: argument dispatch and command execution.

pub mod commands;
pub mod render;
pub mod snapshot;

use std::env;

use cashflow_config::{Config, ConfigManager};
use chrono::Utc;
use tracing::debug;

use crate::{errors::CliError, utils::build_info};

pub use commands::{suggest_command, Command, COMMAND_NAMES};
use render::Renderer;

const HELP: &str = "\
Cashflow dashboard

Usage: cashflow_cli <command> [options]

Commands:
  summary <snapshot.json>    Past movements, upcoming occurrences, and balance projection
      --account <uuid>       Account to summarize (defaults to the first one)
      --now <rfc3339>        Reference instant (defaults to the current time)
      --plain                Disable colors
  portfolio <snapshot.json>  Balances and shares per account type
      --plain                Disable colors
  config                     Show the configuration file and effective settings
  version                    Show build information
  help                       Show this message

CASHFLOW_HOME selects the configuration directory (default ~/.cashflow).";

/// Parses the process arguments, runs the command, and prints its output.
pub fn run_cli() -> Result<(), CliError> {
    let args: Vec<String> = env::args().skip(1).collect();
    let command = Command::parse(&args)?;
    let manager = ConfigManager::from_env()?;
    let config = manager.load()?;
    debug!(path = %manager.config_path().display(), "configuration loaded");
    let output = execute(&command, &config, &manager)?;
    println!("{output}");
    Ok(())
}

/// Runs `command` and returns its rendered output.
pub fn execute(
    command: &Command,
    config: &Config,
    manager: &ConfigManager,
) -> Result<String, CliError> {
    match command {
        Command::Summary {
            snapshot,
            account,
            now,
            plain,
        } => {
            let dashboard = snapshot::open_dashboard(snapshot, &config.projection)?;
            let now = now.unwrap_or_else(Utc::now);
            let selected = match account {
                Some(id) => Some(dashboard.account(*id)?),
                None => dashboard.selected_account(None),
            };
            let Some(selected) = selected else {
                return Ok("No accounts in snapshot.".to_string());
            };
            let summary = dashboard
                .cashflow(Some(selected.id), now)
                .unwrap_or_default();
            Ok(Renderer::new(config, *plain).summary(selected, &summary))
        }
        Command::Portfolio { snapshot, plain } => {
            let dashboard = snapshot::open_dashboard(snapshot, &config.projection)?;
            Ok(Renderer::new(config, *plain).portfolio(&dashboard.portfolio()))
        }
        Command::Config => {
            let settings =
                serde_json::to_string_pretty(config).map_err(CliError::ConfigRender)?;
            Ok(format!(
                "Config file: {}\n{settings}",
                manager.config_path().display()
            ))
        }
        Command::Version => Ok(build_info::current().describe()),
        Command::Help => Ok(HELP.to_string()),
    }
}
