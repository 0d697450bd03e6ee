use std::path::PathBuf;

use cashflow_config::ConfigError;
use cashflow_core::CoreError;
use thiserror::Error;

/// Failures surfaced by the command-line front end.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error("Unknown command `{command}`.{}", suggestion_hint(.suggestion))]
    UnknownCommand {
        command: String,
        suggestion: Option<String>,
    },
    #[error("Could not read snapshot {path}: {source}")]
    SnapshotIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Snapshot {path} is not a valid account list: {source}")]
    SnapshotFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Could not render configuration: {0}")]
    ConfigRender(#[source] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Core(#[from] CoreError),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map(|name| format!(" Did you mean `{name}`?"))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_command_mentions_suggestion() {
        let err = CliError::UnknownCommand {
            command: "sumary".into(),
            suggestion: Some("summary".into()),
        };
        assert_eq!(
            err.to_string(),
            "Unknown command `sumary`. Did you mean `summary`?"
        );
        let err = CliError::UnknownCommand {
            command: "zzz".into(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "Unknown command `zzz`.");
    }

    #[test]
    fn config_render_failure_keeps_serializer_error() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let detail = source.to_string();
        let err = CliError::ConfigRender(source);
        assert_eq!(
            err.to_string(),
            format!("Could not render configuration: {detail}")
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
