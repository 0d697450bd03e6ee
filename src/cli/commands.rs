use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use strsim::levenshtein;
use uuid::Uuid;

use crate::errors::CliError;

pub const COMMAND_NAMES: [&str; 5] = ["summary", "portfolio", "config", "version", "help"];

const SUMMARY_USAGE: &str =
    "Usage: cashflow_cli summary <snapshot.json> [--account <uuid>] [--now <rfc3339>] [--plain]";
const PORTFOLIO_USAGE: &str = "Usage: cashflow_cli portfolio <snapshot.json> [--plain]";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Summary {
        snapshot: PathBuf,
        account: Option<Uuid>,
        now: Option<DateTime<Utc>>,
        plain: bool,
    },
    Portfolio {
        snapshot: PathBuf,
        plain: bool,
    },
    Config,
    Version,
    Help,
}

impl Command {
    /// Parses the arguments that follow the program name.
    pub fn parse(args: &[String]) -> Result<Command, CliError> {
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };
        match name.as_str() {
            "summary" => parse_summary(rest),
            "portfolio" => parse_portfolio(rest),
            "config" => Ok(Command::Config),
            "version" | "--version" | "-V" => Ok(Command::Version),
            "help" | "--help" | "-h" => Ok(Command::Help),
            other => Err(CliError::UnknownCommand {
                command: other.to_string(),
                suggestion: suggest_command(other).map(str::to_string),
            }),
        }
    }
}

/// Closest known command within an edit distance of three.
pub fn suggest_command(input: &str) -> Option<&'static str> {
    COMMAND_NAMES
        .iter()
        .map(|name| (levenshtein(name, input), *name))
        .min_by_key(|(distance, _)| *distance)
        .filter(|(distance, _)| *distance <= 3)
        .map(|(_, name)| name)
}

fn parse_summary(args: &[String]) -> Result<Command, CliError> {
    let usage = || CliError::Usage(SUMMARY_USAGE.into());
    let mut snapshot = None;
    let mut account = None;
    let mut now = None;
    let mut plain = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--account" => {
                let raw = iter.next().ok_or_else(usage)?;
                let id = Uuid::parse_str(raw).map_err(|_| {
                    CliError::Usage(format!("`{raw}` is not a valid account id."))
                })?;
                account = Some(id);
            }
            "--now" => {
                let raw = iter.next().ok_or_else(usage)?;
                now = Some(parse_instant(raw)?);
            }
            "--plain" => plain = true,
            flag if flag.starts_with("--") => {
                return Err(CliError::Usage(format!(
                    "Unknown option `{flag}`.\n{SUMMARY_USAGE}"
                )))
            }
            path if snapshot.is_none() => snapshot = Some(PathBuf::from(path)),
            _ => return Err(usage()),
        }
    }

    Ok(Command::Summary {
        snapshot: snapshot.ok_or_else(usage)?,
        account,
        now,
        plain,
    })
}

fn parse_portfolio(args: &[String]) -> Result<Command, CliError> {
    let usage = || CliError::Usage(PORTFOLIO_USAGE.into());
    let mut snapshot = None;
    let mut plain = false;
    for arg in args {
        match arg.as_str() {
            "--plain" => plain = true,
            flag if flag.starts_with("--") => return Err(usage()),
            path if snapshot.is_none() => snapshot = Some(PathBuf::from(path)),
            _ => return Err(usage()),
        }
    }
    Ok(Command::Portfolio {
        snapshot: snapshot.ok_or_else(usage)?,
        plain,
    })
}

/// Accepts RFC 3339 timestamps or bare dates, which mean midnight UTC.
fn parse_instant(raw: &str) -> Result<DateTime<Utc>, CliError> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Ok(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| CliError::Usage(format!("`{raw}` is not an RFC 3339 timestamp or date.")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_arguments_show_help() {
        assert_eq!(Command::parse(&[]).unwrap(), Command::Help);
    }

    #[test]
    fn parses_summary_flags() {
        let id = Uuid::new_v4();
        let command = Command::parse(&args(&[
            "summary",
            "data.json",
            "--account",
            &id.to_string(),
            "--now",
            "2024-06-01",
            "--plain",
        ]))
        .unwrap();
        assert_eq!(
            command,
            Command::Summary {
                snapshot: PathBuf::from("data.json"),
                account: Some(id),
                now: Some(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()),
                plain: true,
            }
        );
    }

    #[test]
    fn rfc3339_offsets_are_normalized() {
        let at = parse_instant("2024-06-01T02:00:00+02:00").unwrap();
        assert_eq!(at, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
        assert!(parse_instant("June 1st").is_err());
    }

    #[test]
    fn missing_snapshot_is_usage_error() {
        let err = Command::parse(&args(&["portfolio", "--plain"])).unwrap_err();
        assert_eq!(err.to_string(), PORTFOLIO_USAGE);
        let err = Command::parse(&args(&["summary"])).unwrap_err();
        assert_eq!(err.to_string(), SUMMARY_USAGE);
    }

    #[test]
    fn typos_get_suggestions() {
        assert_eq!(suggest_command("sumary"), Some("summary"));
        assert_eq!(suggest_command("portfolo"), Some("portfolio"));
        assert_eq!(suggest_command("xyzzyxyzzy"), None);
        let err = Command::parse(&args(&["versoin"])).unwrap_err();
        assert!(err.to_string().contains("Did you mean `version`?"));
    }
}
