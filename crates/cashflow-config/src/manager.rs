use std::{
    env,
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};

use crate::{Config, ConfigError};

const HOME_ENV: &str = "CASHFLOW_HOME";
const DEFAULT_DIR_NAME: &str = ".cashflow";
const CONFIG_DIR: &str = "config";
const CONFIG_FILE: &str = "config.json";

/// Reads and writes the dashboard [`Config`] file.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Uses `<base>/config/config.json`, creating the directory if needed.
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        let config_dir = base.join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).map_err(|source| ConfigError::CreateDir {
            path: config_dir.clone(),
            source,
        })?;
        Ok(Self::new(config_dir.join(CONFIG_FILE)))
    }

    /// Resolves the base directory from `CASHFLOW_HOME`, defaulting to
    /// `~/.cashflow`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::with_base_dir(base_dir())
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Returns defaults when no file has been written yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let data = match fs::read_to_string(&self.config_path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.config_path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&data).map_err(|err| ConfigError::Malformed {
            path: self.config_path.clone(),
            message: err.to_string(),
        })
    }

    /// Writes pretty JSON to a sibling temp file, then renames it into place.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(config).map_err(|err| ConfigError::Malformed {
            path: self.config_path.clone(),
            message: err.to_string(),
        })?;
        let tmp = self.config_path.with_extension("json.tmp");
        replace_file(&tmp, &self.config_path, &json).map_err(|source| ConfigError::Write {
            path: self.config_path.clone(),
            source,
        })
    }
}

fn base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

fn replace_file(tmp: &Path, target: &Path, data: &str) -> io::Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(tmp)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    fs::rename(tmp, target)
}
