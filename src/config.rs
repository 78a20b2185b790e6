//! Configuration file handling.
//!
//! The configuration file is stored at `$TDASH_HOME/config.json` and contains the backend API
//! base URL, the Teller Connect application id and environment, and the fixed request timeout
//! used by the HTTP client.

use crate::connect::TellerEnvironment;
use crate::{utils, Result};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const APP_NAME: &str = "teller-dash";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$TDASH_HOME` and from there it loads `$TDASH_HOME/config.json`.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the data directory and an initial `config.json` file.
    ///
    /// # Arguments
    /// - `dir` - The directory that will be the root of the data directory, e.g.
    ///   `$HOME/teller-dash`
    /// - `api_url` - The base URL of the budget backend, e.g. `http://localhost:8000/api`
    /// - `application_id` - Your Teller Connect application id
    /// - `environment` - The Teller environment to enroll against
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(
        dir: impl Into<PathBuf>,
        api_url: &str,
        application_id: &str,
        environment: TellerEnvironment,
    ) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative).await?;
        let root = utils::canonicalize(&maybe_relative).await?;
        let config_path = root.join(CONFIG_JSON);

        let config_file = ConfigFile {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            api_url: api_url.to_string(),
            application_id: application_id.to_string(),
            environment,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        };
        config_file.save(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    /// Validates that `dash_home` and the config file exist, then loads the configuration.
    pub async fn load(dash_home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dash_home.into();
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;

        Ok(Self {
            root,
            config_path,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn api_url(&self) -> &str {
        &self.config_file.api_url
    }

    pub fn application_id(&self) -> &str {
        &self.config_file.application_id
    }

    pub fn environment(&self) -> TellerEnvironment {
        self.config_file.environment
    }

    /// The fixed deadline applied to every API request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.config_file.request_timeout_secs)
    }
}

/// The serialized form of `config.json`.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct ConfigFile {
    app_name: String,
    config_version: u8,
    api_url: String,
    application_id: String,
    environment: TellerEnvironment,
    request_timeout_secs: u64,
}

impl ConfigFile {
    async fn save(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)?;
        utils::write(path, contents).await
    }

    async fn load(path: &Path) -> Result<Self> {
        utils::deserialize(path).await
    }
}
