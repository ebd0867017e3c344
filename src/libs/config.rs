//! Configuration management for taskboard.
//!
//! All settings come from the environment; `main` loads a `.env` file first
//! so local setups can keep them in one place.
//!
//! ## Storage
//!
//! `STORAGE_MODE` picks the document store:
//!
//! - **`local`** (default): a SQLite file in the application data directory,
//!   or `TASKBOARD_DB_PATH` when set
//! - **`firestore`**: Cloud Firestore over REST, configured by the six
//!   `FIREBASE_*` settings below
//!
//! The Firebase settings are validated lazily. A missing value does not stop
//! the server from starting; the first database access fails instead, with a
//! message naming exactly the missing variables.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskboard::libs::config::Settings;
//!
//! let settings = Settings::from_env()?;
//! println!("API at {}", settings.api_url);
//! # Ok::<(), taskboard::libs::config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

pub const FIREBASE_API_KEY: &str = "FIREBASE_API_KEY";
pub const FIREBASE_AUTH_DOMAIN: &str = "FIREBASE_AUTH_DOMAIN";
pub const FIREBASE_PROJECT_ID: &str = "FIREBASE_PROJECT_ID";
pub const FIREBASE_STORAGE_BUCKET: &str = "FIREBASE_STORAGE_BUCKET";
pub const FIREBASE_MESSAGING_SENDER_ID: &str = "FIREBASE_MESSAGING_SENDER_ID";
pub const FIREBASE_APP_ID: &str = "FIREBASE_APP_ID";

const STORAGE_MODE: &str = "STORAGE_MODE";
const DB_PATH: &str = "TASKBOARD_DB_PATH";
const EMULATOR_HOST: &str = "FIRESTORE_EMULATOR_HOST";
const HOST: &str = "HOST";
const PORT: &str = "PORT";
const API_URL: &str = "TASKBOARD_API_URL";
const POLL_INTERVAL_MS: &str = "TASKBOARD_POLL_INTERVAL_MS";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:3000";
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(2000);

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Firebase configuration is incomplete. Missing environment variables: {}", .0.join(", "))]
    Incomplete(Vec<&'static str>),

    #[error("Invalid value '{value}' for {name}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    #[default]
    Local,
    Firestore,
}

impl FromStr for StorageMode {
    type Err = ();

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "local" => Ok(StorageMode::Local),
            "firestore" => Ok(StorageMode::Firestore),
            _ => Err(()),
        }
    }
}

/// The six Firebase web-app settings, each possibly missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FirebaseSettings {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
}

/// Firebase settings with every value present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl FirebaseSettings {
    /// Names of the variables that are unset, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (FIREBASE_API_KEY, &self.api_key),
            (FIREBASE_AUTH_DOMAIN, &self.auth_domain),
            (FIREBASE_PROJECT_ID, &self.project_id),
            (FIREBASE_STORAGE_BUCKET, &self.storage_bucket),
            (FIREBASE_MESSAGING_SENDER_ID, &self.messaging_sender_id),
            (FIREBASE_APP_ID, &self.app_id),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn validate(&self) -> Result<FirebaseConfig, ConfigError> {
        match (
            &self.api_key,
            &self.auth_domain,
            &self.project_id,
            &self.storage_bucket,
            &self.messaging_sender_id,
            &self.app_id,
        ) {
            (Some(api_key), Some(auth_domain), Some(project_id), Some(storage_bucket), Some(messaging_sender_id), Some(app_id)) => {
                Ok(FirebaseConfig {
                    api_key: api_key.clone(),
                    auth_domain: auth_domain.clone(),
                    project_id: project_id.clone(),
                    storage_bucket: storage_bucket.clone(),
                    messaging_sender_id: messaging_sender_id.clone(),
                    app_id: app_id.clone(),
                })
            }
            _ => Err(ConfigError::Incomplete(self.missing())),
        }
    }
}

/// Every runtime setting of the server and the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub storage: StorageMode,
    pub db_path: Option<PathBuf>,
    pub firebase: FirebaseSettings,
    pub emulator_host: Option<String>,
    pub host: String,
    pub port: u16,
    pub api_url: String,
    pub poll_interval: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageMode::default(),
            db_path: None,
            firebase: FirebaseSettings::default(),
            emulator_host: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds settings from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());
        let defaults = Settings::default();

        let storage = match get(STORAGE_MODE) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name: STORAGE_MODE, value })?,
            None => defaults.storage,
        };
        let port = match get(PORT) {
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name: PORT, value })?,
            None => defaults.port,
        };
        let poll_interval = match get(POLL_INTERVAL_MS) {
            Some(value) => match value.parse::<u64>() {
                Ok(millis) if millis > 0 => Duration::from_millis(millis),
                _ => return Err(ConfigError::Invalid { name: POLL_INTERVAL_MS, value }),
            },
            None => defaults.poll_interval,
        };

        Ok(Settings {
            storage,
            db_path: get(DB_PATH).map(PathBuf::from),
            firebase: FirebaseSettings {
                api_key: get(FIREBASE_API_KEY),
                auth_domain: get(FIREBASE_AUTH_DOMAIN),
                project_id: get(FIREBASE_PROJECT_ID),
                storage_bucket: get(FIREBASE_STORAGE_BUCKET),
                messaging_sender_id: get(FIREBASE_MESSAGING_SENDER_ID),
                app_id: get(FIREBASE_APP_ID),
            },
            emulator_host: get(EMULATOR_HOST),
            host: get(HOST).unwrap_or(defaults.host),
            port,
            api_url: get(API_URL).unwrap_or(defaults.api_url),
            poll_interval,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
