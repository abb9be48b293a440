//! Configuration structures and loading logic.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::api::client::DEFAULT_CLIENT_NAME;
use crate::api::Credentials;
use crate::error::{Error, Result};
use crate::feed::DEFAULT_PAGE_SIZE;

/// Main configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Account credentials configuration.
#[derive(Clone, Default, Deserialize)]
pub struct AccountConfig {
    /// Email address of the GrandPad account.
    #[serde(default)]
    pub email: String,

    /// Account password.
    #[serde(default)]
    pub password: String,
}

impl fmt::Debug for AccountConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountConfig")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API, e.g. `https://api.example.com/v1`.
    #[serde(default)]
    pub url: String,

    /// Client name sent with the password grant.
    #[serde(default = "default_client")]
    pub client: String,

    /// Posts requested per feed page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            client: default_client(),
            page_size: default_page_size(),
        }
    }
}

/// Output locations and console options.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Folder receiving downloaded media files.
    #[serde(default = "default_media_folder")]
    pub media_folder: PathBuf,

    /// Folder receiving the posts and users dumps.
    #[serde(default)]
    pub records_directory: Option<PathBuf>,

    /// Whether to show progress bars.
    #[serde(default = "default_true")]
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            media_folder: default_media_folder(),
            records_directory: None,
            show_progress: true,
        }
    }
}

fn default_client() -> String {
    DEFAULT_CLIENT_NAME.to_string()
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_media_folder() -> PathBuf {
    PathBuf::from("media")
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}. Create one from config.example.toml",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Get the effective directory for the record dumps.
    pub fn records_directory(&self) -> PathBuf {
        self.output
            .records_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Credentials for the password grant.
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.account.email.clone(),
            password: self.account.password.clone(),
            client: self.api.client.clone(),
        }
    }
}
