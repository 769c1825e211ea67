//! CLI configuration.
//!
//! Settings live in `~/.config/cronofy/config.toml` by default:
//!
//! ```toml
//! data_center = "uk"
//! timeout = 30
//!
//! [credentials]
//! client_id = "env::CRONOFY_CLIENT_ID"
//! client_secret = "pass::cronofy/client_secret"
//! access_token = "..."
//! refresh_token = "..."
//! ```
//!
//! `client_id` and `client_secret` accept `pass::` and `env::` references.
//! Tokens obtained by `cronofy auth` are written back into `[credentials]`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use cronofy_api::ClientConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Contents of `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Data center suffix; empty selects the default one.
    pub data_center: String,

    /// Debug mode.
    pub debug: bool,

    /// Request timeout in seconds.
    pub timeout: u64,

    /// OAuth client credentials and tokens.
    pub credentials: Credentials,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_center: String::new(),
            debug: false,
            timeout: ClientConfig::DEFAULT_TIMEOUT_SECS,
            credentials: Credentials::default(),
        }
    }
}

/// The `[credentials]` table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_expires_at: Option<DateTime<Utc>>,
}

impl CliConfig {
    /// Loads `path`, or the default path when `None`.
    ///
    /// A missing default file yields the default configuration; a missing
    /// explicit file is an error.
    pub fn load(path: Option<&Path>) -> ClientResult<Self> {
        let (path, explicit) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::default_path(), false),
        };
        if !explicit && !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ClientError::Config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> ClientResult<Self> {
        toml::from_str(content).map_err(|e| {
            ClientError::Config(format!("failed to parse config: {}", e))
        })
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cronofy")
    }

    /// Builds the API client configuration, resolving secret references.
    pub fn to_api_config(&self) -> ClientResult<ClientConfig> {
        let client_id = resolve_field("client_id", self.credentials.client_id.as_deref())?;
        let client_secret =
            resolve_field("client_secret", self.credentials.client_secret.as_deref())?;

        let mut config = ClientConfig::new(client_id, client_secret)
            .with_data_center(self.data_center.as_str())
            .with_timeout(Duration::from_secs(self.timeout));
        if let Some(ref token) = self.credentials.access_token {
            config = config.with_access_token(token.as_str());
        }
        if let Some(ref token) = self.credentials.refresh_token {
            config = config.with_refresh_token(token.as_str());
        }
        if let Some(expires_at) = self.credentials.token_expires_at {
            config = config.with_token_expires_at(expires_at);
        }
        Ok(config)
    }

    /// Checks the configuration without touching the network.
    pub fn validate(&self) -> ClientResult<()> {
        if self.timeout == 0 {
            return Err(ClientError::Config("timeout must be greater than 0".into()));
        }
        let data_center = cronofy_api::DataCenter::new(self.data_center.as_str());
        if !data_center.is_known() {
            return Err(ClientError::Config(format!(
                "unknown data center `{}`",
                self.data_center
            )));
        }
        self.to_api_config().map(|_| ())
    }
}

fn resolve_field(name: &str, value: Option<&str>) -> ClientResult<String> {
    let raw = value.ok_or_else(|| {
        ClientError::Config(format!(
            "`{}` is missing from [credentials] in {}",
            name,
            CliConfig::default_path().display()
        ))
    })?;
    crate::secret::resolve(raw).map_err(|e| {
        ClientError::Config(format!("failed to resolve {}: {}", name, e))
    })
}

/// Writes the tokens held by `config` into the `[credentials]` table of
/// `path`, keeping every other setting and comment in the file.
pub fn save_tokens(path: &Path, config: &ClientConfig) -> ClientResult<()> {
    let content = if path.exists() {
        std::fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut doc = content
        .parse::<toml_edit::DocumentMut>()
        .map_err(|e| {
            ClientError::Config(format!("could not parse {}: {}", path.display(), e))
        })?;

    if !doc.contains_key("credentials") {
        doc["credentials"] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    let Some(credentials) = doc["credentials"].as_table_mut() else {
        return Err(ClientError::Config(format!(
            "`credentials` in {} is not a table",
            path.display()
        )));
    };

    set_or_remove(credentials, "access_token", config.access_token());
    set_or_remove(credentials, "refresh_token", config.refresh_token());
    let expires_at = config.token_expires_at().map(|at| at.to_rfc3339());
    set_or_remove(credentials, "token_expires_at", expires_at.as_deref());

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, doc.to_string())?;
    debug!(path = %path.display(), "tokens saved");
    Ok(())
}

fn set_or_remove(table: &mut toml_edit::Table, key: &str, value: Option<&str>) {
    match value {
        Some(value) => table[key] = toml_edit::value(value),
        None => {
            table.remove(key);
        }
    }
}
