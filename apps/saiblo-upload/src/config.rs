//! Run configuration.
//!
//! Built from the command line, the `AUTH_TOKEN` environment variable and
//! an optional TOML file:
//! - `$XDG_CONFIG_HOME/saiblo-upload/config.toml`, else
//!   `~/.config/saiblo-upload/config.toml`
//! - or the file given with `--config`
//!
//! ```toml
//! compile_timeout_secs = 600
//!
//! [development]
//! api_base = "http://localhost:8000/api/"
//! ws_base = "ws://localhost:8000/ws/"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use saiblo_protocol::Credential;

use crate::cli::Cli;

/// Environment variable holding the login token.
pub const TOKEN_ENV: &str = "AUTH_TOKEN";

/// Which Saiblo site to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    Production,
    Development,
}

impl Deployment {
    fn default_api_base(self) -> &'static str {
        match self {
            Self::Production => saiblo_api::DEFAULT_BASE_URL,
            Self::Development => saiblo_api::DEV_BASE_URL,
        }
    }

    fn default_ws_base(self) -> &'static str {
        match self {
            Self::Production => saiblo_realtime::DEFAULT_WS_URL,
            Self::Development => saiblo_realtime::DEV_WS_URL,
        }
    }
}

/// Endpoint overrides for one deployment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Endpoints {
    pub api_base: Option<String>,
    pub ws_base: Option<String>,
}

/// Contents of the optional config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub compile_timeout_secs: Option<u64>,
    #[serde(default)]
    pub production: Endpoints,
    #[serde(default)]
    pub development: Endpoints,
}

impl FileConfig {
    /// Loads the file at `explicit`, or the default location if present.
    ///
    /// A missing default file is an empty config; a missing explicit file
    /// is an error.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) if path.is_file() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

/// Everything a run needs besides the request itself.
#[derive(Debug, Clone)]
pub struct Config {
    pub credential: Credential,
    pub deployment: Deployment,
    pub api_base: String,
    pub ws_base: String,
    pub compile_timeout: Option<Duration>,
}

impl Config {
    /// Merges the command line over the file config.
    pub fn new(cli: &Cli, credential: Credential, file: FileConfig) -> Self {
        let deployment = if cli.dev {
            Deployment::Development
        } else {
            Deployment::Production
        };
        let endpoints = match deployment {
            Deployment::Production => file.production,
            Deployment::Development => file.development,
        };

        Self {
            credential,
            deployment,
            api_base: endpoints
                .api_base
                .unwrap_or_else(|| deployment.default_api_base().into()),
            ws_base: endpoints
                .ws_base
                .unwrap_or_else(|| deployment.default_ws_base().into()),
            compile_timeout: cli
                .timeout
                .or(file.compile_timeout_secs)
                .map(Duration::from_secs),
        }
    }
}

/// Reads the credential from [`TOKEN_ENV`].
pub fn credential_from_env() -> Option<Credential> {
    credential_from_value(std::env::var(TOKEN_ENV).ok())
}

/// Unset, empty and whitespace-only tokens count as missing.
fn credential_from_value(token: Option<String>) -> Option<Credential> {
    token
        .filter(|token| !token.trim().is_empty())
        .map(Credential::new)
}

fn default_config_path() -> Option<PathBuf> {
    let base = match std::env::var_os("XDG_CONFIG_HOME") {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => PathBuf::from(std::env::var_os("HOME")?).join(".config"),
    };
    Some(base.join("saiblo-upload").join("config.toml"))
}
