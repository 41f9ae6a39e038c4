// ABOUTME: Configuration types and parsing for dropdeploy.yml.
// ABOUTME: Handles YAML parsing, credential resolution and `.env` loading.

mod compose;
mod credentials;
mod deserialize;
mod env_file;
mod init;

pub use compose::ComposeConfig;
pub use credentials::{
    ApiToken, Credentials, HOST_ID_ENV, TOKEN_ENV, resolve_host_id, resolve_token,
};
pub use env_file::{ENV_FILENAME, load_env_file};
pub use init::init_config;

use crate::error::{Error, Result};
use crate::provider::DEFAULT_API_URL;
use crate::stack::{RuntimeType, StackSettings};
use crate::types::HostId;
use serde::Deserialize;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "dropdeploy.yml";
pub const CONFIG_FILENAME_ALT: &str = "dropdeploy.yaml";
pub const CONFIG_FILENAME_DIR: &str = ".dropdeploy/config.yml";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000/health";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub droplet: Option<HostId>,

    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default)]
    pub runtime: RuntimeType,

    #[serde(default)]
    pub compose: ComposeConfig,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            droplet: None,
            api_url: default_api_url(),
            endpoint: default_endpoint(),
            runtime: RuntimeType::default(),
            compose: ComposeConfig::default(),
        }
    }
}

impl Config {
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty or comment-only file is a valid, all-defaults config.
        if yaml.lines().all(|l| l.trim().is_empty() || l.trim_start().starts_with('#')) {
            return Ok(Config::default());
        }
        serde_yaml::from_str(yaml).map_err(Error::from)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn discover(dir: &Path) -> Result<Self> {
        let candidates = [
            dir.join(CONFIG_FILENAME),
            dir.join(CONFIG_FILENAME_ALT),
            dir.join(CONFIG_FILENAME_DIR),
        ];

        for path in &candidates {
            if path.exists() {
                tracing::debug!(path = %path.display(), "loading config file");
                return Self::load(path);
            }
        }

        Err(Error::ConfigNotFound(dir.to_path_buf()))
    }

    /// Like `discover`, but a missing file yields the defaults.
    pub fn discover_or_default(dir: &Path) -> Result<Self> {
        match Self::discover(dir) {
            Err(Error::ConfigNotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    pub fn stack_settings(&self) -> StackSettings {
        self.compose.stack_settings(self.runtime)
    }
}
