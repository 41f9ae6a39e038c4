// ABOUTME: Application-wide error types for dropdeploy.
// ABOUTME: Uses thiserror for ergonomic error handling; maps errors to process exit codes.

use std::path::PathBuf;
use thiserror::Error;

use crate::deploy::DeployError;
use crate::provider::{HostHealthError, ProviderError};
use crate::stack::StackError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("file already exists: {0}")]
    AlreadyExists(PathBuf),

    #[error("configuration file not found in {0}")]
    ConfigNotFound(PathBuf),

    #[error("API token not provided (use --token or set DO_API_TOKEN)")]
    MissingToken,

    #[error("droplet id not provided (use --droplet or set DO_DROPLET_ID)")]
    MissingHostId,

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    HostHealth(#[from] HostHealthError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Every failure currently exits 1: configuration errors and fatal step
    /// aborts as well as a failed post-deploy verification.
    pub fn exit_code(&self) -> i32 {
        1
    }
}

pub type Result<T> = std::result::Result<T, Error>;
