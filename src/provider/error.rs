// ABOUTME: Provider API and host health error types.
// ABOUTME: ProviderError uses SNAFU context selectors; HostHealthError wraps it for the prober.

use snafu::Snafu;

use super::host::HostStatus;
use crate::types::HostId;

/// Failure talking to the infrastructure provider API.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ProviderError {
    #[snafu(display("failed to build HTTP client: {source}"))]
    Client { source: reqwest::Error },

    #[snafu(display("request for host {host_id} failed: {source}"))]
    Request {
        host_id: HostId,
        source: reqwest::Error,
    },

    #[snafu(display("provider rejected the API token (HTTP 401)"))]
    Unauthorized,

    #[snafu(display("host {host_id} not found"))]
    NotFound { host_id: HostId },

    #[snafu(display("provider returned HTTP {status}: {message}"))]
    Api { status: u16, message: String },

    #[snafu(display("invalid provider response for host {host_id}: {source}"))]
    Decode {
        host_id: HostId,
        source: reqwest::Error,
    },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Transport,
    Authentication,
    NotFound,
    Api,
}

impl ProviderError {
    pub fn kind(&self) -> ProviderErrorKind {
        match self {
            ProviderError::Client { .. } | ProviderError::Request { .. } => {
                ProviderErrorKind::Transport
            }
            ProviderError::Unauthorized => ProviderErrorKind::Authentication,
            ProviderError::NotFound { .. } => ProviderErrorKind::NotFound,
            ProviderError::Api { .. } | ProviderError::Decode { .. } => ProviderErrorKind::Api,
        }
    }
}

/// Why a host failed its health probe.
#[derive(Debug, thiserror::Error)]
pub enum HostHealthError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("host {name} is not active: {status}")]
    Inactive { name: String, status: HostStatus },
}
