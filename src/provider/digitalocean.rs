// ABOUTME: DigitalOcean API client for fetching droplet status.
// ABOUTME: Authenticated with a bearer token; no retries, default HTTP client timeouts.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use snafu::ResultExt;

use super::HostProvider;
use super::error::{
    ApiSnafu, ClientSnafu, DecodeSnafu, NotFoundSnafu, ProviderError, RequestSnafu,
    UnauthorizedSnafu,
};
use super::host::{Host, HostStatus};
use crate::types::HostId;

pub const DEFAULT_API_URL: &str = "https://api.digitalocean.com";

/// Client for the DigitalOcean v2 API.
#[derive(Clone)]
pub struct DigitalOcean {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl std::fmt::Debug for DigitalOcean {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigitalOcean")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl DigitalOcean {
    pub fn new(token: impl Into<String>) -> Result<Self, ProviderError> {
        Self::with_base_url(token, DEFAULT_API_URL)
    }

    /// Point the client at another API root (used by tests and proxies).
    pub fn with_base_url(
        token: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("dropdeploy/", env!("CARGO_PKG_VERSION")))
            .build()
            .context(ClientSnafu)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }

    fn droplet_url(&self, id: HostId) -> String {
        format!("{}/v2/droplets/{}", self.base_url, id)
    }
}

#[async_trait]
impl HostProvider for DigitalOcean {
    async fn get_host(&self, host_id: HostId) -> Result<Host, ProviderError> {
        tracing::debug!(%host_id, "fetching droplet");

        let response = self
            .http
            .get(self.droplet_url(host_id))
            .bearer_auth(&self.token)
            .send()
            .await
            .context(RequestSnafu { host_id })?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED => return UnauthorizedSnafu.fail(),
            StatusCode::NOT_FOUND => return NotFoundSnafu { host_id }.fail(),
            status => {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorBody>(&body)
                    .map(|e| e.message)
                    .unwrap_or(body);
                return ApiSnafu {
                    status: status.as_u16(),
                    message,
                }
                .fail();
            }
        }

        let envelope: DropletEnvelope = response.json().await.context(DecodeSnafu { host_id })?;
        Ok(envelope.droplet.into_host(host_id))
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DropletEnvelope {
    droplet: Droplet,
}

#[derive(Debug, Deserialize)]
struct Droplet {
    name: String,
    status: HostStatus,
    #[serde(default)]
    networks: Networks,
}

#[derive(Debug, Default, Deserialize)]
struct Networks {
    #[serde(default)]
    v4: Vec<NetworkV4>,
}

#[derive(Debug, Deserialize)]
struct NetworkV4 {
    ip_address: String,
    #[serde(rename = "type", default)]
    kind: String,
}

impl Droplet {
    fn into_host(self, id: HostId) -> Host {
        let address = primary_address(&self.networks.v4);
        Host {
            id,
            name: self.name,
            status: self.status,
            address,
        }
    }
}

/// First public IPv4 address, else the first IPv4 address of any type.
fn primary_address(v4: &[NetworkV4]) -> Option<String> {
    v4.iter()
        .find(|n| n.kind == "public")
        .or_else(|| v4.first())
        .map(|n| n.ip_address.clone())
}
