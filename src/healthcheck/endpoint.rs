// ABOUTME: Probe of the application's public HTTP health endpoint.
// ABOUTME: A single unauthenticated GET; only status 200 counts as healthy.

use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum EndpointError {
    #[error("endpoint not responding: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned status {0}")]
    UnexpectedStatus(u16),
}

/// GET `url` and require exactly `200 OK`.
pub async fn probe_endpoint(client: &reqwest::Client, url: &str) -> Result<(), EndpointError> {
    tracing::debug!(url, "probing endpoint");

    let response = client.get(url).send().await?;
    let status = response.status();

    if status != StatusCode::OK {
        return Err(EndpointError::UnexpectedStatus(status.as_u16()));
    }
    Ok(())
}
