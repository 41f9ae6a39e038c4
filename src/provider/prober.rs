// ABOUTME: Host health prober: fetch a host snapshot and classify it healthy or not.
// ABOUTME: Defines the HostProvider seam implemented by the API client and test fakes.

use async_trait::async_trait;

use super::error::{HostHealthError, ProviderError};
use super::host::Host;
use crate::output::Reporter;
use crate::types::HostId;

/// Source of host snapshots.
#[async_trait]
pub trait HostProvider: Send + Sync {
    /// Fetch the current record for `id`. Errors are returned unchanged, never retried.
    async fn get_host(&self, id: HostId) -> Result<Host, ProviderError>;
}

#[async_trait]
impl<P: HostProvider + ?Sized> HostProvider for &P {
    async fn get_host(&self, id: HostId) -> Result<Host, ProviderError> {
        (**self).get_host(id).await
    }
}

#[async_trait]
impl<P: HostProvider + ?Sized> HostProvider for Box<P> {
    async fn get_host(&self, id: HostId) -> Result<Host, ProviderError> {
        (**self).get_host(id).await
    }
}

/// Probe `id` and require it to be `active`.
///
/// On success the host's name and primary address are logged and the
/// snapshot is returned. Any other status is an `Inactive` error naming it.
pub async fn probe_host<P: HostProvider + ?Sized>(
    provider: &P,
    id: HostId,
    reporter: &dyn Reporter,
) -> Result<Host, HostHealthError> {
    reporter.progress(&format!("  → Fetching host {id}..."));

    let host = provider.get_host(id).await.inspect_err(|e| {
        tracing::error!(host_id = %id, error = %e, "host lookup failed");
    })?;

    if !host.status.is_active() {
        tracing::warn!(host_id = %id, status = %host.status, "host is not active");
        return Err(HostHealthError::Inactive {
            name: host.name,
            status: host.status,
        });
    }

    tracing::info!(
        host_id = %id,
        name = %host.name,
        address = host.address_or_unknown(),
        "host is active"
    );
    reporter.progress(&format!(
        "  ✓ Host {} ({}) is active",
        host.name,
        host.address_or_unknown()
    ));

    Ok(host)
}
