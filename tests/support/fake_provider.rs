// ABOUTME: HostProvider fake returning a fixed host or a fixed error.
// ABOUTME: Counts lookups so tests can assert the provider was (not) called.

use async_trait::async_trait;
use dropdeploy::provider::{Host, HostProvider, HostStatus, ProviderError};
use dropdeploy::types::HostId;
use std::sync::atomic::{AtomicUsize, Ordering};

enum Script {
    Status(&'static str),
    Unauthorized,
    NotFound,
}

pub struct FakeProvider {
    script: Script,
    lookups: AtomicUsize,
}

impl FakeProvider {
    pub fn with_status(status: &'static str) -> Self {
        Self {
            script: Script::Status(status),
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn active() -> Self {
        Self::with_status("active")
    }

    pub fn unauthorized() -> Self {
        Self {
            script: Script::Unauthorized,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn not_found() -> Self {
        Self {
            script: Script::NotFound,
            lookups: AtomicUsize::new(0),
        }
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostProvider for FakeProvider {
    async fn get_host(&self, id: HostId) -> Result<Host, ProviderError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        match self.script {
            Script::Status(status) => Ok(Host {
                id,
                name: "web-1".to_string(),
                status: HostStatus::from(status),
                address: Some("203.0.113.7".to_string()),
            }),
            Script::Unauthorized => Err(ProviderError::Unauthorized),
            Script::NotFound => Err(ProviderError::NotFound { host_id: id }),
        }
    }
}
