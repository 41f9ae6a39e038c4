// ABOUTME: Infrastructure provider access and host health probing.
// ABOUTME: Exports the HostProvider seam, the DigitalOcean client and error types.

mod digitalocean;
mod error;
mod host;
mod prober;

pub use digitalocean::{DEFAULT_API_URL, DigitalOcean};
pub use error::{HostHealthError, ProviderError, ProviderErrorKind};
pub use host::{Host, HostStatus};
pub use prober::{HostProvider, probe_host};
