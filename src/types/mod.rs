// ABOUTME: Validated domain types shared across modules.
// ABOUTME: Host identifiers and container names.

mod container_name;
mod host_id;

pub use container_name::ContainerName;
pub use host_id::{HostId, HostIdError};
