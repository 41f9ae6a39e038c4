// ABOUTME: Host snapshot as returned by the infrastructure provider.
// ABOUTME: HostStatus classifies the provider's status string.

use crate::types::HostId;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Lifecycle status reported for a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostStatus {
    New,
    Active,
    Off,
    Archive,
    Other(String),
}

impl HostStatus {
    pub fn as_str(&self) -> &str {
        match self {
            HostStatus::New => "new",
            HostStatus::Active => "active",
            HostStatus::Off => "off",
            HostStatus::Archive => "archive",
            HostStatus::Other(s) => s,
        }
    }

    /// Only an exact `active` counts as healthy.
    pub fn is_active(&self) -> bool {
        matches!(self, HostStatus::Active)
    }
}

impl From<&str> for HostStatus {
    fn from(s: &str) -> Self {
        match s {
            "new" => HostStatus::New,
            "active" => HostStatus::Active,
            "off" => HostStatus::Off,
            "archive" => HostStatus::Archive,
            other => HostStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl<'de> Deserialize<'de> for HostStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(HostStatus::from(s.as_str()))
    }
}

/// Point-in-time view of a host. Not cached between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub id: HostId,
    pub name: String,
    pub status: HostStatus,
    /// Primary IPv4 address, if the host has one.
    pub address: Option<String>,
}

impl Host {
    pub fn address_or_unknown(&self) -> &str {
        self.address.as_deref().unwrap_or("unknown")
    }
}
