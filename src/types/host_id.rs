// ABOUTME: Validated identifier for the target host (a DigitalOcean droplet id).
// ABOUTME: Zero is treated as "not provided", matching the CLI default.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::num::NonZeroU64;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostIdError {
    #[error("host id cannot be zero")]
    Zero,

    #[error("host id must be a positive integer, got '{0}'")]
    NotANumber(String),
}

/// Identifier of the host being deployed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HostId(NonZeroU64);

impl HostId {
    pub fn new(value: u64) -> Result<Self, HostIdError> {
        NonZeroU64::new(value).map(Self).ok_or(HostIdError::Zero)
    }

    pub fn get(&self) -> u64 {
        self.0.get()
    }
}

impl FromStr for HostId {
    type Err = HostIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let value = trimmed
            .parse::<u64>()
            .map_err(|_| HostIdError::NotANumber(trimmed.to_string()))?;
        Self::new(value)
    }
}

impl fmt::Display for HostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for HostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u64::deserialize(deserializer)?;
        Self::new(value).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positive_integer() {
        let id: HostId = "123456".parse().unwrap();
        assert_eq!(id.get(), 123456);
        assert_eq!(id.to_string(), "123456");
    }

    #[test]
    fn zero_is_rejected() {
        assert_eq!(HostId::new(0), Err(HostIdError::Zero));
        assert_eq!("0".parse::<HostId>(), Err(HostIdError::Zero));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            "web-1".parse::<HostId>(),
            Err(HostIdError::NotANumber("web-1".to_string()))
        );
    }
}
