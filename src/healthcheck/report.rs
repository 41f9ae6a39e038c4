// ABOUTME: Outcome of the standalone health check, one entry per probe.
// ABOUTME: Probes are independent; a failing one never stops the others.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum CheckStatus {
    Healthy,
    Unhealthy(String),
    /// Not attempted (e.g. no credentials for the host probe).
    Skipped,
}

impl CheckStatus {
    pub fn from_result<E: fmt::Display>(result: Result<(), E>) -> Self {
        match result {
            Ok(()) => CheckStatus::Healthy,
            Err(e) => CheckStatus::Unhealthy(e.to_string()),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, CheckStatus::Unhealthy(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub endpoint: CheckStatus,
    pub containers: CheckStatus,
    pub host: CheckStatus,
}

impl HealthReport {
    /// True when no probe failed. Skipped probes do not count as failures.
    pub fn is_healthy(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Names of the failed probes.
    pub fn failures(&self) -> impl Iterator<Item = &'static str> + '_ {
        [
            ("endpoint", &self.endpoint),
            ("containers", &self.containers),
            ("host", &self.host),
        ]
        .into_iter()
        .filter(|(_, status)| status.is_failure())
        .map(|(name, _)| name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skipped_is_not_a_failure() {
        let report = HealthReport {
            endpoint: CheckStatus::Healthy,
            containers: CheckStatus::Healthy,
            host: CheckStatus::Skipped,
        };
        assert!(report.is_healthy());
    }

    #[test]
    fn failures_are_listed_by_name() {
        let report = HealthReport {
            endpoint: CheckStatus::Unhealthy("status 503".to_string()),
            containers: CheckStatus::Healthy,
            host: CheckStatus::Unhealthy("off".to_string()),
        };
        assert!(!report.is_healthy());
        assert_eq!(report.failures().collect::<Vec<_>>(), vec!["endpoint", "host"]);
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_value(CheckStatus::Unhealthy("down".to_string())).unwrap();
        assert_eq!(json["status"], "unhealthy");
        assert_eq!(json["detail"], "down");
    }
}
