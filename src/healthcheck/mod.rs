// ABOUTME: Standalone, read-only health check for monitoring.
// ABOUTME: Probes the HTTP endpoint, the container stack and optionally the host.

mod endpoint;
mod report;

pub use endpoint::{EndpointError, probe_endpoint};
pub use report::{CheckStatus, HealthReport};

use crate::output::Reporter;
use crate::provider::{HostProvider, probe_host};
use crate::stack::{CommandRunner, StackManager};
use crate::types::HostId;

/// Host probe inputs; present only when a token and host id were supplied.
pub struct HostTarget<'a> {
    pub provider: &'a dyn HostProvider,
    pub host_id: HostId,
}

/// Run every probe and report each outcome. Never fails as a whole.
pub async fn run_health_checks<R: CommandRunner>(
    http: &reqwest::Client,
    endpoint: &str,
    stack: &StackManager<R>,
    host: Option<HostTarget<'_>>,
    reporter: &dyn Reporter,
) -> HealthReport {
    reporter.step(1, &format!("Checking application endpoint {endpoint}"));
    let endpoint = CheckStatus::from_result(probe_endpoint(http, endpoint).await);
    report(reporter, &endpoint, "Application endpoint healthy", "Application endpoint");

    reporter.step(2, "Checking containers");
    let containers = CheckStatus::from_result(stack.check_health(reporter).await);
    report(reporter, &containers, "All containers running", "Containers");

    let host = match host {
        Some(target) => {
            reporter.step(3, &format!("Checking host {}", target.host_id));
            let result = probe_host(target.provider, target.host_id, reporter)
                .await
                .map(|_| ());
            let status = CheckStatus::from_result(result);
            report(reporter, &status, "Host healthy", "Host");
            status
        }
        None => {
            tracing::debug!("no token or host id, skipping host probe");
            CheckStatus::Skipped
        }
    };

    let report = HealthReport {
        endpoint,
        containers,
        host,
    };
    tracing::info!(healthy = report.is_healthy(), "health check complete");
    report
}

fn report(reporter: &dyn Reporter, status: &CheckStatus, ok: &str, subject: &str) {
    match status {
        CheckStatus::Healthy => reporter.progress(&format!("  ✓ {ok}")),
        CheckStatus::Unhealthy(reason) => reporter.error(&format!("{subject}: {reason}")),
        CheckStatus::Skipped => {}
    }
}
