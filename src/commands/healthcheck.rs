// ABOUTME: Healthcheck command implementation.
// ABOUTME: Runs the independent probes and decides the exit status.

use dropdeploy::config::{Config, resolve_host_id, resolve_token};
use dropdeploy::diagnostics::Diagnostics;
use dropdeploy::error::Result;
use dropdeploy::healthcheck::{CheckStatus, HostTarget, run_health_checks};
use dropdeploy::output::{Output, Reporter};
use dropdeploy::provider::DigitalOcean;
use dropdeploy::stack::{StackManager, SystemRunner};

/// Run every probe and report each outcome.
///
/// Returns the process exit code: 0 unless `strict` is set and a probe failed.
/// A host id that does not parse fails the host check only.
pub async fn healthcheck(
    config: &Config,
    droplet: Option<u64>,
    token: Option<&str>,
    endpoint: Option<&str>,
    strict: bool,
    mut output: Output,
    diag: &Diagnostics,
) -> Result<i32> {
    output.start_timer();

    let endpoint = endpoint.unwrap_or(&config.endpoint);
    let token = resolve_token(token);
    let (host_id, host_error) = match resolve_host_id(droplet, config.droplet) {
        Ok(host_id) => (host_id, None),
        Err(e) => (None, Some(e.to_string())),
    };

    let provider = match (token, host_id) {
        (Some(token), Some(host_id)) => Some((
            DigitalOcean::with_base_url(token.expose(), &config.api_url)?,
            host_id,
        )),
        _ => None,
    };
    let target = provider.as_ref().map(|(provider, host_id)| HostTarget {
        provider,
        host_id: *host_id,
    });

    let http = reqwest::Client::new();
    let stack = StackManager::new(SystemRunner, config.stack_settings());

    let mut report = run_health_checks(&http, endpoint, &stack, target, &output).await;
    if let Some(reason) = host_error {
        output.error(&format!("Host: {reason}"));
        report.host = CheckStatus::Unhealthy(reason);
    }
    output.json(&report);

    let finished = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    if report.is_healthy() {
        output.success(&format!("Health check completed at {finished}: all probes passed"));
    } else {
        let failed: Vec<_> = report.failures().collect();
        output.warning(&format!(
            "Health check completed at {finished}: failed probes: {}",
            failed.join(", ")
        ));
    }

    if let Some(summary) = diag.summary() {
        output.progress(&summary);
    }

    Ok(if strict && !report.is_healthy() { 1 } else { 0 })
}
