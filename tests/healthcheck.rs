// ABOUTME: Integration tests for the standalone health check.
// ABOUTME: Endpoint probes run against a local HTTP stub; containers and host use fakes.

mod support;

use dropdeploy::healthcheck::{
    CheckStatus, EndpointError, HostTarget, probe_endpoint, run_health_checks,
};
use dropdeploy::output::{EventKind, Recorder};
use dropdeploy::stack::{StackManager, StackSettings};
use dropdeploy::types::HostId;
use support::fake_provider::FakeProvider;
use support::http_stub::{HttpStub, closed_port_url};
use support::scripted_runner::ScriptedRunner;

fn stack(listing: &str) -> StackManager<ScriptedRunner> {
    StackManager::new(ScriptedRunner::new().list(listing), StackSettings::default())
}

mod endpoint {
    use super::*;

    #[tokio::test]
    async fn ok_is_healthy() {
        let stub = HttpStub::serve_once("200 OK", r#"{"status":"ok"}"#).await;
        let url = format!("{}/health", stub.base_url);

        probe_endpoint(&reqwest::Client::new(), &url).await.unwrap();

        assert!(stub.request().await.starts_with("GET /health "));
    }

    #[tokio::test]
    async fn any_other_status_is_unhealthy() {
        for status in ["204 No Content", "404 Not Found", "503 Service Unavailable"] {
            let stub = HttpStub::serve_once(status, "").await;

            let err = probe_endpoint(&reqwest::Client::new(), &stub.base_url)
                .await
                .unwrap_err();

            let code: u16 = status[..3].parse().unwrap();
            assert!(
                matches!(err, EndpointError::UnexpectedStatus(c) if c == code),
                "{status}: {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        let err = probe_endpoint(&reqwest::Client::new(), &closed_port_url().await)
            .await
            .unwrap_err();

        assert!(matches!(err, EndpointError::Transport(_)));
        assert!(err.to_string().contains("not responding"));
    }
}

mod full_check {
    use super::*;

    #[tokio::test]
    async fn host_probe_skipped_without_credentials() {
        let stub = HttpStub::serve_once("200 OK", "{}").await;
        let stack = stack("web:Up 3 hours\n");
        let recorder = Recorder::new();

        let report = run_health_checks(
            &reqwest::Client::new(),
            &stub.base_url,
            &stack,
            None,
            &recorder,
        )
        .await;

        assert_eq!(report.endpoint, CheckStatus::Healthy);
        assert_eq!(report.containers, CheckStatus::Healthy);
        assert_eq!(report.host, CheckStatus::Skipped);
        assert!(report.is_healthy());
        assert_eq!(recorder.messages(EventKind::Step).len(), 2);
    }

    #[tokio::test]
    async fn failing_probes_do_not_stop_the_others() {
        let provider = FakeProvider::with_status("off");
        let stack = stack("web:Up 3 hours\nworker:Exited (137) 1 minute ago\n");
        let recorder = Recorder::new();

        let report = run_health_checks(
            &reqwest::Client::new(),
            &closed_port_url().await,
            &stack,
            Some(HostTarget {
                provider: &provider,
                host_id: HostId::new(42).unwrap(),
            }),
            &recorder,
        )
        .await;

        assert!(report.endpoint.is_failure());
        assert!(matches!(&report.containers, CheckStatus::Unhealthy(r) if r.contains("worker")));
        assert!(matches!(&report.host, CheckStatus::Unhealthy(r) if r.contains("off")));
        assert_eq!(
            report.failures().collect::<Vec<_>>(),
            vec!["endpoint", "containers", "host"]
        );
        assert_eq!(provider.lookups(), 1);
        assert_eq!(recorder.messages(EventKind::Error).len(), 3);
    }

    #[tokio::test]
    async fn healthy_host_is_reported() {
        let stub = HttpStub::serve_once("200 OK", "{}").await;
        let provider = FakeProvider::active();
        let stack = stack("");
        let recorder = Recorder::new();

        let report = run_health_checks(
            &reqwest::Client::new(),
            &stub.base_url,
            &stack,
            Some(HostTarget {
                provider: &provider,
                host_id: HostId::new(42).unwrap(),
            }),
            &recorder,
        )
        .await;

        assert_eq!(report.host, CheckStatus::Healthy);
        assert!(report.is_healthy());
        assert!(recorder.contains(EventKind::Progress, "Host healthy"));
    }
}
