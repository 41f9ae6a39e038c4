// ABOUTME: Deploy command implementation.
// ABOUTME: Resolves credentials, wires the pipeline and reports the final result.

use dropdeploy::config::{Config, Credentials};
use dropdeploy::deploy::{Deployment, Outcome, Pipeline};
use dropdeploy::diagnostics::Diagnostics;
use dropdeploy::error::Result;
use dropdeploy::output::{Output, Reporter};
use dropdeploy::provider::DigitalOcean;
use dropdeploy::stack::{StackManager, SystemRunner};

/// Deploy the stack on the configured droplet.
pub async fn deploy(
    config: &Config,
    droplet: Option<u64>,
    token: Option<&str>,
    dry_run: bool,
    mut output: Output,
    diag: &mut Diagnostics,
) -> Result<()> {
    // Configuration errors abort before any external call.
    let credentials = Credentials::resolve(token, droplet, config.droplet)?;

    output.start_timer();
    output.progress(&format!(
        "Deploying to droplet {}{}",
        credentials.host_id,
        if dry_run { " (dry run)" } else { "" }
    ));

    let provider = DigitalOcean::with_base_url(credentials.token.expose(), &config.api_url)?;
    let stack = StackManager::new(SystemRunner, config.stack_settings());
    let pipeline = Pipeline::new(provider, stack);

    let report = match pipeline
        .run(Deployment::new(credentials, dry_run), &output, diag)
        .await
    {
        Ok(report) => report,
        Err(failure) => {
            output.json(&failure.run.steps());
            if failure.error.stack_modified() {
                output.warning("the stack was changed before the failure; run `dropdeploy status`");
            }
            return Err(failure.error.into());
        }
    };

    output.json(&report.run.steps());

    if let Some(summary) = diag.summary() {
        output.progress(&summary);
    }

    match report.outcome {
        Outcome::DryRun => output.result("Dry run finished"),
        Outcome::Deployed => output.result(&format!(
            "Deployed to droplet {} at {}",
            report.run.host_id(),
            report.finished_at.format("%H:%M:%S")
        )),
    }

    Ok(())
}
