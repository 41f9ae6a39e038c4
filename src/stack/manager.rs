// ABOUTME: Container stack manager: pull, force-recreate, list and health-check the stack.
// ABOUTME: Shells out to the compose and runtime CLIs through a CommandRunner.

use super::command::{CommandOutput, CommandRunner, CommandSpec};
use super::error::StackError;
use super::settings::StackSettings;
use super::status::{ContainerStatusSnapshot, STATUS_FORMAT};
use crate::output::Reporter;

/// Issues stack-wide operations against the local container runtime.
///
/// Every operation is all-or-nothing from the caller's point of view: a
/// non-zero exit is an error carrying the command's combined output.
pub struct StackManager<R> {
    runner: R,
    settings: StackSettings,
}

impl<R: CommandRunner> StackManager<R> {
    pub fn new(runner: R, settings: StackSettings) -> Self {
        Self { runner, settings }
    }

    pub fn settings(&self) -> &StackSettings {
        &self.settings
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Pull newer images for every service in the stack.
    pub async fn pull_images(&self, reporter: &dyn Reporter) -> Result<(), StackError> {
        reporter.progress("  → Pulling images...");
        self.run_checked(self.compose(["pull"])).await?;
        reporter.progress("  ✓ Images pulled");
        Ok(())
    }

    /// Recreate every service container, healthy or not.
    pub async fn restart_services(&self, reporter: &dyn Reporter) -> Result<(), StackError> {
        reporter.progress("  → Recreating services...");
        self.run_checked(self.compose(["up", "-d", "--force-recreate"]))
            .await?;
        reporter.progress("  ✓ Services recreated");
        Ok(())
    }

    /// Snapshot of container name → status text.
    pub async fn list_status(&self) -> Result<ContainerStatusSnapshot, StackError> {
        let mut spec = CommandSpec::new(self.settings.runtime.binary())
            .current_dir(self.settings.project_dir.clone())
            .arg("ps");
        if self.settings.include_stopped {
            spec = spec.arg("--all");
        }
        let spec = spec.args(["--format", STATUS_FORMAT]);

        let output = self.run_checked(spec).await?;
        let snapshot = ContainerStatusSnapshot::parse(&output.stdout);
        tracing::debug!(containers = snapshot.len(), "container status listed");
        Ok(snapshot)
    }

    /// Fail on the first container that is not running.
    ///
    /// Entries are checked in listing order and evaluation stops at the first
    /// failure. An empty snapshot passes.
    pub async fn check_health(&self, reporter: &dyn Reporter) -> Result<(), StackError> {
        let snapshot = self.list_status().await?;

        if let Some(entry) = snapshot.first_not_running() {
            return Err(StackError::NotRunning {
                name: entry.name.clone(),
                status: entry.status.clone(),
            });
        }

        for entry in &snapshot {
            reporter.progress(&format!("  ✓ {}: {}", entry.name, entry.status));
        }

        tracing::info!(containers = snapshot.len(), "all containers running");
        Ok(())
    }

    fn compose<const N: usize>(&self, verb: [&str; N]) -> CommandSpec {
        let (program, leading) = match self.settings.compose_command.split_first() {
            Some((program, leading)) => (program.as_str(), leading),
            None => ("docker-compose", &[][..]),
        };

        let mut spec = CommandSpec::new(program)
            .current_dir(self.settings.project_dir.clone())
            .args(leading.iter().cloned());
        if let Some(ref file) = self.settings.compose_file {
            spec = spec.arg("-f").arg(file.display().to_string());
        }
        spec.args(verb)
    }

    async fn run_checked(&self, spec: CommandSpec) -> Result<CommandOutput, StackError> {
        let output = self
            .runner
            .run(&spec)
            .await
            .map_err(|source| StackError::Spawn {
                command: spec.to_string(),
                source,
            })?;

        if !output.success {
            tracing::error!(command = %spec, code = ?output.code, "command failed");
            return Err(StackError::CommandFailed {
                command: spec.to_string(),
                code: output.code,
                output: output.combined(),
            });
        }

        Ok(output)
    }
}
