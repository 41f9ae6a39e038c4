// ABOUTME: Generic deployment struct parameterized by state marker, plus the run record.
// ABOUTME: DeploymentRun holds credentials, dry-run flag and the outcome of each step.

use serde::Serialize;
use std::fmt;
use std::marker::PhantomData;

use crate::config::Credentials;
use crate::provider::Host;
use crate::types::HostId;

use super::state::Initialized;

/// Pipeline steps in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    HostHealth,
    CurrentHealth,
    PullImages,
    RestartServices,
    Verify,
}

impl Step {
    pub fn number(&self) -> u8 {
        match self {
            Step::HostHealth => 1,
            Step::CurrentHealth => 2,
            Step::PullImages => 3,
            Step::RestartServices => 4,
            Step::Verify => 5,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Step::HostHealth => "Checking host health",
            Step::CurrentHealth => "Checking current containers",
            Step::PullImages => "Pulling new images",
            Step::RestartServices => "Restarting services",
            Step::Verify => "Verifying deployment",
        }
    }

    /// Whether the step changes the running stack.
    pub fn is_mutating(&self) -> bool {
        matches!(self, Step::PullImages | Step::RestartServices)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step {}: {}", self.number(), self.title())
    }
}

/// What happened in a step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "detail", rename_all = "lowercase")]
pub enum StepOutcome {
    Passed,
    /// Failed, but the pipeline carried on.
    Warned(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: Step,
    pub outcome: StepOutcome,
}

/// One execution of the pipeline. Lives for a single process invocation.
#[derive(Debug, Clone)]
pub struct DeploymentRun {
    pub credentials: Credentials,
    pub dry_run: bool,
    pub host: Option<Host>,
    steps: Vec<StepRecord>,
}

impl DeploymentRun {
    pub fn new(credentials: Credentials, dry_run: bool) -> Self {
        Self {
            credentials,
            dry_run,
            host: None,
            steps: Vec::new(),
        }
    }

    pub fn host_id(&self) -> HostId {
        self.credentials.host_id
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn outcome(&self, step: Step) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|r| r.step == step)
            .map(|r| &r.outcome)
    }

    pub(crate) fn record(&mut self, step: Step, outcome: StepOutcome) {
        self.steps.push(StepRecord { step, outcome });
    }
}

/// A deployment in progress, parameterized by its current state.
///
/// Each transition consumes the deployment and returns it in the next state,
/// so a mutating step cannot be reached without passing the gates before it.
#[derive(Debug)]
pub struct Deployment<S> {
    pub(crate) run: DeploymentRun,
    pub(crate) _state: PhantomData<S>,
}

impl Deployment<Initialized> {
    pub fn new(credentials: Credentials, dry_run: bool) -> Self {
        Deployment {
            run: DeploymentRun::new(credentials, dry_run),
            _state: PhantomData,
        }
    }
}

impl<S> Deployment<S> {
    pub fn run(&self) -> &DeploymentRun {
        &self.run
    }

    pub fn host_id(&self) -> HostId {
        self.run.host_id()
    }

    pub fn is_dry_run(&self) -> bool {
        self.run.dry_run
    }

    pub fn into_run(self) -> DeploymentRun {
        self.run
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_records_serialize_for_json_output() {
        let records = vec![
            StepRecord {
                step: Step::HostHealth,
                outcome: StepOutcome::Passed,
            },
            StepRecord {
                step: Step::CurrentHealth,
                outcome: StepOutcome::Warned("worker is down".to_string()),
            },
        ];
        let json = serde_json::to_value(&records).unwrap();

        assert_eq!(json[0]["step"], "host_health");
        assert_eq!(json[0]["outcome"]["result"], "passed");
        assert_eq!(json[1]["outcome"]["result"], "warned");
        assert_eq!(json[1]["outcome"]["detail"], "worker is down");
    }

    #[test]
    fn outcome_lookup_returns_first_record_for_step() {
        let credentials = Credentials {
            token: crate::config::ApiToken::new("t").unwrap(),
            host_id: HostId::new(3).unwrap(),
        };
        let mut run = DeploymentRun::new(credentials, false);
        run.record(Step::PullImages, StepOutcome::Failed("denied".to_string()));

        assert_eq!(
            run.outcome(Step::PullImages),
            Some(&StepOutcome::Failed("denied".to_string()))
        );
        assert_eq!(run.outcome(Step::Verify), None);
    }
}
