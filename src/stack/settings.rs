// ABOUTME: Settings that decide which commands the stack manager runs.
// ABOUTME: Includes RuntimeType (docker or podman) and the compose command line.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// The container runtime whose CLI lists containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeType {
    #[default]
    Docker,
    Podman,
}

impl RuntimeType {
    pub fn binary(&self) -> &'static str {
        match self {
            RuntimeType::Docker => "docker",
            RuntimeType::Podman => "podman",
        }
    }
}

impl std::fmt::Display for RuntimeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.binary())
    }
}

/// How to reach the compose stack on this host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSettings {
    /// Compose program followed by any fixed leading arguments,
    /// e.g. `["docker-compose"]` or `["docker", "compose"]`.
    pub compose_command: Vec<String>,
    /// Passed as `-f <file>` when set.
    pub compose_file: Option<PathBuf>,
    /// Working directory for every command.
    pub project_dir: Option<PathBuf>,
    pub runtime: RuntimeType,
    /// List stopped containers too (`ps --all`).
    pub include_stopped: bool,
}

impl Default for StackSettings {
    fn default() -> Self {
        Self {
            compose_command: default_compose_command(),
            compose_file: None,
            project_dir: None,
            runtime: RuntimeType::default(),
            include_stopped: false,
        }
    }
}

pub fn default_compose_command() -> Vec<String> {
    vec!["docker-compose".to_string()]
}
