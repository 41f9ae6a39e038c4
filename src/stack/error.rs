// ABOUTME: Error types for container stack operations.
// ABOUTME: Covers spawn failures, non-zero exits with captured output, and unhealthy containers.

use crate::types::ContainerName;

/// Errors from the container stack manager.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    /// The command could not be started at all.
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The command ran and exited non-zero.
    #[error("`{command}` exited with {}:\n{output}", exit_label(.code))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        output: String,
    },

    /// A container in the snapshot is not running.
    #[error("container {name} is not running: {status}")]
    NotRunning { name: ContainerName, status: String },
}

fn exit_label(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "a signal".to_string(),
    }
}

impl StackError {
    /// Name of the offending container for health failures.
    pub fn container(&self) -> Option<&ContainerName> {
        match self {
            StackError::NotRunning { name, .. } => Some(name),
            _ => None,
        }
    }
}
