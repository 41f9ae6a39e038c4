// ABOUTME: Container status snapshot and state classification.
// ABOUTME: Parses `name:status` lines from the runtime's list command.

use crate::types::ContainerName;
use std::fmt;

/// Format string handed to `<runtime> ps --format`.
pub const STATUS_FORMAT: &str = "{{.Names}}:{{.Status}}";

/// State of a container derived from its status text.
///
/// The runtime only hands back free text such as `Up 3 minutes` or
/// `Exited (1) 2 hours ago`. Classification keeps the compatibility rule
/// that a container is running iff the text contains `Up` (case-sensitive);
/// the other variants only refine non-running entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerState {
    Running,
    Exited(Option<i32>),
    Restarting,
    Unknown,
}

impl ContainerState {
    pub fn from_status(status: &str) -> Self {
        if status.contains("Up") {
            return ContainerState::Running;
        }

        let trimmed = status.trim_start();
        if let Some(rest) = trimmed.strip_prefix("Exited") {
            return ContainerState::Exited(parse_exit_code(rest));
        }
        if trimmed.starts_with("Restarting") {
            return ContainerState::Restarting;
        }

        ContainerState::Unknown
    }

    pub fn is_running(&self) -> bool {
        matches!(self, ContainerState::Running)
    }
}

/// Extract `n` from ` (n) 2 hours ago`.
fn parse_exit_code(rest: &str) -> Option<i32> {
    let rest = rest.trim_start().strip_prefix('(')?;
    let end = rest.find(')')?;
    rest[..end].trim().parse().ok()
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerState::Running => write!(f, "running"),
            ContainerState::Exited(Some(code)) => write!(f, "exited ({code})"),
            ContainerState::Exited(None) => write!(f, "exited"),
            ContainerState::Restarting => write!(f, "restarting"),
            ContainerState::Unknown => write!(f, "unknown"),
        }
    }
}

/// One entry of a snapshot: a container and its raw status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerStatus {
    pub name: ContainerName,
    pub status: String,
}

impl ContainerStatus {
    pub fn state(&self) -> ContainerState {
        ContainerState::from_status(&self.status)
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }
}

/// Container name → status text, in the order the runtime listed them.
///
/// Names are unique; a repeated name replaces the earlier status in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerStatusSnapshot {
    entries: Vec<ContainerStatus>,
}

impl ContainerStatusSnapshot {
    /// Parse the output of the list command.
    ///
    /// A line is recorded only if it holds exactly one `:`. Blank lines and
    /// lines with zero or several colons are dropped without error.
    pub fn parse(output: &str) -> Self {
        let mut snapshot = Self::default();

        for line in output.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let mut parts = line.split(':');
            let (Some(name), Some(status), None) = (parts.next(), parts.next(), parts.next())
            else {
                tracing::debug!(line, "skipping malformed status line");
                continue;
            };

            snapshot.insert(ContainerName::new(name), status.to_string());
        }

        snapshot
    }

    pub fn insert(&mut self, name: ContainerName, status: String) {
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(existing) => existing.status = status,
            None => self.entries.push(ContainerStatus { name, status }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.status.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContainerStatus> {
        self.entries.iter()
    }

    /// First entry that is not running, in listing order.
    pub fn first_not_running(&self) -> Option<&ContainerStatus> {
        self.entries.iter().find(|e| !e.is_running())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ContainerStatusSnapshot {
    type Item = &'a ContainerStatus;
    type IntoIter = std::slice::Iter<'a, ContainerStatus>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
