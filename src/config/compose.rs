// ABOUTME: Compose stack section of the config file.
// ABOUTME: Converts into StackSettings for the stack manager.

use serde::Deserialize;
use std::path::PathBuf;

use super::deserialize::deserialize_command;
use crate::stack::{RuntimeType, StackSettings, default_compose_command};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComposeConfig {
    #[serde(
        default = "default_compose_command",
        deserialize_with = "deserialize_command"
    )]
    pub command: Vec<String>,

    #[serde(default)]
    pub file: Option<PathBuf>,

    #[serde(default)]
    pub project_dir: Option<PathBuf>,

    #[serde(default)]
    pub include_stopped: bool,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            command: default_compose_command(),
            file: None,
            project_dir: None,
            include_stopped: false,
        }
    }
}

impl ComposeConfig {
    pub fn stack_settings(&self, runtime: RuntimeType) -> StackSettings {
        StackSettings {
            compose_command: self.command.clone(),
            compose_file: self.file.clone(),
            project_dir: self.project_dir.clone(),
            runtime,
            include_stopped: self.include_stopped,
        }
    }
}
