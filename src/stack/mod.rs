// ABOUTME: Container stack management via the compose and runtime CLIs.
// ABOUTME: Exports the manager, command runner seam, status snapshot and settings.

mod command;
mod error;
mod manager;
mod settings;
mod status;

pub use command::{CommandOutput, CommandRunner, CommandSpec, SystemRunner};
pub use error::StackError;
pub use manager::StackManager;
pub use settings::{RuntimeType, StackSettings, default_compose_command};
pub use status::{ContainerState, ContainerStatus, ContainerStatusSnapshot, STATUS_FORMAT};
