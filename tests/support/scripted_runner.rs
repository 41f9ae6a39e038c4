// ABOUTME: CommandRunner that records invocations and replays scripted outputs.
// ABOUTME: Distinguishes list (`ps`), `pull` and `up` commands by their arguments.

use async_trait::async_trait;
use dropdeploy::stack::{CommandOutput, CommandRunner, CommandSpec};
use parking_lot::Mutex;
use std::collections::VecDeque;

/// Kind of stack command, derived from its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    List,
    Pull,
    Up,
    Other,
}

impl CommandKind {
    pub fn of(spec: &CommandSpec) -> Self {
        let has = |a: &str| spec.args.iter().any(|x| x == a);
        if has("ps") {
            CommandKind::List
        } else if has("pull") {
            CommandKind::Pull
        } else if has("up") {
            CommandKind::Up
        } else {
            CommandKind::Other
        }
    }

    pub fn is_mutating(&self) -> bool {
        matches!(self, CommandKind::Pull | CommandKind::Up)
    }
}

#[derive(Default)]
pub struct ScriptedRunner {
    calls: Mutex<Vec<CommandSpec>>,
    list: Mutex<VecDeque<CommandOutput>>,
    pull: Mutex<Option<CommandOutput>>,
    up: Mutex<Option<CommandOutput>>,
    spawn_fails: bool,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful list output. The last queued output repeats.
    pub fn list(self, stdout: &str) -> Self {
        self.list.lock().push_back(CommandOutput::ok(stdout));
        self
    }

    /// Queue a failing list command.
    pub fn list_fails(self, code: i32, stderr: &str) -> Self {
        self.list.lock().push_back(CommandOutput::failed(code, stderr));
        self
    }

    pub fn pull_fails(self, code: i32, stderr: &str) -> Self {
        *self.pull.lock() = Some(CommandOutput::failed(code, stderr));
        self
    }

    pub fn up_fails(self, code: i32, stderr: &str) -> Self {
        *self.up.lock() = Some(CommandOutput::failed(code, stderr));
        self
    }

    /// Every command fails to start.
    pub fn spawn_fails(mut self) -> Self {
        self.spawn_fails = true;
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().clone()
    }

    pub fn kinds(&self) -> Vec<CommandKind> {
        self.calls.lock().iter().map(CommandKind::of).collect()
    }

    pub fn mutating_calls(&self) -> usize {
        self.kinds().iter().filter(|k| k.is_mutating()).count()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &CommandSpec) -> std::io::Result<CommandOutput> {
        self.calls.lock().push(command.clone());

        if self.spawn_fails {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: not found", command.program),
            ));
        }

        let output = match CommandKind::of(command) {
            CommandKind::List => {
                let mut queue = self.list.lock();
                if queue.len() > 1 {
                    queue.pop_front()
                } else {
                    queue.front().cloned()
                }
                .unwrap_or_else(|| CommandOutput::ok(""))
            }
            CommandKind::Pull => self
                .pull
                .lock()
                .clone()
                .unwrap_or_else(|| CommandOutput::ok("Pulling web ... done\n")),
            CommandKind::Up => self
                .up
                .lock()
                .clone()
                .unwrap_or_else(|| CommandOutput::ok("Recreating web ... done\n")),
            CommandKind::Other => CommandOutput::ok(""),
        };

        Ok(output)
    }
}
