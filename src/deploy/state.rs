// ABOUTME: Deployment state marker types for the type state pattern.
// ABOUTME: Zero-sized types enforce the gate order of the pipeline at compile time.

/// Initial state: configuration resolved, nothing checked yet.
/// Available actions: `verify_host()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Initialized;

/// Host health gate passed.
/// Available actions: `inspect_stack()`
#[derive(Debug, Clone, Copy, Default)]
pub struct HostVerified;

/// Current container health recorded (pass or warning).
/// Available actions: `finish_dry_run()`, `pull_images()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Inspected;

/// New images pulled; running stack untouched.
/// Available actions: `restart_services()`
#[derive(Debug, Clone, Copy, Default)]
pub struct ImagesPulled;

/// Stack recreated.
/// Available actions: `verify()`, `rollback()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Restarted;

/// Post-deploy verification passed.
/// Available actions: `finish()`
#[derive(Debug, Clone, Copy, Default)]
pub struct Verified;
