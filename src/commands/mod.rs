// ABOUTME: Command module aggregator for the dropdeploy CLI.
// ABOUTME: Re-exports deploy, healthcheck, and status command handlers.

mod deploy;
mod healthcheck;
mod status;

pub use deploy::deploy;
pub use healthcheck::healthcheck;
pub use status::status;
