// ABOUTME: Library root for dropdeploy - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod healthcheck;
pub mod output;
pub mod provider;
pub mod stack;
pub mod types;
