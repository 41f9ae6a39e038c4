// ABOUTME: Loads an optional `.env` file into the process environment.
// ABOUTME: A missing or unreadable file is a warning, never an error.

use std::path::Path;

use crate::diagnostics::Warning;

pub const ENV_FILENAME: &str = ".env";

/// Load `dir/.env`. Variables already set in the environment are kept.
///
/// Returns a warning when the file is absent or cannot be parsed.
pub fn load_env_file(dir: &Path) -> Option<Warning> {
    let path = dir.join(ENV_FILENAME);

    match dotenvy::from_path(&path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "loaded environment file");
            None
        }
        Err(e) if e.not_found() => Some(Warning::env_file(format!(
            "no {ENV_FILENAME} file found in {}, using system environment",
            dir.display()
        ))),
        Err(e) => Some(Warning::env_file(format!(
            "failed to load {}: {e}; using system environment",
            path.display()
        ))),
    }
}
