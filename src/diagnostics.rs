// ABOUTME: Non-fatal warnings gathered while a command runs.
// ABOUTME: Each warning is logged when recorded and summarized at the end of the command.

/// Warnings recorded during one command.
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn warn(&mut self, warning: Warning) {
        tracing::warn!(kind = ?warning.kind, "{}", warning.message);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// One closing line for the command output, or `None` without warnings.
    pub fn summary(&self) -> Option<String> {
        match self.warnings.len() {
            0 => None,
            1 => Some("Finished with 1 warning".to_string()),
            n => Some(format!("Finished with {n} warnings")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Warning {
    pub kind: WarningKind,
    pub message: String,
}

impl Warning {
    pub fn pre_deploy_health(message: impl Into<String>) -> Self {
        Self::new(WarningKind::PreDeployHealth, message)
    }

    pub fn env_file(message: impl Into<String>) -> Self {
        Self::new(WarningKind::EnvFile, message)
    }

    pub fn config_file(message: impl Into<String>) -> Self {
        Self::new(WarningKind::ConfigFile, message)
    }

    fn new(kind: WarningKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    /// Some container was down before anything was changed.
    PreDeployHealth,
    /// `.env` missing or malformed; the process environment is used as is.
    EnvFile,
    /// Config file unreadable; defaults used (healthcheck only).
    ConfigFile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_has_no_summary() {
        let diag = Diagnostics::default();
        assert!(!diag.has_warnings());
        assert_eq!(diag.summary(), None);
    }

    #[test]
    fn keeps_warnings_in_order() {
        let mut diag = Diagnostics::default();
        diag.warn(Warning::pre_deploy_health("worker is not running"));
        diag.warn(Warning::env_file(".env not found"));
        diag.warn(Warning::env_file("again"));

        let kinds: Vec<_> = diag.warnings().iter().map(|w| w.kind).collect();
        assert_eq!(
            kinds,
            vec![WarningKind::PreDeployHealth, WarningKind::EnvFile, WarningKind::EnvFile]
        );
        assert_eq!(diag.summary().as_deref(), Some("Finished with 3 warnings"));
    }

    #[test]
    fn single_warning_summary_is_singular() {
        let mut diag = Diagnostics::default();
        diag.warn(Warning::config_file("bad yaml"));
        assert_eq!(diag.warnings()[0].kind, WarningKind::ConfigFile);
        assert_eq!(diag.summary().as_deref(), Some("Finished with 1 warning"));
    }
}
