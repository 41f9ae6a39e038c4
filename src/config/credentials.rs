// ABOUTME: Resolution of the API token and target host id.
// ABOUTME: Priority is explicit flag, then environment, then (host id only) config file.

use std::fmt;

use crate::error::{Error, Result};
use crate::types::{HostId, HostIdError};

pub const TOKEN_ENV: &str = "DO_API_TOKEN";
pub const HOST_ID_ENV: &str = "DO_DROPLET_ID";

/// Bearer token for the provider API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

/// Everything a deployment needs to address its target.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub token: ApiToken,
    pub host_id: HostId,
}

impl Credentials {
    /// Resolve both values; the token is checked first.
    pub fn resolve(
        token_flag: Option<&str>,
        host_flag: Option<u64>,
        host_from_config: Option<HostId>,
    ) -> Result<Self> {
        let token = resolve_token(token_flag).ok_or(Error::MissingToken)?;
        let host_id =
            resolve_host_id(host_flag, host_from_config)?.ok_or(Error::MissingHostId)?;
        Ok(Self { token, host_id })
    }
}

/// `--token`, else `DO_API_TOKEN`. Blank values count as absent.
pub fn resolve_token(flag: Option<&str>) -> Option<ApiToken> {
    flag.and_then(ApiToken::new)
        .or_else(|| std::env::var(TOKEN_ENV).ok().and_then(ApiToken::new))
}

/// `--droplet`, else `DO_DROPLET_ID`, else the config file. Zero counts as absent.
pub fn resolve_host_id(flag: Option<u64>, from_config: Option<HostId>) -> Result<Option<HostId>> {
    if let Some(id) = flag.and_then(|v| HostId::new(v).ok()) {
        return Ok(Some(id));
    }

    if let Ok(raw) = std::env::var(HOST_ID_ENV) {
        match raw.parse::<HostId>() {
            Ok(id) => return Ok(Some(id)),
            Err(HostIdError::Zero) => {}
            Err(HostIdError::NotANumber(s)) if s.is_empty() => {}
            Err(e) => return Err(Error::InvalidConfig(format!("{HOST_ID_ENV}: {e}"))),
        }
    }

    Ok(from_config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(v: u64) -> HostId {
        HostId::new(v).unwrap()
    }

    #[test]
    fn flag_token_wins_over_env() {
        temp_env::with_var(TOKEN_ENV, Some("from-env"), || {
            let token = resolve_token(Some("from-flag")).unwrap();
            assert_eq!(token.expose(), "from-flag");
        });
    }

    #[test]
    fn env_token_used_when_flag_missing_or_blank() {
        temp_env::with_var(TOKEN_ENV, Some("from-env"), || {
            assert_eq!(resolve_token(None).unwrap().expose(), "from-env");
            assert_eq!(resolve_token(Some("  ")).unwrap().expose(), "from-env");
        });
    }

    #[test]
    fn no_token_anywhere() {
        temp_env::with_var_unset(TOKEN_ENV, || {
            assert!(resolve_token(None).is_none());
        });
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = ApiToken::new("dop_v1_secret").unwrap();
        assert!(!format!("{token:?}").contains("secret"));
    }

    #[test]
    fn host_id_priority() {
        temp_env::with_var(HOST_ID_ENV, Some("222"), || {
            assert_eq!(resolve_host_id(Some(111), Some(id(333))).unwrap(), Some(id(111)));
            assert_eq!(resolve_host_id(None, Some(id(333))).unwrap(), Some(id(222)));
            assert_eq!(resolve_host_id(Some(0), None).unwrap(), Some(id(222)));
        });
        temp_env::with_var_unset(HOST_ID_ENV, || {
            assert_eq!(resolve_host_id(None, Some(id(333))).unwrap(), Some(id(333)));
            assert_eq!(resolve_host_id(None, None).unwrap(), None);
        });
    }

    #[test]
    fn zero_or_empty_env_host_id_is_absent() {
        temp_env::with_var(HOST_ID_ENV, Some("0"), || {
            assert_eq!(resolve_host_id(None, None).unwrap(), None);
        });
        temp_env::with_var(HOST_ID_ENV, Some(""), || {
            assert_eq!(resolve_host_id(None, None).unwrap(), None);
        });
    }

    #[test]
    fn garbage_env_host_id_is_config_error() {
        temp_env::with_var(HOST_ID_ENV, Some("web-1"), || {
            let err = resolve_host_id(None, None).unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)));
            assert!(err.to_string().contains(HOST_ID_ENV));
        });
    }

    #[test]
    fn resolve_reports_missing_token_before_host() {
        temp_env::with_vars_unset([TOKEN_ENV, HOST_ID_ENV], || {
            let err = Credentials::resolve(None, None, None).unwrap_err();
            assert!(matches!(err, Error::MissingToken));

            let err = Credentials::resolve(Some("t"), None, None).unwrap_err();
            assert!(matches!(err, Error::MissingHostId));

            let creds = Credentials::resolve(Some("t"), Some(9), None).unwrap();
            assert_eq!(creds.host_id, id(9));
        });
    }
}
