use std::path::PathBuf;

use uuid::Uuid;

use crate::error::ConfigLoadError;
use crate::models::ThemeEngineConfig;
use crate::util::{non_empty_var, parse_timeout_ms};

/// Individual `BIZBOOST_*` variables applied after the config source.
///
/// Values are kept raw until [`EnvOverrides::apply`] so a malformed variable
/// is reported with its contents.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvOverrides {
    pub api_url: Option<String>,
    pub api_token: Option<String>,
    pub user_id: Option<String>,
    pub session_file: Option<PathBuf>,
    pub request_timeout: Option<String>,
}

impl EnvOverrides {
    pub fn gather() -> Self {
        Self {
            api_url: non_empty_var("BIZBOOST_API_URL"),
            api_token: non_empty_var("BIZBOOST_API_TOKEN"),
            user_id: non_empty_var("BIZBOOST_USER_ID"),
            session_file: non_empty_var("BIZBOOST_SESSION_FILE")
                .map(PathBuf::from),
            request_timeout: non_empty_var("BIZBOOST_REQUEST_TIMEOUT_MS"),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply(
        self,
        config: &mut ThemeEngineConfig,
    ) -> Result<(), ConfigLoadError> {
        if let Some(url) = self.api_url {
            config.api_base_url = Some(url);
        }
        if let Some(token) = self.api_token {
            config.api_token = Some(token);
        }
        if let Some(raw) = self.user_id {
            let id = Uuid::parse_str(&raw).map_err(|source| {
                ConfigLoadError::InvalidUserId { value: raw, source }
            })?;
            config.user_id = Some(id);
        }
        if let Some(path) = self.session_file {
            config.session_file = path;
        }
        if let Some(raw) = self.request_timeout {
            config.request_timeout_ms = parse_timeout_ms(&raw)
                .ok_or(ConfigLoadError::InvalidTimeout { value: raw })?;
        }
        Ok(())
    }
}
