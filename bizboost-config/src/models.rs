use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    time::Duration,
};
use url::Url;
use uuid::Uuid;

use crate::env::EnvOverrides;
use crate::error::ConfigLoadError;
use crate::util::timeout_from_ms;

pub const DEFAULT_SESSION_KEY: &str = "companyData";
pub const DEFAULT_SESSION_FILE: &str = ".bizboost/session.json";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

/// Source that produced the engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ThemeEngineConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl std::fmt::Display for ThemeEngineConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("built-in defaults"),
            Self::EnvPath(path) => {
                write!(f, "BIZBOOST_CONFIG_PATH ({})", path.display())
            }
            Self::EnvInline => f.write_str("BIZBOOST_CONFIG_JSON"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Settings for a theme engine host.
///
/// Without `api_base_url` the host has no remote config store and keeps
/// records in memory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeEngineConfig {
    /// Session storage key of the company blob.
    pub session_key: String,
    /// Root of the website-config REST API, e.g. `https://api.example/v1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    /// Bearer token sent with every API request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Owner attached to saved configs that do not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    /// Upper bound for each remote call. `0` waits indefinitely.
    pub request_timeout_ms: u64,
    /// File standing in for browser session storage.
    pub session_file: PathBuf,
}

impl Default for ThemeEngineConfig {
    fn default() -> Self {
        Self {
            session_key: DEFAULT_SESSION_KEY.to_string(),
            api_base_url: None,
            api_token: None,
            user_id: None,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
        }
    }
}

impl ThemeEngineConfig {
    /// Resolve the full configuration: [`Self::load_from_env`], then
    /// [`EnvOverrides::gather`] on top, then [`Self::validate`].
    pub fn load() -> anyhow::Result<(Self, ThemeEngineConfigSource)> {
        let (mut config, source) = Self::load_from_env()?;
        let overrides = EnvOverrides::gather();
        if !overrides.is_empty() {
            tracing::debug!("applying BIZBOOST_* overrides");
        }
        overrides.apply(&mut config)?;
        config.validate()?;
        tracing::debug!(%source, "theme engine configuration loaded");
        Ok((config, source))
    }

    /// Load configuration using environment variables.
    /// Evaluation order:
    /// 1) `$BIZBOOST_CONFIG_PATH` (TOML or JSON file),
    /// 2) `$BIZBOOST_CONFIG_JSON` (inline JSON),
    /// 3) the first default file found in the working directory,
    /// 4) defaults.
    pub fn load_from_env() -> anyhow::Result<(Self, ThemeEngineConfigSource)> {
        if let Ok(path_str) = env::var("BIZBOOST_CONFIG_PATH")
            && !path_str.trim().is_empty()
        {
            let path = PathBuf::from(path_str);
            let config = Self::load_from_file(&path)?;
            return Ok((config, ThemeEngineConfigSource::EnvPath(path)));
        }

        if let Ok(raw) = env::var("BIZBOOST_CONFIG_JSON")
            && !raw.trim().is_empty()
        {
            let parsed = Self::parse_json(&raw)
                .context("failed to parse BIZBOOST_CONFIG_JSON")?;
            return Ok((parsed, ThemeEngineConfigSource::EnvInline));
        }

        if let Some(path) = Self::find_default_file(Path::new(".")) {
            let config = Self::load_from_file(&path)?;
            return Ok((config, ThemeEngineConfigSource::File(path)));
        }

        Ok((Self::default(), ThemeEngineConfigSource::Default))
    }

    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path).with_context(|| {
            format!(
                "failed to read theme engine config from {}",
                path.display()
            )
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::parse_json(&contents).with_context(|| {
                format!("invalid theme engine config {}", path.display())
            }),
            Some("toml") | Some("tml") => {
                toml::from_str(&contents).map_err(|err| {
                    anyhow!(
                        "invalid theme engine config {}: {}",
                        path.display(),
                        err
                    )
                })
            }
            _ => Self::parse_from_str(&contents, &path.display().to_string()),
        }
    }

    pub fn parse_from_str(
        contents: &str,
        origin: &str,
    ) -> anyhow::Result<Self> {
        // Try TOML first, then JSON.
        toml::from_str(contents).or_else(|toml_err| {
            serde_json::from_str(contents).map_err(|json_err| {
                anyhow!(
                    "failed to parse theme engine config {}: \
                     toml error: {}; json error: {}",
                    origin,
                    toml_err,
                    json_err
                )
            })
        })
    }

    pub fn parse_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw)
            .map_err(|err| anyhow!("invalid theme engine config json: {err}"))
    }

    /// First existing candidate under `root`.
    pub fn find_default_file(root: &Path) -> Option<PathBuf> {
        const CANDIDATES: &[&str] = &[
            "bizboost.toml",
            "bizboost.json",
            "config/bizboost.toml",
            "config/bizboost.json",
        ];

        CANDIDATES
            .iter()
            .map(|candidate| root.join(candidate))
            .find(|path| path.exists())
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        timeout_from_ms(self.request_timeout_ms)
    }

    /// Parsed API root, if one is configured.
    pub fn api_url(&self) -> Result<Option<Url>, ConfigLoadError> {
        let Some(raw) = self.api_base_url.as_deref() else {
            return Ok(None);
        };
        let url = Url::parse(raw).map_err(|source| {
            ConfigLoadError::InvalidApiUrl {
                url: raw.to_string(),
                source,
            }
        })?;
        if url.cannot_be_a_base() {
            return Err(ConfigLoadError::UnsupportedApiUrl {
                url: raw.to_string(),
            });
        }
        Ok(Some(url))
    }

    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.session_key.trim().is_empty() {
            return Err(ConfigLoadError::EmptySessionKey);
        }
        self.api_url()?;
        Ok(())
    }
}
