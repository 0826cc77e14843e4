//! HTTP adapter for the website config API.
//!
//! Records live at `{base}/websites/configs/{template}/`; saves are posted
//! to the collection with the owning user attached.

use std::time::Duration;

use anyhow::anyhow;
use async_trait::async_trait;
use bizboost_contracts::remote::RemoteConfigStore;
use bizboost_model::{PersistedConfig, TemplateId};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::error::{Result, ThemeError};

#[derive(Clone)]
pub struct RestConfigStore {
    client: Client,
    base_url: Url,
    token: Option<String>,
    user_id: Option<Uuid>,
}

impl std::fmt::Debug for RestConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestConfigStore")
            .field("base_url", &self.base_url.as_str())
            .field("has_token", &self.token.is_some())
            .field("user_id", &self.user_id)
            .finish()
    }
}

#[derive(Serialize)]
struct SaveConfigRequest<'a> {
    #[serde(flatten)]
    config: &'a PersistedConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<Uuid>,
}

impl RestConfigStore {
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            ThemeError::InvalidEndpoint(format!("{base_url}: {err}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ThemeError::InvalidEndpoint(base_url.to_string()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| ThemeError::Remote(err.into()))?;

        tracing::info!(base_url = %base_url, "creating website config client");

        Ok(Self {
            client,
            base_url,
            token: None,
            user_id: None,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Owner attached to saved records that do not carry one already.
    pub fn with_user_id(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn collection_url(&self) -> String {
        format!("{}/websites/configs/", self.base())
    }

    pub fn record_url(&self, template: TemplateId) -> String {
        format!("{}/websites/configs/{}/", self.base(), template)
    }

    fn base(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn save_request<'a>(
        &self,
        config: &'a PersistedConfig,
    ) -> SaveConfigRequest<'a> {
        // A record that already names its owner serializes it itself.
        let user_id = match config.user_id {
            Some(_) => None,
            None => self.user_id,
        };
        SaveConfigRequest { config, user_id }
    }
}

#[async_trait]
impl RemoteConfigStore for RestConfigStore {
    async fn load_config(
        &self,
        template: TemplateId,
    ) -> anyhow::Result<Option<PersistedConfig>> {
        let url = self.record_url(template);
        tracing::debug!(%url, "fetching website config");
        let response = self.authorize(self.client.get(&url)).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let config: PersistedConfig = response.json().await?;
                Ok(Some(config))
            }
            StatusCode::UNAUTHORIZED => Err(anyhow!("Authentication required")),
            StatusCode::FORBIDDEN => Err(anyhow!("Access denied")),
            status => {
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                Err(anyhow!(
                    "Request failed with status {}: {}",
                    status,
                    error_text
                ))
            }
        }
    }

    async fn save_config(
        &self,
        config: &PersistedConfig,
    ) -> anyhow::Result<()> {
        let url = self.collection_url();
        let body = self.save_request(config);
        let response = self
            .authorize(self.client.post(&url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(anyhow!(
            "Saving config for {} failed with status {}: {}",
            config.template_id,
            status,
            error_text
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_are_built_from_the_base_without_double_slashes() {
        let store = RestConfigStore::new("http://localhost:8000/api/")
            .expect("valid url");
        assert_eq!(
            store.record_url(TemplateId::CleanSlate),
            "http://localhost:8000/api/websites/configs/cleanslate/"
        );
        assert_eq!(
            store.collection_url(),
            "http://localhost:8000/api/websites/configs/"
        );
    }

    #[test]
    fn rejects_unusable_base_urls() {
        assert!(matches!(
            RestConfigStore::new("not a url"),
            Err(ThemeError::InvalidEndpoint(_))
        ));
        assert!(matches!(
            RestConfigStore::new("mailto:ops@example.com"),
            Err(ThemeError::InvalidEndpoint(_))
        ));
    }

    #[test]
    fn save_payload_flattens_the_record_and_attaches_the_owner() {
        let owner = Uuid::now_v7();
        let store = RestConfigStore::new("http://localhost:8000/api")
            .expect("valid url")
            .with_user_id(owner);
        let config =
            PersistedConfig::new(TemplateId::Service, "Fixit", "fixit.example")
                .with_logo("logo.png");

        let body = serde_json::to_value(store.save_request(&config))
            .expect("serialize");
        assert_eq!(body["template_id"], "service");
        assert_eq!(body["company_name"], "Fixit");
        assert_eq!(body["domain_name"], "fixit.example");
        assert_eq!(body["logo"], "logo.png");
        assert_eq!(body["user_id"], owner.to_string());
    }
}
