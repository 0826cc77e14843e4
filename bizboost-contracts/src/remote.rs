use std::sync::Arc;

use async_trait::async_trait;
use bizboost_model::{PersistedConfig, TemplateId};

/// Durable store of per-template website records.
#[async_trait]
pub trait RemoteConfigStore: Send + Sync {
    /// Fetch the record for `template`. `Ok(None)` means no record exists.
    async fn load_config(
        &self,
        template: TemplateId,
    ) -> anyhow::Result<Option<PersistedConfig>>;

    /// Upsert a full record. Callers are expected to have read the current
    /// record first so fields they do not own are written back unchanged.
    async fn save_config(
        &self,
        config: &PersistedConfig,
    ) -> anyhow::Result<()>;
}

#[async_trait]
impl<T> RemoteConfigStore for Arc<T>
where
    T: RemoteConfigStore + ?Sized,
{
    async fn load_config(
        &self,
        template: TemplateId,
    ) -> anyhow::Result<Option<PersistedConfig>> {
        (**self).load_config(template).await
    }

    async fn save_config(
        &self,
        config: &PersistedConfig,
    ) -> anyhow::Result<()> {
        (**self).save_config(config).await
    }
}
