//! In-process collaborators for previews, demos and tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use bizboost_contracts::remote::RemoteConfigStore;
use bizboost_contracts::session::SessionStorage;
use bizboost_model::{PersistedConfig, SessionSnapshot, TemplateId};

/// Remote store kept in memory, with switchable failures and a save log.
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigStore {
    records: Arc<RwLock<HashMap<TemplateId, PersistedConfig>>>,
    saves: Arc<RwLock<Vec<PersistedConfig>>>,
    load_calls: Arc<AtomicUsize>,
    fail_loads: Arc<AtomicBool>,
    fail_saves: Arc<AtomicBool>,
}

impl MemoryConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(
        records: impl IntoIterator<Item = PersistedConfig>,
    ) -> Self {
        let store = Self::new();
        for record in records {
            store.insert(record);
        }
        store
    }

    pub fn insert(&self, record: PersistedConfig) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(record.template_id, record);
    }

    pub fn get(&self, template: TemplateId) -> Option<PersistedConfig> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&template)
            .cloned()
    }

    /// Every record passed to `save_config`, in call order.
    pub fn saved(&self) -> Vec<PersistedConfig> {
        self.saves
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn load_calls(&self) -> usize {
        self.load_calls.load(Ordering::Relaxed)
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.store(fail, Ordering::Relaxed);
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl RemoteConfigStore for MemoryConfigStore {
    async fn load_config(
        &self,
        template: TemplateId,
    ) -> anyhow::Result<Option<PersistedConfig>> {
        self.load_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_loads.load(Ordering::Relaxed) {
            anyhow::bail!("remote store unavailable");
        }
        Ok(self.get(template))
    }

    async fn save_config(
        &self,
        config: &PersistedConfig,
    ) -> anyhow::Result<()> {
        if self.fail_saves.load(Ordering::Relaxed) {
            anyhow::bail!("remote store rejected the write");
        }
        self.saves
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(config.clone());
        self.insert(config.clone());
        Ok(())
    }
}

/// Session storage scoped to the lifetime of the value.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with an encoded snapshot under `key`.
    pub fn with_snapshot(
        key: &str,
        snapshot: &SessionSnapshot,
    ) -> serde_json::Result<Self> {
        let storage = Self::new();
        storage
            .items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), snapshot.to_json()?);
        Ok(storage)
    }

    pub fn snapshot(&self, key: &str) -> Option<SessionSnapshot> {
        self.get_item(key)
            .and_then(|raw| SessionSnapshot::from_json(&raw).ok())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set_item(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> anyhow::Result<()> {
        self.items
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
