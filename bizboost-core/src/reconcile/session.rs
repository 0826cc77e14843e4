//! Typed access to the session blob.

use std::sync::Arc;

use bizboost_contracts::session::SessionStorage;
use bizboost_model::{ColorUpdate, SessionSnapshot};

use crate::error::{Result, ThemeError};

/// The company blob in session storage, read and merged field by field.
#[derive(Clone)]
pub struct SessionCache {
    storage: Arc<dyn SessionStorage>,
    key: String,
}

impl std::fmt::Debug for SessionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCache")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl SessionCache {
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current snapshot, or `None` when absent. A blob that does not parse
    /// is logged and treated as absent.
    pub fn read(&self) -> Option<SessionSnapshot> {
        let raw = self.storage.get_item(&self.key)?;
        match SessionSnapshot::from_json(&raw) {
            Ok(snapshot) => Some(snapshot),
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "ignoring malformed session snapshot"
                );
                None
            }
        }
    }

    /// Replace the whole blob.
    pub fn write(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let raw = snapshot.to_json()?;
        self.storage
            .set_item(&self.key, &raw)
            .map_err(ThemeError::Session)
    }

    /// Merge `update` into an existing blob, keeping every other field.
    ///
    /// Returns `Ok(false)` without writing when no blob exists; the blob is
    /// created by the site setup flow, not by color changes.
    pub fn merge_colors(&self, update: ColorUpdate) -> Result<bool> {
        if update.is_empty() {
            return Ok(false);
        }
        let Some(mut snapshot) = self.read() else {
            return Ok(false);
        };
        snapshot.merge_colors(update);
        self.write(&snapshot)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<()> {
        self.storage
            .remove_item(&self.key)
            .map_err(ThemeError::Session)
    }
}
