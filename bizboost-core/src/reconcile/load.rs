use std::sync::Arc;
use std::time::Duration;

use bizboost_contracts::remote::RemoteConfigStore;
use bizboost_model::{ColorPair, PersistedConfig, TemplateId};

use super::remote_call;
use crate::error::Result;

/// Remote fetch for a freshly entered template, not yet applied.
///
/// Holds no borrow of the controller, so the host can keep handling user
/// input while [`PendingLoad::fetch`] is in flight.
pub struct PendingLoad {
    pub(super) remote: Arc<dyn RemoteConfigStore>,
    pub(super) template: TemplateId,
    pub(super) generation: u64,
    pub(super) timeout: Option<Duration>,
}

impl std::fmt::Debug for PendingLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingLoad")
            .field("template", &self.template)
            .field("generation", &self.generation)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl PendingLoad {
    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub async fn fetch(self) -> LoadOutcome {
        let result =
            remote_call(self.timeout, self.remote.load_config(self.template))
                .await;
        LoadOutcome {
            template: self.template,
            generation: self.generation,
            result,
        }
    }
}

/// Fetched remote record, tagged with the generation that requested it.
#[derive(Debug)]
pub struct LoadOutcome {
    pub(super) template: TemplateId,
    pub(super) generation: u64,
    pub(super) result: Result<Option<PersistedConfig>>,
}

impl LoadOutcome {
    pub fn template(&self) -> TemplateId {
        self.template
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// What [`super::ThemeController::complete_load`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadApplied {
    /// A remote record was found; its colors (or defaults for missing
    /// fields) are now active.
    Remote(ColorPair),
    /// No record, or the fetch failed: template defaults are active.
    Defaults(ColorPair),
    /// A newer route change or user edit happened after the load was
    /// requested; the outcome was dropped.
    Stale,
}
