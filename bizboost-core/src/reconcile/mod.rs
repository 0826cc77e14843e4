//! Persistence reconciliation around a [`ThemeStore`].
//!
//! Load precedence on entering a template:
//! 1. the session snapshot is applied synchronously,
//! 2. the remote record replaces it once [`PendingLoad::fetch`] resolves,
//!    unless a newer route change or user edit happened in the meantime.
//!
//! Every color change updates the session snapshot immediately and returns a
//! [`PendingWrite`] that read-modify-writes the remote record.

mod load;
mod session;
mod write;

pub use load::{LoadApplied, LoadOutcome, PendingLoad};
pub use session::SessionCache;
pub use write::{PendingWrite, PersistNotice, SkipReason, WriteOutcome};

use write::WriteSlot;

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use bizboost_contracts::remote::RemoteConfigStore;
use bizboost_contracts::session::SessionStorage;
use bizboost_model::{
    ColorPair, ColorUpdate, SESSION_KEY, SessionSnapshot, StoredColors,
    TemplateId,
};

use crate::classes::ColorClasses;
use crate::classifier::classify;
use crate::error::{Result, ThemeError};
use crate::store::{ThemeStore, ThemeView};

/// Tunables for a [`ThemeController`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerOptions {
    /// Session storage key of the company blob.
    pub session_key: String,
    /// Upper bound for each remote call. `None` waits indefinitely.
    pub request_timeout: Option<Duration>,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            session_key: SESSION_KEY.to_string(),
            request_timeout: Some(Duration::from_secs(10)),
        }
    }
}

/// Owns the theme for one view hierarchy and keeps it in step with the
/// session cache and the remote config store.
pub struct ThemeController {
    store: ThemeStore,
    session: SessionCache,
    remote: Arc<dyn RemoteConfigStore>,
    timeout: Option<Duration>,
    generation: u64,
    write_slots: HashMap<Option<TemplateId>, Arc<WriteSlot>>,
}

impl std::fmt::Debug for ThemeController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeController")
            .field("store", &self.store)
            .field("session", &self.session)
            .field("timeout", &self.timeout)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl ThemeController {
    /// Controller with no template context and no pending load.
    pub fn new(
        options: ControllerOptions,
        session: Arc<dyn SessionStorage>,
        remote: Arc<dyn RemoteConfigStore>,
    ) -> Self {
        Self {
            store: ThemeStore::default(),
            session: SessionCache::new(session, options.session_key),
            remote,
            timeout: options.request_timeout,
            generation: 0,
            write_slots: HashMap::new(),
        }
    }

    /// Controller mounted at `path`, with the remote load for its template
    /// (if any) ready to be fetched.
    pub fn create(
        path: &str,
        options: ControllerOptions,
        session: Arc<dyn SessionStorage>,
        remote: Arc<dyn RemoteConfigStore>,
    ) -> (Self, Option<PendingLoad>) {
        let mut controller = Self::new(options, session, remote);
        let load = controller.enter(classify(path));
        (controller, load)
    }

    /// Route change notification from the host router.
    ///
    /// Navigating within the same template keeps the current state. Moving
    /// to another template (or out of any) discards it and starts from the
    /// new template's defaults plus the session snapshot.
    pub fn on_route_changed(&mut self, path: &str) -> Option<PendingLoad> {
        let template = classify(path);
        if template == self.store.template_type() {
            tracing::trace!(path, "route change within the same template");
            return None;
        }
        self.enter(template)
    }

    fn enter(&mut self, template: Option<TemplateId>) -> Option<PendingLoad> {
        tracing::debug!(
            template = bizboost_model::template_str(template),
            "entering template"
        );
        self.store.reset(template);
        self.generation += 1;

        let template = template?;
        if let Some(snapshot) = self.session.read()
            && session_matches(&snapshot, template)
            && self.store.apply_session(snapshot.stored_colors())
        {
            tracing::debug!(
                %template,
                primary = %self.store.colors().primary,
                secondary = %self.store.colors().secondary,
                "applied session colors"
            );
        }

        Some(PendingLoad {
            remote: Arc::clone(&self.remote),
            template,
            generation: self.generation,
            timeout: self.timeout,
        })
    }

    /// Apply a fetched remote record unless it has been superseded.
    pub fn complete_load(&mut self, outcome: LoadOutcome) -> LoadApplied {
        if outcome.generation != self.generation
            || Some(outcome.template) != self.store.template_type()
        {
            tracing::debug!(
                template = %outcome.template,
                requested = outcome.generation,
                current = self.generation,
                "discarding stale remote load"
            );
            return LoadApplied::Stale;
        }

        match outcome.result {
            Ok(Some(config)) => {
                let stored = config.stored_colors();
                self.store.apply_remote(stored);
                self.mirror_into_session(stored);
                LoadApplied::Remote(self.store.colors())
            }
            Ok(None) => {
                tracing::debug!(
                    template = %outcome.template,
                    "no remote record; using defaults"
                );
                self.store.apply_defaults();
                LoadApplied::Defaults(self.store.colors())
            }
            Err(err) => {
                tracing::error!(
                    template = %outcome.template,
                    error = %err,
                    "error loading saved colors"
                );
                self.store.apply_defaults();
                LoadApplied::Defaults(self.store.colors())
            }
        }
    }

    /// Fetch and apply in one step, for hosts that do not interleave input
    /// with the initial load.
    pub async fn settle(&mut self, load: PendingLoad) -> LoadApplied {
        let outcome = load.fetch().await;
        self.complete_load(outcome)
    }

    pub fn set_primary_color(&mut self, color: &str) -> PendingWrite {
        let token = self.store.set_primary_color(color);
        self.after_mutation(
            ColorUpdate::primary(token),
            PersistNotice::PrimaryUpdated,
        )
    }

    pub fn set_secondary_color(&mut self, color: &str) -> PendingWrite {
        let token = self.store.set_secondary_color(color);
        self.after_mutation(
            ColorUpdate::secondary(token),
            PersistNotice::SecondaryUpdated,
        )
    }

    /// Undo the last change. `None` when there was nothing to undo.
    pub fn undo_last_change(&mut self) -> Option<PendingWrite> {
        let restored = self.store.undo_last_change()?;
        Some(self.after_mutation(
            ColorUpdate::both(restored),
            PersistNotice::ColorsRestored,
        ))
    }

    fn after_mutation(
        &mut self,
        update: ColorUpdate,
        notice: PersistNotice,
    ) -> PendingWrite {
        self.generation += 1;
        if let Err(err) = self.session.merge_colors(update) {
            tracing::warn!(error = %err, "failed to update session colors");
        }

        // Writes only supersede earlier writes to the same record.
        let template = self.store.template_type();
        let slot = Arc::clone(self.write_slots.entry(template).or_default());
        PendingWrite {
            remote: Arc::clone(&self.remote),
            template,
            colors: self.store.colors(),
            notice,
            sequence: slot.issue(),
            slot,
            timeout: self.timeout,
        }
    }

    fn mirror_into_session(&self, stored: StoredColors<'_>) {
        let colors = self.store.colors();
        let update = ColorUpdate {
            primary: stored.primary.map(|_| colors.primary),
            secondary: stored.secondary.map(|_| colors.secondary),
        };
        if let Err(err) = self.session.merge_colors(update) {
            tracing::warn!(
                error = %err,
                "failed to mirror remote colors into session"
            );
        }
    }

    pub fn store(&self) -> &ThemeStore {
        &self.store
    }

    pub fn session(&self) -> &SessionCache {
        &self.session
    }

    pub fn template_type(&self) -> Option<TemplateId> {
        self.store.template_type()
    }

    pub fn colors(&self) -> ColorPair {
        self.store.colors()
    }

    pub fn color_classes(&self) -> ColorClasses {
        self.store.color_classes()
    }

    pub fn view(&self) -> ThemeView {
        self.store.view()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// A blob tagged with another template belongs to that template's site and
/// is not applied. Untagged blobs apply everywhere.
fn session_matches(snapshot: &SessionSnapshot, template: TemplateId) -> bool {
    match snapshot.template.as_deref() {
        Some(tag) if !tag.is_empty() => tag == template.as_str(),
        _ => true,
    }
}

async fn remote_call<T>(
    timeout: Option<Duration>,
    call: impl Future<Output = anyhow::Result<T>>,
) -> Result<T> {
    match timeout {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .map_err(|_| ThemeError::Timeout(limit))?
            .map_err(ThemeError::Remote),
        None => call.await.map_err(ThemeError::Remote),
    }
}
