use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use bizboost_contracts::remote::RemoteConfigStore;
use bizboost_model::{ColorPair, ColorUpdate, TemplateId};
use tokio::sync::Mutex;

use super::remote_call;
use crate::error::ThemeError;

/// Write ordering state for one template's record.
///
/// `latest` is the sequence of the newest change issued for the template;
/// `lock` is held by a commit from its read through its save.
#[derive(Debug, Default)]
pub(crate) struct WriteSlot {
    latest: AtomicU64,
    lock: Mutex<()>,
}

impl WriteSlot {
    /// Claim the next sequence number, superseding earlier changes.
    pub(crate) fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::AcqRel) + 1
    }
}

/// User-facing confirmation for a persisted color change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistNotice {
    PrimaryUpdated,
    SecondaryUpdated,
    ColorsRestored,
}

impl PersistNotice {
    pub fn title(self) -> &'static str {
        match self {
            PersistNotice::PrimaryUpdated | PersistNotice::SecondaryUpdated => {
                "Color Updated"
            }
            PersistNotice::ColorsRestored => "Colors Restored",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PersistNotice::PrimaryUpdated => {
                "Primary color has been updated successfully."
            }
            PersistNotice::SecondaryUpdated => {
                "Secondary color has been updated successfully."
            }
            PersistNotice::ColorsRestored => {
                "Colors have been restored to their previous values."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The change happened outside any template; nothing to key a record by.
    NoTemplate,
    /// The backend has no record for the template yet.
    NoRecord,
}

#[derive(Debug)]
pub enum WriteOutcome {
    Persisted(PersistNotice),
    Skipped(SkipReason),
    /// A later change was issued before this one reached the store.
    Superseded,
    /// The remote call failed. The in-memory change stands.
    Failed(ThemeError),
}

impl WriteOutcome {
    pub fn is_persisted(&self) -> bool {
        matches!(self, WriteOutcome::Persisted(_))
    }

    pub fn notice(&self) -> Option<PersistNotice> {
        match self {
            WriteOutcome::Persisted(notice) => Some(*notice),
            _ => None,
        }
    }
}

/// Remote write-through for one color change.
///
/// Captures the colors at the moment of the change; [`PendingWrite::commit`]
/// re-reads the record and overwrites only its two color fields.
pub struct PendingWrite {
    pub(super) remote: Arc<dyn RemoteConfigStore>,
    pub(super) template: Option<TemplateId>,
    pub(super) colors: ColorPair,
    pub(super) notice: PersistNotice,
    pub(super) sequence: u64,
    pub(super) slot: Arc<WriteSlot>,
    pub(super) timeout: Option<Duration>,
}

impl std::fmt::Debug for PendingWrite {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingWrite")
            .field("template", &self.template)
            .field("colors", &self.colors)
            .field("notice", &self.notice)
            .field("sequence", &self.sequence)
            .finish_non_exhaustive()
    }
}

impl PendingWrite {
    pub fn colors(&self) -> ColorPair {
        self.colors
    }

    pub fn template(&self) -> Option<TemplateId> {
        self.template
    }

    pub fn notice(&self) -> PersistNotice {
        self.notice
    }

    pub fn is_superseded(&self) -> bool {
        self.slot.latest.load(Ordering::Acquire) != self.sequence
    }

    /// Read-modify-write the remote record. Errors are logged and returned
    /// as [`WriteOutcome::Failed`], never propagated.
    ///
    /// Commits for the same template hold the template's write lock from the
    /// read through the save, so concurrent commits land in issue order and
    /// an older one never overwrites a newer one.
    pub async fn commit(self) -> WriteOutcome {
        let Some(template) = self.template else {
            return WriteOutcome::Skipped(SkipReason::NoTemplate);
        };

        let _guard = self.slot.lock.lock().await;
        if self.is_superseded() {
            return self.superseded(template);
        }

        let current =
            match remote_call(self.timeout, self.remote.load_config(template))
                .await
            {
                Ok(Some(config)) => config,
                Ok(None) => {
                    tracing::debug!(
                        %template,
                        "no remote record; color change kept local"
                    );
                    return WriteOutcome::Skipped(SkipReason::NoRecord);
                }
                Err(err) => {
                    tracing::error!(
                        %template,
                        error = %err,
                        "failed to read config before saving colors"
                    );
                    return WriteOutcome::Failed(err);
                }
            };

        if self.is_superseded() {
            return self.superseded(template);
        }

        let updated = current.with_colors(ColorUpdate::both(self.colors));
        match remote_call(self.timeout, self.remote.save_config(&updated)).await
        {
            Ok(()) => {
                tracing::info!(
                    %template,
                    primary = %self.colors.primary,
                    secondary = %self.colors.secondary,
                    "saved color scheme"
                );
                WriteOutcome::Persisted(self.notice)
            }
            Err(err) => {
                tracing::error!(
                    %template,
                    error = %err,
                    "error saving color scheme"
                );
                WriteOutcome::Failed(err)
            }
        }
    }

    fn superseded(&self, template: TemplateId) -> WriteOutcome {
        tracing::debug!(
            %template,
            sequence = self.sequence,
            "color write superseded"
        );
        WriteOutcome::Superseded
    }
}
