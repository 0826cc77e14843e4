//! In-memory theme state for the active template.
//!
//! [`ThemeStore`] does no I/O. Persistence and remote reconciliation live in
//! [`crate::reconcile`], which drives the store through the crate-private
//! `apply_*` hooks below.

use bizboost_model::{
    ColorPair, ColorToken, StoredColors, TemplateId, default_colors_for,
    template_str,
};
use serde::Serialize;

use crate::classes::ColorClasses;
use crate::palette::resolve_color_or;

/// Whether the current colors are the template's own or an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Default,
    Overridden,
}

/// Single source of truth for the active template's appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeStore {
    template: Option<TemplateId>,
    colors: ColorPair,
    previous_primary: Option<ColorToken>,
    previous_secondary: Option<ColorToken>,
    mode: ThemeMode,
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(None)
    }
}

impl ThemeStore {
    pub fn new(template: Option<TemplateId>) -> Self {
        Self {
            template,
            colors: default_colors_for(template),
            previous_primary: None,
            previous_secondary: None,
            mode: ThemeMode::Default,
        }
    }

    /// Discard everything and start over from `template`'s defaults.
    pub fn reset(&mut self, template: Option<TemplateId>) {
        *self = Self::new(template);
    }

    pub fn template_type(&self) -> Option<TemplateId> {
        self.template
    }

    pub fn colors(&self) -> ColorPair {
        self.colors
    }

    pub fn defaults(&self) -> ColorPair {
        default_colors_for(self.template)
    }

    pub fn previous_primary(&self) -> Option<ColorToken> {
        self.previous_primary
    }

    pub fn previous_secondary(&self) -> Option<ColorToken> {
        self.previous_secondary
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn can_undo(&self) -> bool {
        self.previous_primary.is_some() || self.previous_secondary.is_some()
    }

    pub fn color_classes(&self) -> ColorClasses {
        ColorClasses::derive(self.template, self.colors)
    }

    pub fn view(&self) -> ThemeView {
        ThemeView {
            template: template_str(self.template),
            colors: self.colors,
            classes: self.color_classes(),
            can_undo: self.can_undo(),
            mode: self.mode,
        }
    }

    /// Set the primary color from free text.
    ///
    /// Unsupported input falls back to the template's default primary.
    /// Returns the token actually stored.
    pub fn set_primary_color(&mut self, color: &str) -> ColorToken {
        let token = resolve_color_or(color, self.defaults().primary);
        self.previous_primary = Some(self.colors.primary);
        self.colors.primary = token;
        self.mode = ThemeMode::Overridden;
        token
    }

    /// Set the secondary color from free text.
    ///
    /// Unsupported input falls back to the template's default secondary.
    pub fn set_secondary_color(&mut self, color: &str) -> ColorToken {
        let token = resolve_color_or(color, self.defaults().secondary);
        self.previous_secondary = Some(self.colors.secondary);
        self.colors.secondary = token;
        self.mode = ThemeMode::Overridden;
        token
    }

    /// Restore the colors from before the last change.
    ///
    /// A slot without a recorded previous value goes back to the template
    /// default. Both previous slots are cleared, so only one level of undo
    /// exists. Returns `None` when there was nothing to undo.
    pub fn undo_last_change(&mut self) -> Option<ColorPair> {
        if !self.can_undo() {
            return None;
        }
        let defaults = self.defaults();
        self.colors = ColorPair::new(
            self.previous_primary.take().unwrap_or(defaults.primary),
            self.previous_secondary.take().unwrap_or(defaults.secondary),
        );
        Some(self.colors)
    }

    /// Overlay colors found in the session cache. Missing fields keep their
    /// current value.
    pub(crate) fn apply_session(&mut self, stored: StoredColors<'_>) -> bool {
        if stored.is_empty() {
            return false;
        }
        let defaults = self.defaults();
        if let Some(raw) = stored.primary {
            self.colors.primary = resolve_color_or(raw, defaults.primary);
        }
        if let Some(raw) = stored.secondary {
            self.colors.secondary = resolve_color_or(raw, defaults.secondary);
        }
        self.mode = ThemeMode::Overridden;
        true
    }

    /// Replace colors with a remote record's. Missing fields fall back to the
    /// template defaults and undo bookkeeping is cleared.
    pub(crate) fn apply_remote(&mut self, stored: StoredColors<'_>) {
        let defaults = self.defaults();
        let resolve = |raw: Option<&str>, fallback: ColorToken| {
            raw.map_or(fallback, |raw| resolve_color_or(raw, fallback))
        };
        self.colors = ColorPair::new(
            resolve(stored.primary, defaults.primary),
            resolve(stored.secondary, defaults.secondary),
        );
        self.clear_previous();
        self.mode = if stored.is_empty() {
            ThemeMode::Default
        } else {
            ThemeMode::Overridden
        };
    }

    pub(crate) fn apply_defaults(&mut self) {
        self.colors = self.defaults();
        self.clear_previous();
        self.mode = ThemeMode::Default;
    }

    fn clear_previous(&mut self) {
        self.previous_primary = None;
        self.previous_secondary = None;
    }
}

/// Read-only snapshot handed to renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeView {
    pub template: &'static str,
    pub colors: ColorPair,
    pub classes: ColorClasses,
    pub can_undo: bool,
    pub mode: ThemeMode,
}
