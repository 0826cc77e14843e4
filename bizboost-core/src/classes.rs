//! Utility-class tokens handed to presentational components.

use bizboost_model::{ColorPair, ColorToken, TemplateId};
use serde::Serialize;

/// Derived styling tokens for one resolved theme.
///
/// Components read these and never reach back into the theme state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorClasses {
    pub bg: String,
    pub text: String,
    pub hover: String,
    pub muted: String,
    pub border: String,
    pub secondary_bg: String,
    pub secondary_text: String,
    pub secondary_hover: String,
    pub secondary_muted: String,
    pub secondary_border: String,
}

impl ColorClasses {
    /// Tokens for `colors` under `template`.
    ///
    /// Clean Slate ignores `colors` entirely and always yields
    /// [`ColorClasses::clean_slate`].
    pub fn derive(template: Option<TemplateId>, colors: ColorPair) -> Self {
        match template {
            Some(template) if !template.is_recolorable() => Self::clean_slate(),
            _ => Self::from_colors(colors),
        }
    }

    pub fn from_colors(colors: ColorPair) -> Self {
        let ColorPair { primary, secondary } = colors;
        Self {
            bg: shade("bg", primary, 600),
            text: shade("text", primary, 600),
            hover: format!("hover:{}", shade("bg", primary, 700)),
            muted: shade("text", primary, 500),
            border: shade("border", primary, 600),
            secondary_bg: shade("bg", secondary, 600),
            secondary_text: shade("text", secondary, 600),
            secondary_hover: format!("hover:{}", shade("bg", secondary, 700)),
            secondary_muted: shade("text", secondary, 500),
            secondary_border: shade("border", secondary, 600),
        }
    }

    pub fn clean_slate() -> Self {
        Self {
            bg: "bg-black".into(),
            text: "text-black".into(),
            hover: "hover:bg-gray-800".into(),
            muted: "text-gray-700".into(),
            border: "border-black".into(),
            secondary_bg: "bg-gray-600".into(),
            secondary_text: "text-gray-600".into(),
            secondary_hover: "hover:bg-gray-700".into(),
            secondary_muted: "text-gray-500".into(),
            secondary_border: "border-gray-600".into(),
        }
    }
}

impl Default for ColorClasses {
    fn default() -> Self {
        Self::from_colors(ColorPair::UNSCOPED)
    }
}

fn shade(prefix: &str, color: ColorToken, weight: u16) -> String {
    format!("{prefix}-{color}-{weight}")
}
