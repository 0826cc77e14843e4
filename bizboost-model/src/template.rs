use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ColorPair, ColorToken};
use crate::error::ModelError;

/// Business templates a site can be built from.
///
/// Pages outside any template (landing, dashboard, marketing) have no id and
/// are represented as `Option<TemplateId>::None` by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum TemplateId {
    Tradecraft,
    Retail,
    Service,
    Expert,
    CleanSlate,
}

impl TemplateId {
    /// Route prefix priority order.
    pub const ALL: [TemplateId; 5] = [
        TemplateId::Tradecraft,
        TemplateId::Retail,
        TemplateId::Service,
        TemplateId::Expert,
        TemplateId::CleanSlate,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TemplateId::Tradecraft => "tradecraft",
            TemplateId::Retail => "retail",
            TemplateId::Service => "service",
            TemplateId::Expert => "expert",
            TemplateId::CleanSlate => "cleanslate",
        }
    }

    /// Name shown in template pickers.
    pub const fn display_name(self) -> &'static str {
        match self {
            TemplateId::Tradecraft => "Tradecraft",
            TemplateId::Retail => "Retail Ready",
            TemplateId::Service => "Service Pro",
            TemplateId::Expert => "Local Expert",
            TemplateId::CleanSlate => "Clean Slate",
        }
    }

    /// Route prefix the template's pages are mounted under.
    pub const fn base_path(self) -> &'static str {
        match self {
            TemplateId::Tradecraft => "/tradecraft",
            TemplateId::Retail => "/retail",
            TemplateId::Service => "/service",
            TemplateId::Expert => "/expert",
            TemplateId::CleanSlate => "/cleanslate",
        }
    }

    pub const fn default_colors(self) -> ColorPair {
        match self {
            TemplateId::Tradecraft => {
                ColorPair::new(ColorToken::Blue, ColorToken::Orange)
            }
            TemplateId::Retail => {
                ColorPair::new(ColorToken::Purple, ColorToken::Pink)
            }
            TemplateId::Service => {
                ColorPair::new(ColorToken::Teal, ColorToken::Green)
            }
            TemplateId::Expert => {
                ColorPair::new(ColorToken::Amber, ColorToken::Yellow)
            }
            TemplateId::CleanSlate => {
                ColorPair::new(ColorToken::Black, ColorToken::Gray)
            }
        }
    }

    /// Whether stored colors are honored. Clean Slate is a fixed blank
    /// canvas and always renders black/gray.
    pub const fn is_recolorable(self) -> bool {
        !matches!(self, TemplateId::CleanSlate)
    }
}

/// Default palette for an optional template context.
pub const fn default_colors_for(template: Option<TemplateId>) -> ColorPair {
    match template {
        Some(template) => template.default_colors(),
        None => ColorPair::UNSCOPED,
    }
}

/// Wire form of an optional template, `""` when there is none.
pub fn template_str(template: Option<TemplateId>) -> &'static str {
    template.map(TemplateId::as_str).unwrap_or("")
}

impl Display for TemplateId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|template| template.as_str() == s)
            .ok_or_else(|| ModelError::UnknownTemplate(s.to_string()))
    }
}
