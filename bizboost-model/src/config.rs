use uuid::Uuid;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::{ColorUpdate, StoredColors};
use crate::template::TemplateId;

/// Durable per-template website record owned by the backend.
///
/// The theme engine only ever changes `color_scheme` and
/// `secondary_color_scheme`, through [`PersistedConfig::merge_colors`]. The
/// identity fields are carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PersistedConfig {
    pub template_id: TemplateId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub company_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub domain_name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub logo: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub color_scheme: Option<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub secondary_color_scheme: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub user_id: Option<Uuid>,
}

impl PersistedConfig {
    pub fn new(
        template_id: TemplateId,
        company_name: impl Into<String>,
        domain_name: impl Into<String>,
    ) -> Self {
        Self {
            template_id,
            company_name: company_name.into(),
            domain_name: domain_name.into(),
            logo: None,
            color_scheme: None,
            secondary_color_scheme: None,
            user_id: None,
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    /// Overwrite the color fields named by `update`, leaving every other
    /// field as it was read.
    pub fn merge_colors(&mut self, update: ColorUpdate) {
        if let Some(primary) = update.primary {
            self.color_scheme = Some(primary.as_str().to_string());
        }
        if let Some(secondary) = update.secondary {
            self.secondary_color_scheme = Some(secondary.as_str().to_string());
        }
    }

    pub fn with_colors(mut self, update: impl Into<ColorUpdate>) -> Self {
        self.merge_colors(update.into());
        self
    }

    pub fn stored_colors(&self) -> StoredColors<'_> {
        StoredColors::new(
            self.color_scheme.as_deref(),
            self.secondary_color_scheme.as_deref(),
        )
    }
}
