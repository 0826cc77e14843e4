//! Session-scoped mirror of the company record.
//!
//! The front-end keeps a JSON blob under [`SESSION_KEY`] so previews render
//! without a round trip. Other screens write fields this crate does not know
//! about, so anything unrecognised is kept in [`SessionSnapshot::extra`] and
//! written back verbatim.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::{ColorUpdate, StoredColors};

/// Well-known session storage key holding the company blob.
pub const SESSION_KEY: &str = "companyData";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color_scheme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SessionSnapshot {
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn merge_colors(&mut self, update: ColorUpdate) {
        if let Some(primary) = update.primary {
            self.color_scheme = Some(primary.as_str().to_string());
        }
        if let Some(secondary) = update.secondary {
            self.secondary_color_scheme = Some(secondary.as_str().to_string());
        }
    }

    pub fn stored_colors(&self) -> StoredColors<'_> {
        StoredColors::new(
            self.color_scheme.as_deref(),
            self.secondary_color_scheme.as_deref(),
        )
    }
}
