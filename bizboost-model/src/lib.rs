//! Core data model definitions shared across bizboost crates.
#![allow(missing_docs)]

pub mod color;
pub mod config;
pub mod error;
#[cfg(feature = "serde")]
pub mod session;
pub mod template;

pub use color::{
    ColorPair, ColorResolution, ColorToken, ColorUpdate, StoredColors,
};
pub use config::PersistedConfig;
pub use error::{ModelError, Result as ModelResult};
#[cfg(feature = "serde")]
pub use session::{SESSION_KEY, SessionSnapshot};
pub use template::{TemplateId, default_colors_for, template_str};
