//! # bizboost core
//!
//! Theme state for bizboost template sites: which template a route belongs
//! to, which colors it renders with, and how those colors are kept in step
//! with the session cache and the remote website config store.
//!
//! ## Architecture
//!
//! - [`classifier`]: route path to [`TemplateId`](bizboost_model::TemplateId)
//! - [`palette`]: free text to a supported color token
//! - [`store`]: the in-memory [`ThemeStore`] with one-level undo
//! - [`classes`]: utility-class tokens for presentational components
//! - [`reconcile`]: the [`ThemeController`] that loads and persists colors
//! - [`infra`]: memory, file and HTTP collaborators
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use bizboost_core::infra::{MemoryConfigStore, MemorySessionStorage};
//! use bizboost_core::reconcile::{ControllerOptions, ThemeController};
//!
//! async fn preview() {
//!     let (mut controller, load) = ThemeController::create(
//!         "/tradecraft/about",
//!         ControllerOptions::default(),
//!         Arc::new(MemorySessionStorage::new()),
//!         Arc::new(MemoryConfigStore::new()),
//!     );
//!     if let Some(load) = load {
//!         controller.settle(load).await;
//!     }
//!     let write = controller.set_primary_color("red");
//!     println!("{}", controller.color_classes().bg);
//!     let _ = write.commit().await;
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod classes;
pub mod classifier;
pub mod error;
pub mod infra;
pub mod palette;
pub mod reconcile;
pub mod store;

pub use classes::ColorClasses;
pub use classifier::classify;
pub use error::{Result, ThemeError};
pub use palette::{resolve_color, resolve_color_audited, resolve_color_or};
pub use reconcile::{
    ControllerOptions, LoadApplied, PendingLoad, PendingWrite, PersistNotice,
    ThemeController, WriteOutcome,
};
pub use store::{ThemeMode, ThemeStore, ThemeView};
