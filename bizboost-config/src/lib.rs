//! Configuration loading for the bizboost theme engine.
//!
//! Settings come from one file or inline JSON chosen by environment
//! variables (see [`ThemeEngineConfig::load_from_env`]), then individual
//! `BIZBOOST_*` variables are layered on top through [`EnvOverrides`].

pub mod env;
pub mod error;
pub mod models;
pub mod util;

pub use env::EnvOverrides;
pub use error::ConfigLoadError;
pub use models::{
    DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_SESSION_FILE, ThemeEngineConfig,
    ThemeEngineConfigSource,
};
