//! Trait surfaces that describe the collaborators of the theme engine.
//!
//! The engine needs a per-template record from a remote store and a string
//! key/value area scoped to the browsing session.

pub mod remote;
pub mod session;

/// Frequently used trait imports for adapters and hosts.
pub mod prelude {
    pub use super::remote::RemoteConfigStore;
    pub use super::session::SessionStorage;
}
