//! Adapters for the collaborator traits.

pub mod file_session;
pub mod memory;
pub mod rest;

pub use file_session::FileSessionStorage;
pub use memory::{MemoryConfigStore, MemorySessionStorage};
pub use rest::RestConfigStore;
