//! Shared MongoDB connection with a cached collection map.
//!
//! [`ConnectionRegistry`] opens one client, lists the database's collections
//! once at connect time, and keeps name-to-handle bindings until [`close`]
//! clears them. The field helpers in [`registry::queries`] run against the
//! cached handles.
//!
//! [`close`]: ConnectionRegistry::close

pub mod config;
pub mod error;
pub mod registry;
mod uri;

pub use config::RegistryConfig;
pub use error::RegistryError;
pub use registry::ConnectionRegistry;
