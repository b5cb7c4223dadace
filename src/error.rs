use thiserror::Error;

/// Registry failure kinds.
///
/// Connect and close failures are additionally logged at debug level where
/// they are caught; query failures are only reported to the caller.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("was not able to create connection properly: {0}")]
    Connect(#[source] mongodb::error::Error),

    #[error("was not able to close connection properly: no open client")]
    Close,

    #[error("unknown collection: {name}")]
    UnknownCollection { name: String },

    #[error(transparent)]
    Query(#[from] mongodb::error::Error),
}
