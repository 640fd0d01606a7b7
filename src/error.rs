//! Crate error type.
//!
//! Only the persistence-facing surface can fail. Sequence construction and
//! timeline building are total: "nothing eligible" is an empty result.

use crate::store::StoreError;

/// Errors surfaced by playlist persistence and configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The playlist store failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No validity window of this many hours can be built.
    #[error("validity of {0} hour(s) is out of range")]
    InvalidValidity(u32),

    /// Configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Crate result alias.
pub type Result<T> = std::result::Result<T, Error>;
