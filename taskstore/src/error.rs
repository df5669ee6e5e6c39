//! Error types for taskstore
//!
//! Each variant names the phase that failed. The underlying `sqlx` error is
//! carried unchanged so callers can inspect it.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Connection descriptor could not be parsed
    #[error("invalid connection descriptor: {reason}")]
    InvalidDescriptor { reason: String },

    /// Pool could not open its first connection (host, auth, TLS)
    #[error("connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Statement failed to execute
    #[error("query error: {0}")]
    Query(#[source] sqlx::Error),

    /// Result row could not be decoded into a task
    #[error("scan error: {0}")]
    Scan(#[source] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl Error {
    pub(crate) fn invalid_descriptor(reason: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            reason: reason.into(),
        }
    }

    /// True for failures while constructing the store.
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::InvalidDescriptor { .. } | Self::Connection(_))
    }

    /// The underlying driver error, if any.
    pub fn sqlx(&self) -> Option<&sqlx::Error> {
        match self {
            Self::Connection(e) | Self::Query(e) | Self::Scan(e) => Some(e),
            Self::InvalidDescriptor { .. } | Self::Migration(_) => None,
        }
    }
}
