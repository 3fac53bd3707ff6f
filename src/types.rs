//! Shared error types for the membership core

use thiserror::Error;

/// Errors surfaced by the membership core
#[derive(Debug, Clone, Error)]
pub enum MembershipError {
    /// A record was asked to project into a query schema it does not support
    #[error("Unsupported query schema: {0}")]
    UnsupportedSchema(String),

    /// An identity key could not be parsed as a valid public key
    #[error("Malformed identity key: {0}")]
    MalformedIdentityKey(String),
}

/// Result alias for membership core operations
pub type Result<T> = std::result::Result<T, MembershipError>;
