//! Typed error handling for storage and field resolution
//!
//! Absence is never an error here: lookups that find nothing return `None` or
//! an empty `Vec`. The types below cover everything else.
//!
//! # Error Categories
//!
//! - [`StoreError`]: failures reported by a [`SocialStore`](crate::core::store::SocialStore)
//! - [`ResolveError`]: field-level failures surfaced to GraphQL clients
//!
//! # Example
//!
//! ```rust,ignore
//! match store.insert_user("a@x.com").await {
//!     Ok(user) => println!("created {}", user.id),
//!     Err(StoreError::Conflict { message, .. }) => eprintln!("taken: {message}"),
//!     Err(e) => return Err(e.into()),
//! }
//! ```

use async_graphql::ErrorExtensions;
use thiserror::Error;

/// Failure reported by the data-access layer
#[derive(Debug, Error)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write (duplicate email, duplicate follow edge)
    #[error("{entity} conflict: {message}")]
    Conflict {
        entity: &'static str,
        message: String,
    },

    /// A referential constraint rejected the write (dangling reference, row still referenced)
    #[error("{entity} constraint violation: {message}")]
    Constraint {
        entity: &'static str,
        message: String,
    },

    /// Backend failure unrelated to the data itself (lock poisoning, connectivity)
    #[error("Storage backend error: {0}")]
    Backend(String),

    #[cfg(feature = "postgres")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn conflict(entity: &'static str, message: impl Into<String>) -> Self {
        StoreError::Conflict {
            entity,
            message: message.into(),
        }
    }

    pub fn constraint(entity: &'static str, message: impl Into<String>) -> Self {
        StoreError::Constraint {
            entity,
            message: message.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        StoreError::Backend(message.into())
    }

    /// Machine-readable code attached to GraphQL error extensions
    pub fn error_code(&self) -> &'static str {
        match self {
            StoreError::Conflict { .. } => "CONFLICT",
            StoreError::Constraint { .. } => "CONSTRAINT_VIOLATION",
            StoreError::Backend(_) => "STORAGE_ERROR",
            #[cfg(feature = "postgres")]
            StoreError::Database(_) => "STORAGE_ERROR",
        }
    }
}

/// Field-level failure raised by a resolver
#[derive(Debug, Error)]
pub enum ResolveError {
    /// An identifier argument could not be coerced to an integer
    #[error("Invalid identifier for argument '{argument}': '{value}'")]
    InvalidId { argument: String, value: String },

    /// An argument was well-formed but semantically invalid
    #[error("Validation failed for '{field}': {message}")]
    Validation { field: String, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ResolveError {
    pub fn invalid_id(argument: impl Into<String>, value: impl Into<String>) -> Self {
        ResolveError::InvalidId {
            argument: argument.into(),
            value: value.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ResolveError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ResolveError::InvalidId { .. } => "INVALID_ID",
            ResolveError::Validation { .. } => "VALIDATION_ERROR",
            ResolveError::Store(e) => e.error_code(),
        }
    }
}

impl ErrorExtensions for ResolveError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.error_code());
        })
    }
}

impl ErrorExtensions for StoreError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.error_code());
        })
    }
}
