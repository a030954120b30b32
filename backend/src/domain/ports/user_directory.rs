//! Port for the user collaborator.

use async_trait::async_trait;

use crate::domain::{User, UserId};

/// Errors raised by user directory adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserDirectoryError {
    /// Directory connection could not be established.
    #[error("user directory connection failed: {message}")]
    Connection {
        /// Adapter-provided failure description.
        message: String,
    },
    /// Query failed during execution.
    #[error("user directory query failed: {message}")]
    Query {
        /// Adapter-provided failure description.
        message: String,
    },
}

impl UserDirectoryError {
    /// Create a connection error with the given message.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Create a query error with the given message.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Port for account lookups needed by notification content and alerts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch an account by id.
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, UserDirectoryError>;

    /// Fetch any administrative account, if one exists.
    async fn find_admin(&self) -> Result<Option<User>, UserDirectoryError>;
}

/// Fixture directory with no accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserDirectory;

#[async_trait]
impl UserDirectory for FixtureUserDirectory {
    async fn find_by_id(&self, _user_id: &UserId) -> Result<Option<User>, UserDirectoryError> {
        Ok(None)
    }

    async fn find_admin(&self) -> Result<Option<User>, UserDirectoryError> {
        Ok(None)
    }
}
