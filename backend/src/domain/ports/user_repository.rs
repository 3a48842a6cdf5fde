//! Port abstraction for user persistence adapters and their errors.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::{EmailAddress, NewUser, Page, User, UserFilter, UserPatch};

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// A unique field already holds the supplied value.
    #[error("a user with this {field} already exists")]
    Duplicate {
        /// The offending unique field (`username` or `email`).
        field: String,
    },
    /// A mutation referenced a user that does not exist.
    #[error("user with id {id} not found")]
    Missing {
        /// Identifier the mutation referenced.
        id: Uuid,
    },
}

impl UserRepositoryError {
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

    /// Create a duplicate-unique-field error for the given field.
    pub fn duplicate(field: impl Into<String>) -> Self {
        Self::Duplicate {
            field: field.into(),
        }
    }

    /// Create a missing-user error for the given identifier.
    pub const fn missing(id: Uuid) -> Self {
        Self::Missing { id }
    }
}

/// Sole owner of translating user operations into storage reads and writes.
///
/// Contract conventions (applied uniformly):
/// - reads signal absence with `Ok(None)`, never an error;
/// - `update` on a missing id fails with [`UserRepositoryError::Missing`];
/// - `delete` on a missing id is a successful no-op reported as `Ok(false)`.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact email match.
    async fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch at most one page of users matching the given equality filters,
    /// ordered deterministically so pages over a stable dataset are disjoint.
    async fn list(&self, page: Page, filter: &UserFilter)
    -> Result<Vec<User>, UserRepositoryError>;

    /// Persist a new user, returning the stored entity with its generated
    /// identifier and timestamps populated.
    async fn create(&self, new_user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Apply a partial update and return the refreshed entity.
    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<User, UserRepositoryError>;

    /// Physically delete a user. Returns whether a row was removed.
    async fn delete(&self, id: Uuid) -> Result<bool, UserRepositoryError>;

    /// Total number of users, unfiltered.
    async fn count(&self) -> Result<u64, UserRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn duplicate_error_names_the_field() {
        let err = UserRepositoryError::duplicate("email");
        assert_eq!(err.to_string(), "a user with this email already exists");
    }

    #[test]
    fn missing_error_names_the_id() {
        let id = Uuid::new_v4();
        let err = UserRepositoryError::missing(id);
        assert!(err.to_string().contains(&id.to_string()));
    }
}
