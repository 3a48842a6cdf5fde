//! Port abstraction for the user service seam.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::UserRepositoryError;
use crate::domain::user::{EmailAddress, NewUser, Page, User, UserFilter, UserPatch};

/// Layering seam between transport adapters and the user repository.
///
/// The current implementation forwards every call unchanged; the trait exists
/// so future business rules (password hashing, event publication) land here
/// without touching handlers or repositories. Errors pass through untouched:
/// the transport layer is the only place they become status codes.
#[async_trait]
pub trait UserService: Send + Sync {
    /// Fetch a user by identifier.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by exact email match.
    async fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch one page of users matching the given filters.
    async fn list(&self, page: Page, filter: &UserFilter)
    -> Result<Vec<User>, UserRepositoryError>;

    /// Create a user from validated input.
    async fn create(&self, new_user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Apply a partial update and return the refreshed entity.
    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<User, UserRepositoryError>;

    /// Delete a user; absent ids are a successful no-op.
    async fn delete(&self, id: Uuid) -> Result<bool, UserRepositoryError>;

    /// Total number of users, unfiltered.
    async fn count(&self) -> Result<u64, UserRepositoryError>;
}
