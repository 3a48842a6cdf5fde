//! Pass-through [`UserService`] implementation over a repository port.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError, UserService};
use crate::domain::user::{EmailAddress, NewUser, Page, User, UserFilter, UserPatch};

/// [`UserService`] that forwards every operation to the repository unchanged.
///
/// Carries no business rule of its own; it satisfies the layering convention
/// and keeps the injection seam in place for logic added later.
#[derive(Clone)]
pub struct DirectUserService {
    repository: Arc<dyn UserRepository>,
}

impl DirectUserService {
    /// Create a service backed by the given repository.
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl UserService for DirectUserService {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        self.repository.get_by_id(id).await
    }

    async fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        self.repository.get_by_email(email).await
    }

    async fn list(
        &self,
        page: Page,
        filter: &UserFilter,
    ) -> Result<Vec<User>, UserRepositoryError> {
        self.repository.list(page, filter).await
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, UserRepositoryError> {
        self.repository.create(new_user).await
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<User, UserRepositoryError> {
        self.repository.update(id, patch).await
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserRepositoryError> {
        self.repository.delete(id).await
    }

    async fn count(&self) -> Result<u64, UserRepositoryError> {
        self.repository.count().await
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for forwarding and error passthrough.
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;
    use crate::domain::user::Username;

    #[derive(Default)]
    struct StubState {
        stored: Option<User>,
        failure: Option<UserRepositoryError>,
    }

    #[derive(Default)]
    struct StubUserRepository {
        state: Mutex<StubState>,
    }

    impl StubUserRepository {
        fn with_user(user: User) -> Self {
            Self {
                state: Mutex::new(StubState {
                    stored: Some(user),
                    ..StubState::default()
                }),
            }
        }

        fn failing(failure: UserRepositoryError) -> Self {
            Self {
                state: Mutex::new(StubState {
                    failure: Some(failure),
                    ..StubState::default()
                }),
            }
        }

        fn check(&self) -> Result<Option<User>, UserRepositoryError> {
            let state = self.state.lock().expect("state lock");
            if let Some(failure) = &state.failure {
                return Err(failure.clone());
            }
            Ok(state.stored.clone())
        }
    }

    #[async_trait]
    impl UserRepository for StubUserRepository {
        async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
            Ok(self.check()?.filter(|user| user.id() == id))
        }

        async fn get_by_email(
            &self,
            email: &EmailAddress,
        ) -> Result<Option<User>, UserRepositoryError> {
            Ok(self.check()?.filter(|user| user.email() == email))
        }

        async fn list(
            &self,
            _page: Page,
            _filter: &UserFilter,
        ) -> Result<Vec<User>, UserRepositoryError> {
            Ok(self.check()?.into_iter().collect())
        }

        async fn create(&self, new_user: &NewUser) -> Result<User, UserRepositoryError> {
            self.check()?;
            let now = Utc::now();
            Ok(User::new(
                Uuid::new_v4(),
                new_user.username().clone(),
                new_user.email().clone(),
                new_user.description().to_owned(),
                now,
                now,
            ))
        }

        async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<User, UserRepositoryError> {
            let mut user = self.check()?.ok_or(UserRepositoryError::missing(id))?;
            user.apply(patch, Utc::now());
            Ok(user)
        }

        async fn delete(&self, _id: Uuid) -> Result<bool, UserRepositoryError> {
            Ok(self.check()?.is_some())
        }

        async fn count(&self) -> Result<u64, UserRepositoryError> {
            Ok(u64::from(self.check()?.is_some()))
        }
    }

    fn sample_user() -> User {
        let now = Utc::now();
        User::new(
            Uuid::new_v4(),
            Username::new("john_doe").expect("username"),
            EmailAddress::new("test@example.com").expect("email"),
            "Test user".to_owned(),
            now,
            now,
        )
    }

    #[tokio::test]
    async fn get_by_id_forwards_to_repository() {
        let user = sample_user();
        let service = DirectUserService::new(Arc::new(StubUserRepository::with_user(user.clone())));

        let fetched = service.get_by_id(user.id()).await.expect("lookup succeeds");

        assert_eq!(fetched, Some(user));
    }

    #[tokio::test]
    async fn absent_user_reads_as_none_not_error() {
        let service = DirectUserService::new(Arc::new(StubUserRepository::default()));

        let fetched = service
            .get_by_id(Uuid::new_v4())
            .await
            .expect("lookup succeeds");

        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn repository_errors_pass_through_unchanged() {
        let failure = UserRepositoryError::duplicate("email");
        let service =
            DirectUserService::new(Arc::new(StubUserRepository::failing(failure.clone())));

        let err = service
            .count()
            .await
            .expect_err("failure should propagate");

        assert_eq!(err, failure);
    }

    #[tokio::test]
    async fn update_on_missing_user_propagates_missing_error() {
        let service = DirectUserService::new(Arc::new(StubUserRepository::default()));
        let id = Uuid::new_v4();

        let err = service
            .update(id, &UserPatch::default())
            .await
            .expect_err("missing user should error");

        assert_eq!(err, UserRepositoryError::missing(id));
    }
}
