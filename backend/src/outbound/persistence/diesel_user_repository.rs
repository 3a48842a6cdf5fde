//! PostgreSQL-backed [`UserRepository`] implementation using Diesel.
//!
//! This adapter owns every persistence-specific decision for the user
//! aggregate: pagination offsets, filter application, unique-violation
//! mapping, and refresh-after-write via `RETURNING`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{EmailAddress, NewUser, Page, User, UserFilter, UserPatch, Username};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the [`UserRepository`] port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> UserRepositoryError {
    match error {
        PoolError::Build { message } | PoolError::Checkout { message } => {
            UserRepositoryError::connection(message)
        }
    }
}

/// Decide which unique field a violation refers to.
///
/// PostgreSQL names the constraints `users_username_key` and
/// `users_email_key`; the error message is used as a fallback when the
/// driver does not report a constraint name.
fn duplicate_field(constraint: Option<&str>, message: &str) -> &'static str {
    let hint = constraint.unwrap_or(message);
    if hint.contains("username") {
        "username"
    } else if hint.contains("email") {
        "email"
    } else {
        "unique field"
    }
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> UserRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(
                constraint = info.constraint_name(),
                message = info.message(),
                "unique constraint violated"
            );
            UserRepositoryError::duplicate(duplicate_field(info.constraint_name(), info.message()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            UserRepositoryError::connection(info.message().to_owned())
        }
        DieselError::NotFound => UserRepositoryError::query("record not found"),
        other => UserRepositoryError::query(other.to_string()),
    }
}

/// Convert a database row to a domain [`User`].
///
/// Stored rows were validated at write time; a row that no longer passes
/// validation indicates out-of-band writes and surfaces as a query error.
fn row_to_user(row: UserRow) -> Result<User, UserRepositoryError> {
    let id = row.id;
    let username = Username::new(row.username).map_err(|err| {
        warn!(user_id = %id, error = %err, "stored username failed validation");
        UserRepositoryError::query("stored user failed validation")
    })?;
    let email = EmailAddress::new(row.email).map_err(|err| {
        warn!(user_id = %id, error = %err, "stored email failed validation");
        UserRepositoryError::query("stored user failed validation")
    })?;

    Ok(User::new(
        id,
        username,
        email,
        row.description,
        row.created_at,
        row.updated_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn get_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn list(
        &self,
        page: Page,
        filter: &UserFilter,
    ) -> Result<Vec<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = users::table.select(UserRow::as_select()).into_boxed();
        if let Some(username) = &filter.username {
            query = query.filter(users::username.eq(username.clone()));
        }
        if let Some(email) = &filter.email {
            query = query.filter(users::email.eq(email.clone()));
        }

        // Creation order with the id as tie-breaker keeps pages disjoint.
        let rows: Vec<UserRow> = query
            .order((users::created_at.asc(), users::id.asc()))
            .offset(page.offset())
            .limit(page.limit())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(row_to_user).collect()
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let now = Utc::now();
        let row = NewUserRow {
            id: Uuid::new_v4(),
            username: new_user.username().as_ref(),
            email: new_user.email().as_ref(),
            description: new_user.description(),
            created_at: now,
            updated_at: now,
        };

        let inserted: UserRow = diesel::insert_into(users::table)
            .values(&row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_user(inserted)
    }

    async fn update(&self, id: Uuid, patch: &UserPatch) -> Result<User, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // An empty patch has nothing to persist; report the current row,
        // failing when the user does not exist.
        if patch.is_empty() {
            let row: Option<UserRow> = users::table
                .find(id)
                .select(UserRow::as_select())
                .first(&mut conn)
                .await
                .optional()
                .map_err(map_diesel_error)?;
            return row
                .map(row_to_user)
                .transpose()?
                .ok_or(UserRepositoryError::missing(id));
        }

        let changeset = UserChangeset {
            username: patch.username.as_ref().map(|value| value.as_ref()),
            email: patch.email.as_ref().map(|value| value.as_ref()),
            description: patch.description.as_deref(),
            updated_at: Utc::now(),
        };

        let updated: Option<UserRow> = diesel::update(users::table.find(id))
            .set(&changeset)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        updated
            .map(row_to_user)
            .transpose()?
            .ok_or(UserRepositoryError::missing(id))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(affected > 0)
    }

    async fn count(&self) -> Result<u64, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(u64::try_from(total).unwrap_or(0))
    }
}
