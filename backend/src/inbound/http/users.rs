//! Users API handlers.
//!
//! ```text
//! GET    /users/{id}   fetch one user
//! GET    /users        list users (count/page window, optional filters)
//! POST   /users        create a user
//! PUT    /users/{id}   partially update a user
//! DELETE /users/{id}   delete a user (idempotent)
//! ```
//!
//! Input validation happens here, before the service seam is invoked;
//! invalid input never reaches the storage layer.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::domain::ports::UserRepositoryError;
use crate::domain::user::DEFAULT_PAGE_COUNT;
use crate::domain::{
    EmailAddress, Error, NewUser, Page, User, UserFilter, UserPatch, UserValidationError, Username,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Create request body for `POST /users`.
///
/// Fields are optional at the serde level so that absent required fields are
/// reported as validation failures (422) rather than deserialisation errors.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct CreateUserRequest {
    /// Requested unique username.
    pub username: Option<String>,
    /// Requested unique email address.
    pub email: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let username = value
            .username
            .ok_or_else(|| UserValidationError::MissingField { field: "username" })?;
        let email = value
            .email
            .ok_or_else(|| UserValidationError::MissingField { field: "email" })?;
        let description = value
            .description
            .ok_or_else(|| UserValidationError::MissingField { field: "description" })?;

        Ok(Self::new(
            Username::new(username)?,
            EmailAddress::new(email)?,
            description,
        ))
    }
}

/// Update request body for `PUT /users/{id}`.
///
/// All fields optional; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct UpdateUserRequest {
    /// Replacement username, when supplied.
    pub username: Option<String>,
    /// Replacement email address, when supplied.
    pub email: Option<String>,
    /// Replacement description, when supplied.
    pub description: Option<String>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = UserValidationError;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            username: value.username.map(Username::new).transpose()?,
            email: value.email.map(EmailAddress::new).transpose()?,
            description: value.description,
        })
    }
}

/// Single-user response body.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// Stable generated identifier.
    pub id: Uuid,
    /// Unique username.
    pub username: String,
    /// Unique email address.
    pub email: String,
    /// Free-form description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last-mutation timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            description: user.description().to_owned(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// List response envelope.
///
/// `total` is the unfiltered user count and is independent of the returned
/// page; callers must not assume `total == users.len()`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    /// Total number of users, unfiltered.
    pub total: u64,
    /// The requested page of users.
    pub users: Vec<UserResponse>,
}

const fn default_count() -> u32 {
    DEFAULT_PAGE_COUNT
}

const fn default_page() -> u32 {
    1
}

/// Query parameters for `GET /users`.
///
/// Filterable fields are an enumerated set; unknown keys are rejected with
/// 400 rather than silently ignored.
#[derive(Debug, Clone, Deserialize, IntoParams)]
#[serde(deny_unknown_fields)]
pub struct ListUsersQuery {
    /// Page size (default 100).
    #[serde(default = "default_count")]
    pub count: u32,
    /// 1-indexed page number (default 1).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Exact-match filter on username.
    #[serde(default)]
    pub username: Option<String>,
    /// Exact-match filter on email.
    #[serde(default)]
    pub email: Option<String>,
}

fn map_validation_error(err: UserValidationError) -> Error {
    Error::validation(err.to_string())
        .with_details(json!({ "field": err.field(), "code": err.code() }))
}

fn map_repository_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::Connection { message } => Error::service_unavailable(message),
        UserRepositoryError::Query { message } => Error::internal(message),
        UserRepositoryError::Duplicate { field } => {
            Error::conflict(format!("a user with this {field} already exists"))
                .with_details(json!({ "field": field }))
        }
        UserRepositoryError::Missing { id } => {
            Error::not_found(format!("user with id {id} not found"))
        }
    }
}

/// Fetch a single user by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 404, description = "User does not exist", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = path.into_inner();
    let user = state
        .users
        .get_by_id(id)
        .await
        .map_err(map_repository_error)?
        .ok_or_else(|| Error::not_found(format!("user with id {id} not found")))?;
    Ok(web::Json(UserResponse::from(user)))
}

/// List users with pagination and optional equality filters.
#[utoipa::path(
    get,
    path = "/users",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "Page of users", body = UserListResponse),
        (status = 400, description = "Malformed query string", body = Error),
        (status = 422, description = "Invalid pagination window", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<UserListResponse>> {
    let ListUsersQuery {
        count,
        page,
        username,
        email,
    } = query.into_inner();
    let window = Page::new(page, count).map_err(|err| Error::validation(err.to_string()))?;
    let filter = UserFilter { username, email };

    let users = state
        .users
        .list(window, &filter)
        .await
        .map_err(map_repository_error)?;
    let total = state.users.count().await.map_err(map_repository_error)?;

    Ok(web::Json(UserListResponse {
        total,
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// Create a user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 409, description = "Duplicate username or email", body = Error),
        (status = 422, description = "Input failed validation", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = NewUser::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let user = state
        .users
        .create(&new_user)
        .await
        .map_err(map_repository_error)?;
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Partially update a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User does not exist", body = Error),
        (status = 409, description = "Duplicate username or email", body = Error),
        (status = 422, description = "Input failed validation", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserResponse>> {
    let patch = UserPatch::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let user = state
        .users
        .update(path.into_inner(), &patch)
        .await
        .map_err(map_repository_error)?;
    Ok(web::Json(UserResponse::from(user)))
}

/// Delete a user.
///
/// Deletion is idempotent: an absent id completes with 204 as well.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 204, description = "User deleted, or did not exist")
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let id = path.into_inner();
    let removed = state
        .users
        .delete(id)
        .await
        .map_err(map_repository_error)?;
    if !removed {
        debug!(%id, "delete of absent user treated as no-op");
    }
    Ok(HttpResponse::NoContent().finish())
}
