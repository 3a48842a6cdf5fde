//! User aggregate: entity, validated value types, and query primitives.
//!
//! Purpose: keep every input that reaches the persistence layer already
//! validated. Transport adapters convert raw strings into [`Username`] and
//! [`EmailAddress`] values; repositories only ever see well-formed data.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum accepted username length in characters.
pub const USERNAME_MAX: usize = 64;
/// Maximum accepted email length in characters (RFC 5321 octet limit).
pub const EMAIL_MAX: usize = 254;
/// Default page size for user listings.
pub const DEFAULT_PAGE_COUNT: u32 = 100;

/// Validation errors raised when constructing user value types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// A required field was absent from the input.
    MissingField {
        /// Name of the absent field.
        field: &'static str,
    },
    /// Username was empty or whitespace-only.
    EmptyUsername,
    /// Username exceeded [`USERNAME_MAX`] characters.
    UsernameTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Email was empty or whitespace-only.
    EmptyEmail,
    /// Email exceeded [`EMAIL_MAX`] characters.
    EmailTooLong {
        /// Maximum permitted length.
        max: usize,
    },
    /// Email did not match the accepted syntax.
    InvalidEmail,
}

impl UserValidationError {
    /// Name of the field the error refers to, for structured error details.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::EmptyUsername | Self::UsernameTooLong { .. } => "username",
            Self::EmptyEmail | Self::EmailTooLong { .. } | Self::InvalidEmail => "email",
        }
    }

    /// Stable short code for structured error details.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::EmptyUsername => "empty_username",
            Self::UsernameTooLong { .. } => "username_too_long",
            Self::EmptyEmail => "empty_email",
            Self::EmailTooLong { .. } => "email_too_long",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField { field } => write!(f, "{field} is required"),
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
            Self::EmptyEmail => write!(f, "email must not be empty"),
            Self::EmailTooLong { max } => write!(f, "email must be at most {max} characters"),
            Self::InvalidEmail => write!(f, "email must be a valid email address"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Unique username chosen by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        if username.chars().count() > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Syntactic check only: one "@", no whitespace, dotted domain.
        let pattern = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactically valid, unique email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        if email.trim().is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if email.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }
        if !email_regex().is_match(&email) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(email))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Persisted application user.
///
/// ## Invariants
/// - `username` and `email` are unique across all users; the repository
///   enforces this and surfaces violations as duplicate errors.
/// - `created_at == updated_at` immediately after creation; every mutation
///   refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    id: Uuid,
    username: Username,
    email: EmailAddress,
    description: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Assemble a [`User`] from validated components.
    pub const fn new(
        id: Uuid,
        username: Username,
        email: EmailAddress,
        description: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            username,
            email,
            description,
            created_at,
            updated_at,
        }
    }

    /// Stable generated identifier.
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Unique username.
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Unique email address.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Free-form description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    /// Creation timestamp.
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Last-mutation timestamp.
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Apply a partial update, leaving unset fields untouched and refreshing
    /// `updated_at`.
    pub fn apply(&mut self, patch: &UserPatch, updated_at: DateTime<Utc>) {
        if let Some(username) = &patch.username {
            self.username = username.clone();
        }
        if let Some(email) = &patch.email {
            self.email = email.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        self.updated_at = updated_at;
    }
}

/// Validated input for creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    username: Username,
    email: EmailAddress,
    description: String,
}

impl NewUser {
    /// Bundle validated components for a create operation.
    pub const fn new(username: Username, email: EmailAddress, description: String) -> Self {
        Self {
            username,
            email,
            description,
        }
    }

    /// Requested username.
    pub const fn username(&self) -> &Username {
        &self.username
    }

    /// Requested email address.
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Requested description.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Partial update for a user. Unset fields are left untouched, never
/// overwritten with defaults.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserPatch {
    /// Replacement username, when supplied.
    pub username: Option<Username>,
    /// Replacement email address, when supplied.
    pub email: Option<EmailAddress>,
    /// Replacement description, when supplied.
    pub description: Option<String>,
}

impl UserPatch {
    /// True when the patch carries no changes at all.
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.description.is_none()
    }
}

/// Enumerated equality filters for user listings.
///
/// Filterable fields are an explicit closed set; unknown filter keys are
/// rejected by the transport layer rather than silently ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserFilter {
    /// Exact-match filter on username.
    pub username: Option<String>,
    /// Exact-match filter on email.
    pub email: Option<String>,
}

impl UserFilter {
    /// True when no filter criteria were supplied.
    pub const fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

/// Validation errors raised when constructing a [`Page`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageValidationError {
    /// Pages are 1-indexed; zero is not a page.
    ZeroPage,
    /// A page must hold at least one row.
    ZeroCount,
}

impl fmt::Display for PageValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroPage => write!(f, "page must be at least 1"),
            Self::ZeroCount => write!(f, "count must be at least 1"),
        }
    }
}

impl std::error::Error for PageValidationError {}

/// 1-indexed pagination window.
///
/// The storage offset is `(page − 1) × count`; a listing returns at most
/// `count` rows starting there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    page: u32,
    count: u32,
}

impl Page {
    /// Validate and construct a pagination window.
    pub const fn new(page: u32, count: u32) -> Result<Self, PageValidationError> {
        if page == 0 {
            return Err(PageValidationError::ZeroPage);
        }
        if count == 0 {
            return Err(PageValidationError::ZeroCount);
        }
        Ok(Self { page, count })
    }

    /// 1-indexed page number.
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Maximum rows returned for this window.
    pub const fn count(&self) -> u32 {
        self.count
    }

    /// Rows to skip before this window starts.
    ///
    /// Saturates at `i64::MAX`: an extreme window reads as a page past the
    /// end of the data, never as a negative offset.
    pub const fn offset(&self) -> i64 {
        match ((self.page - 1) as i64).checked_mul(self.count as i64) {
            Some(offset) => offset,
            None => i64::MAX,
        }
    }

    /// Row cap as a storage-friendly limit.
    pub const fn limit(&self) -> i64 {
        self.count as i64
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            page: 1,
            count: DEFAULT_PAGE_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("john_doe")]
    #[case("Ada Lovelace")]
    fn username_accepts_reasonable_values(#[case] input: &str) {
        let username = Username::new(input).expect("valid username");
        assert_eq!(username.as_ref(), input);
    }

    #[rstest]
    #[case("", UserValidationError::EmptyUsername)]
    #[case("   ", UserValidationError::EmptyUsername)]
    fn username_rejects_blank_values(#[case] input: &str, #[case] expected: UserValidationError) {
        assert_eq!(Username::new(input), Err(expected));
    }

    #[rstest]
    fn username_rejects_overlong_values() {
        let input = "x".repeat(USERNAME_MAX + 1);
        assert_eq!(
            Username::new(input),
            Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX })
        );
    }

    #[rstest]
    #[case("test@example.com")]
    #[case("a.b+c@sub.domain.org")]
    fn email_accepts_valid_syntax(#[case] input: &str) {
        let email = EmailAddress::new(input).expect("valid email");
        assert_eq!(email.as_ref(), input);
    }

    #[rstest]
    #[case("not-an-email", UserValidationError::InvalidEmail)]
    #[case("missing@tld", UserValidationError::InvalidEmail)]
    #[case("two@@example.com", UserValidationError::InvalidEmail)]
    #[case("spaces in@example.com", UserValidationError::InvalidEmail)]
    #[case("", UserValidationError::EmptyEmail)]
    fn email_rejects_invalid_syntax(#[case] input: &str, #[case] expected: UserValidationError) {
        assert_eq!(EmailAddress::new(input), Err(expected));
    }

    #[rstest]
    #[case(1, 100, 0)]
    #[case(2, 100, 100)]
    #[case(3, 25, 50)]
    #[case(10, 1, 9)]
    fn page_offset_follows_pagination_arithmetic(
        #[case] page: u32,
        #[case] count: u32,
        #[case] expected_offset: i64,
    ) {
        let window = Page::new(page, count).expect("valid page");
        assert_eq!(window.offset(), expected_offset);
        assert_eq!(window.limit(), i64::from(count));
    }

    #[rstest]
    fn extreme_windows_saturate_instead_of_overflowing() {
        let window = Page::new(u32::MAX, u32::MAX).expect("valid page");
        assert_eq!(window.offset(), i64::MAX);
        assert_eq!(window.limit(), i64::from(u32::MAX));
    }

    #[rstest]
    #[case(0, 10, PageValidationError::ZeroPage)]
    #[case(1, 0, PageValidationError::ZeroCount)]
    fn page_rejects_zero_values(
        #[case] page: u32,
        #[case] count: u32,
        #[case] expected: PageValidationError,
    ) {
        assert_eq!(Page::new(page, count), Err(expected));
    }

    #[rstest]
    fn default_page_covers_first_hundred_rows() {
        let window = Page::default();
        assert_eq!(window.page(), 1);
        assert_eq!(window.count(), DEFAULT_PAGE_COUNT);
        assert_eq!(window.offset(), 0);
    }

    #[rstest]
    fn patch_apply_changes_only_supplied_fields() {
        let created = Utc::now();
        let mut user = User::new(
            Uuid::new_v4(),
            Username::new("john_doe").expect("username"),
            EmailAddress::new("test@example.com").expect("email"),
            "Test user".to_owned(),
            created,
            created,
        );

        let later = created + chrono::Duration::seconds(5);
        let patch = UserPatch {
            description: Some("Updated description".to_owned()),
            ..UserPatch::default()
        };
        user.apply(&patch, later);

        assert_eq!(user.description(), "Updated description");
        assert_eq!(user.username().as_ref(), "john_doe");
        assert_eq!(user.email().as_ref(), "test@example.com");
        assert_eq!(user.created_at(), created);
        assert_eq!(user.updated_at(), later);
    }

    #[rstest]
    fn empty_patch_carries_no_changes() {
        assert!(UserPatch::default().is_empty());
        assert!(!UserPatch {
            username: Some(Username::new("someone").expect("username")),
            ..UserPatch::default()
        }
        .is_empty());
    }

    #[rstest]
    fn filter_reports_emptiness() {
        assert!(UserFilter::default().is_empty());
        assert!(!UserFilter {
            email: Some("test@example.com".to_owned()),
            ..UserFilter::default()
        }
        .is_empty());
    }
}
