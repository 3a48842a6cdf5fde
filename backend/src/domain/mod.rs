//! Domain primitives, aggregates, and ports.
//!
//! Purpose: define strongly typed domain entities used by the API and
//! persistence layers. Keep types immutable and document invariants and
//! serialisation contracts in each type's Rustdoc.
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`] — transport-agnostic error payload.
//! - [`User`] and its validated value types — the aggregate root.
//! - `catalog` — modeled-only entities owned by the user aggregate.
//! - `ports` — trait seams implemented by outbound adapters.

pub mod catalog;
pub mod error;
pub mod ports;
pub mod user;
mod user_service;

pub use self::error::{Error, ErrorCode};
pub use self::user::{
    EmailAddress, NewUser, Page, PageValidationError, User, UserFilter, UserPatch,
    UserValidationError, Username,
};
pub use self::user_service::DirectUserService;
