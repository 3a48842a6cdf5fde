//! PostgreSQL persistence adapters using Diesel.
//!
//! This module provides the concrete implementation of the domain's user
//! repository port, backed by PostgreSQL via Diesel with async support
//! through `diesel-async` and `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain types. No business logic resides here.
//! - **Internal models**: row structs (`models.rs`) and schema definitions
//!   (`schema.rs`) are implementation details, never exposed to the domain.
//! - **Request-scoped connections**: each operation checks out one pooled
//!   connection and returns it when the guard drops, success or failure.
//! - **Strongly typed errors**: database failures are mapped to the domain's
//!   persistence error type; the unique-constraint mapping is what turns a
//!   duplicate username or email into a conflict rather than a 500.

mod diesel_user_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
