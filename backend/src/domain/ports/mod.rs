//! Domain ports: trait seams implemented by outbound adapters.

mod user_repository;
mod user_service;

pub use user_repository::{UserRepository, UserRepositoryError};
pub use user_service::UserService;
