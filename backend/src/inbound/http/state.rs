//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::UserService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// User service seam backing the `/users` resource.
    pub users: Arc<dyn UserService>,
}

impl HttpState {
    /// Bundle the given user service for handler injection.
    pub fn new(users: Arc<dyn UserService>) -> Self {
        Self { users }
    }
}
