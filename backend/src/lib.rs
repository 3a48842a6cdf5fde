//! User directory service library.
//!
//! Three layers composed top-down per request: the HTTP adapter
//! (`inbound::http`) parses and validates requests, the service seam
//! (`domain::ports::UserService`) forwards calls, and the Diesel repository
//! (`outbound::persistence`) owns every persistence decision.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
