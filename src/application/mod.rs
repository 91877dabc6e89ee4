//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! - [`services::redirect_service::RedirectService`] - Create, list and resolve redirects

pub mod services;
