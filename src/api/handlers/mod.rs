//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one endpoint.

pub mod create;
pub mod health;
pub mod list;
pub mod redirect;

pub use create::create_handler;
pub use health::health_handler;
pub use list::list_handler;
pub use redirect::redirect_handler;
