//! Core domain entities.
//!
//! - [`RedirectEntry`] - A redirect as exposed to callers
//! - [`StoredRedirect`] - A fragment-to-URL mapping as held by the store

pub mod redirect;

pub use redirect::{RedirectEntry, StoredRedirect, UNKNOWN_EXPIRY};
