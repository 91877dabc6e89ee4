//! DTOs for redirect creation and listing.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::RedirectEntry;

/// Request to create a redirect.
///
/// ```json
/// { "url": "https://example.com", "expiresIn": 3600 }
/// ```
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRedirectRequest {
    /// Destination URL. Stored verbatim; only emptiness is rejected.
    #[validate(length(min = 1, message = "URL must not be empty"))]
    pub url: String,

    /// Advisory expiry in seconds. Echoed back, never enforced.
    #[serde(default)]
    pub expires_in: i64,
}

/// A redirect as returned by create and list.
///
/// ```json
/// {
///   "fragment": "000000001",
///   "url": "http://localhost:8080/000000001",
///   "original": "https://example.com",
///   "expiresIn": 3600
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RedirectEntryResponse {
    pub fragment: String,
    pub url: String,
    pub original: String,
    pub expires_in: i64,
}

impl From<RedirectEntry> for RedirectEntryResponse {
    fn from(entry: RedirectEntry) -> Self {
        Self {
            fragment: entry.fragment,
            url: entry.url,
            original: entry.original_url,
            expires_in: entry.expires_in,
        }
    }
}
