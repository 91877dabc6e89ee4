//! Redirect entities.

/// `expires_in` value reported for entries read back from the store.
///
/// Expiry is never persisted per entry, so listings cannot know it.
pub const UNKNOWN_EXPIRY: i64 = -1;

/// A fragment-to-URL mapping as it exists in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRedirect {
    pub fragment: String,
    pub original_url: String,
}

impl StoredRedirect {
    pub fn new(fragment: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
            original_url: original_url.into(),
        }
    }
}

/// A redirect as returned to callers of the service.
///
/// Reconstructed from the store rather than stored as one record: the public
/// `url` is derived from the configured base URI, and `expires_in` is only
/// known at creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectEntry {
    pub fragment: String,
    /// Public short URL (`base_uri/fragment`).
    pub url: String,
    pub original_url: String,
    /// Advisory only. Echoed back on create, [`UNKNOWN_EXPIRY`] on listing.
    pub expires_in: i64,
}

impl RedirectEntry {
    pub fn new(fragment: String, url: String, original_url: String, expires_in: i64) -> Self {
        Self {
            fragment,
            url,
            original_url,
            expires_in,
        }
    }
}
