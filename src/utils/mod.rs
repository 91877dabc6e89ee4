//! Utility functions shared across layers.
//!
//! - [`fragment`] - Counter-to-fragment encoding (base 62, fixed minimum width)

pub mod fragment;
