//! # Redirector
//!
//! A small URL redirector built with Axum and Redis. It accepts a long URL,
//! mints a short fragment from a shared store counter, persists the mapping and
//! answers `GET /{fragment}` with a redirect while counting visits.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities and the repository trait
//! - **Application Layer** ([`application`]) - The redirect service (create, list, resolve)
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis and in-memory repositories
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//! - [`utils::fragment`] - Counter-to-fragment encoding
//!
//! ## Quick Start
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! export PUBLIC_URL="http://localhost:8080"
//!
//! cargo run
//!
//! curl -X POST localhost:8080/ -d '{"url":"https://example.com","expiresIn":3600}' \
//!      -H 'Content-Type: application/json'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;
