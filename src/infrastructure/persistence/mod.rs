//! Redirect repository implementations.
//!
//! - [`RedisRedirectRepository`] - Production Redis-backed store
//! - [`MemoryRedirectRepository`] - In-process store for development and tests

pub mod memory_redirect_repository;
pub mod redis_redirect_repository;

pub use memory_redirect_repository::MemoryRedirectRepository;
pub use redis_redirect_repository::RedisRedirectRepository;
