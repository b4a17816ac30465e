//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL stores via SeaORM
//!
//! Without `postgres` (`--no-default-features`) only the in-memory stores are built.

pub mod auth;
pub mod database;
pub mod memory;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use memory::{InMemoryEntryRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{PostgresEntryRepository, PostgresUserRepository};
