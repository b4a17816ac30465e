//! In-memory stores - used when no database is configured, and in tests.
//! Data is lost on process restart.

mod entries;
mod users;

pub use entries::InMemoryEntryRepository;
pub use users::InMemoryUserRepository;
