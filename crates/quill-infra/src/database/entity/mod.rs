//! SeaORM entities.

pub mod entry;
pub mod user;
