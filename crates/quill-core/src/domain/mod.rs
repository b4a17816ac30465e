//! Domain entities - the core business objects.

mod entry;
mod user;

pub use entry::{Entry, EntryDraft};
pub use user::{ADMIN_ROLE, User};
