//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every repository is scoped to a single owner.

pub mod entry;
pub mod reference;

pub use entry::{EntryError, EntryRepository};
pub use reference::{ReferenceError, ReferenceRepository};
