//! SQLite storage adapter for the orion search core

mod index;

pub use index::SqliteIndex;
