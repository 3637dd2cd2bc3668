//! Generation-scoped storage for the offline application shell.
//!
//! Entries are grouped into named generations, one per build. Two
//! backends implement [`CacheStorage`]:
//!
//! - [`CacheDb`]: SQLite via tokio-rusqlite, WAL mode, cascade deletes
//! - [`MemoryStorage`]: in-process map with the same semantics

pub mod connection;
pub mod generations;
pub mod hash;
pub mod memory;
pub mod migrations;
pub mod storage;

pub use crate::Error;

pub use connection::CacheDb;
pub use memory::MemoryStorage;
pub use storage::{CacheStorage, CachedEntry};
