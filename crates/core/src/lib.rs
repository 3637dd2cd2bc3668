//! Core types and shared functionality for afflink.
//!
//! This crate provides:
//! - The affiliate link conversion pipeline
//! - Generation-scoped shell cache storage (SQLite and in-memory)
//! - Unified error types
//! - Configuration structures

pub mod cache;
pub mod config;
pub mod error;
pub mod link;

pub use cache::{CacheDb, CacheStorage, CachedEntry, MemoryStorage};
pub use config::{AppConfig, ConfigError};
pub use error::Error;
pub use link::{LinkConverter, Marketplace, convert};
