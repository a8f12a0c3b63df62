//! SQLite storage backend for Atelier
//!
//! Implements [`atelier_core::ArtworkStore`] on top of a single SQLite
//! connection shared behind a mutex.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atelier_sqlite::{SqliteArtworkStore, SqliteConfig, SqlitePool};
//! use atelier_core::ArtworkStore;
//!
//! let pool = SqlitePool::new(SqliteConfig::new("./atelier.db"))?;
//! let store = SqliteArtworkStore::new(pool);
//!
//! let artwork = store.find_artwork_by_id(42).await?;
//! ```

pub mod artwork_store;
pub mod config;
pub mod connection;
pub mod error;
pub mod schema;

// Re-exports
pub use artwork_store::SqliteArtworkStore;
pub use config::SqliteConfig;
pub use connection::SqlitePool;
pub use error::{SqliteError, SqliteResult};
