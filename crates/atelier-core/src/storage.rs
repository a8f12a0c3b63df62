//! Storage traits
//!
//! Backends implement [`ArtworkStore`]; the web layer only depends on the trait.

use crate::artwork::Artwork;
use async_trait::async_trait;
use thiserror::Error;

/// Storage error type
#[derive(Error, Debug)]
pub enum StorageError {
    /// Backend failure (connection, query, pool)
    #[error("Storage backend error: {0}")]
    Backend(String),

    /// Row could not be mapped to a domain type
    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Artwork persistence
#[async_trait]
pub trait ArtworkStore: Send + Sync {
    /// Look up a single artwork; `Ok(None)` when no row has this id
    async fn find_artwork_by_id(&self, id: i64) -> StorageResult<Option<Artwork>>;

    /// All artworks visible to visitors, newest first
    async fn list_public_artworks(&self) -> StorageResult<Vec<Artwork>>;

    /// Insert or replace an artwork by id
    async fn upsert_artwork(&self, artwork: Artwork) -> StorageResult<i64>;

    async fn count_artworks(&self) -> StorageResult<u64>;

    /// Cheap liveness check for readiness probes
    async fn ping(&self) -> StorageResult<()>;
}
