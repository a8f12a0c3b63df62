//! ArtworkStore implementation for SQLite

use crate::connection::SqlitePool;
use crate::error::{SqliteError, SqliteResult};
use async_trait::async_trait;
use atelier_core::{Artwork, ArtworkStatus, ArtworkStore, StorageResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use rusqlite::{params, OptionalExtension, Row};
use tracing::{debug, warn};

const ARTWORK_COLUMNS: &str =
    "id, title, description, image_url, status, year, medium, created_at, updated_at";

/// SQLite implementation of ArtworkStore
#[derive(Clone)]
pub struct SqliteArtworkStore {
    pool: SqlitePool,
}

impl SqliteArtworkStore {
    /// Create a new ArtworkStore with the given connection pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ArtworkStore for SqliteArtworkStore {
    async fn find_artwork_by_id(&self, id: i64) -> StorageResult<Option<Artwork>> {
        debug!(id, "Looking up artwork");
        self.pool
            .run(move |conn| {
                let raw = conn
                    .query_row(
                        &format!("SELECT {ARTWORK_COLUMNS} FROM artworks WHERE id = ?1"),
                        [id],
                        RawArtwork::from_row,
                    )
                    .optional()?;
                raw.map(RawArtwork::into_artwork).transpose()
            })
            .await
            .map_err(Into::into)
    }

    async fn list_public_artworks(&self) -> StorageResult<Vec<Artwork>> {
        self.pool
            .run(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT {ARTWORK_COLUMNS} FROM artworks
                     WHERE status != 'draft'
                     ORDER BY created_at DESC, id DESC"
                ))?;
                let rows = stmt.query_map([], RawArtwork::from_row)?;

                let mut artworks = Vec::new();
                for raw in rows {
                    artworks.push(raw?.into_artwork()?);
                }
                Ok(artworks)
            })
            .await
            .map_err(Into::into)
    }

    async fn upsert_artwork(&self, artwork: Artwork) -> StorageResult<i64> {
        self.pool
            .run(move |conn| {
                conn.execute(
                    r#"
                    INSERT INTO artworks (id, title, description, image_url, status, year, medium, created_at, updated_at)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                    ON CONFLICT(id) DO UPDATE SET
                        title = excluded.title,
                        description = excluded.description,
                        image_url = excluded.image_url,
                        status = excluded.status,
                        year = excluded.year,
                        medium = excluded.medium,
                        updated_at = excluded.updated_at
                    "#,
                    params![
                        artwork.id,
                        artwork.title,
                        artwork.description,
                        artwork.image_url,
                        artwork.status.as_str(),
                        artwork.year,
                        artwork.medium,
                        artwork.created_at.to_rfc3339(),
                        artwork.updated_at.to_rfc3339(),
                    ],
                )?;
                Ok(artwork.id)
            })
            .await
            .map_err(Into::into)
    }

    async fn count_artworks(&self) -> StorageResult<u64> {
        self.pool
            .run(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM artworks", [], |row| row.get(0))?;
                Ok(count as u64)
            })
            .await
            .map_err(Into::into)
    }

    async fn ping(&self) -> StorageResult<()> {
        self.pool
            .run(|conn| {
                conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?;
                Ok(())
            })
            .await
            .map_err(Into::into)
    }
}

/// Row as stored, before status/timestamp parsing
struct RawArtwork {
    id: i64,
    title: String,
    description: Option<String>,
    image_url: Option<String>,
    status: String,
    year: Option<i32>,
    medium: Option<String>,
    created_at: String,
    updated_at: String,
}

impl RawArtwork {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            image_url: row.get(3)?,
            status: row.get(4)?,
            year: row.get(5)?,
            medium: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn into_artwork(self) -> SqliteResult<Artwork> {
        let status: ArtworkStatus = self.status.parse().map_err(SqliteError::InvalidRow)?;

        Ok(Artwork {
            id: self.id,
            title: self.title,
            description: self.description.unwrap_or_default(),
            image_url: self.image_url,
            status,
            year: self.year,
            medium: self.medium,
            created_at: parse_timestamp(self.id, &self.created_at),
            updated_at: parse_timestamp(self.id, &self.updated_at),
        })
    }
}

/// SQLite `datetime()` style values have no `T` or offset and are read as UTC.
/// Unparsable values fall back to the epoch; timestamps never hide a row.
fn parse_timestamp(id: i64, value: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return naive.and_utc();
    }
    warn!(id, value, "Unparsable artwork timestamp");
    DateTime::<Utc>::default()
}
