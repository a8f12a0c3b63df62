//! # Atelier Core
//!
//! Domain types shared by the storage backend, the web server and the CLI.
//!
//! - [`Artwork`]: a catalogued work as owned by the persistence layer
//! - [`ArtworkStore`]: read/write seam implemented by storage backends
//! - [`LocationCatalog`]: read-only exhibition location metadata

pub mod artwork;
pub mod location;
pub mod storage;

pub use artwork::{Artwork, ArtworkStatus};
pub use location::{LocationCatalog, LocationEntry};
pub use storage::{ArtworkStore, StorageError, StorageResult};
