//! Configuration sections, one file per `[table]` in `config.toml`.

pub mod preview;
pub mod site;
pub mod storage;
pub mod web;

pub use preview::*;
pub use site::*;
pub use storage::*;
pub use web::*;
