pub mod preview;
pub mod routes;
pub mod server;
pub mod services;

mod assets;
mod error;

pub use error::{Result, WebError};
pub use server::{build_router, start_server};
pub use services::AppState;
