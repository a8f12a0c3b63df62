//! # Atelier Configuration
//!
//! Typed configuration for the Atelier server, loaded from TOML with
//! precedence `defaults < file < environment < CLI flags`.
//!
//! ```rust,no_run
//! use atelier_config::ConfigLoader;
//!
//! let config = ConfigLoader::load(None).expect("config");
//! println!("serving {} on port {}", config.site.name, config.web.port);
//! ```

#![warn(clippy::all)]

pub mod components;
mod config;
mod loader;

pub use components::*;
pub use config::*;
pub use loader::*;
