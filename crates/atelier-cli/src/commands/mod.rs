pub mod artworks;
pub mod config;
pub mod preview;
pub mod serve;
