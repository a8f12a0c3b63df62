mod artworks;
mod health;
mod locations;

pub use artworks::artwork_routes;
pub use health::health_routes;
pub use locations::location_routes;
