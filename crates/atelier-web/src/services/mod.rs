pub mod site;

pub use site::{init_state, location_catalog, AppState};
