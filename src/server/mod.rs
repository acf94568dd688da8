//! HTTP server: shared state and the route surface

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
