// HTTP request surface of the engine.
pub mod web_service;

pub use web_service::{build_router, AppState};
