// Types shared between the engine library, its web layer and tests.
pub mod models;
pub mod utils;
