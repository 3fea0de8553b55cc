// Engine library root: dataset provider, range filter, chart rendering and the web layer.

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod services;
