pub mod csv_store;
pub mod generator;
pub mod market_data;
