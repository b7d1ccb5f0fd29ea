pub mod charts;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod loader;
pub mod output;
pub mod schema;
pub mod table;
pub mod transforms;
