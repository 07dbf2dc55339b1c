/// Database connection and schema creation
pub mod database;

/// Seed catalog loading from config.toml
pub mod catalog;
