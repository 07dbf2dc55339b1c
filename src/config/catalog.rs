//! Seed catalog loading from config.toml
//!
//! This module provides functionality to load an initial product catalog from
//! a TOML configuration file. The products defined in config.toml are used to
//! seed the database on first run; products already present (by name) are left
//! alone.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct CatalogConfig {
    /// List of product configurations to seed
    pub products: Vec<ProductConfig>,
}

/// Configuration for a single seed product
#[derive(Debug, Deserialize, Clone)]
pub struct ProductConfig {
    /// Display name of the product
    pub name: String,
    /// Optional longer description
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price in the store currency
    pub price: f64,
    /// Category label used for grouping
    pub category: String,
    /// Initial inventory count
    pub stock: i32,
    /// Optional public URL of the product image
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Loads the seed catalog from a TOML file.
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<CatalogConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the seed catalog from the default location (./config.toml).
///
/// # Errors
/// Returns an error if the file is missing or unparsable.
pub fn load_default_config() -> Result<CatalogConfig> {
    load_config("config.toml")
}
