//! Shared test utilities for the store backend.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        product,
        session::{AdminGate, AdminSession},
        team,
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Shared secret used by the test admin gate.
pub const TEST_ADMIN_PASSWORD: &str = "test-admin-secret";

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a gate configured with [`TEST_ADMIN_PASSWORD`].
pub fn test_gate() -> AdminGate {
    AdminGate::new(TEST_ADMIN_PASSWORD)
}

/// Logs in against the test gate and returns the issued session.
pub fn test_admin_session() -> Result<AdminSession> {
    test_gate().verify_password(TEST_ADMIN_PASSWORD)
}

/// Builds an unpersisted product model for cart tests.
///
/// Cart lines hold snapshots, so these never need to touch a database.
pub fn snapshot_product(id: i64, name: &str, price: f64, stock: i32) -> entities::product::Model {
    entities::product::Model {
        id,
        name: name.to_string(),
        description: None,
        price,
        image_url: None,
        category: "Test".to_string(),
        stock,
        created_at: chrono::Utc::now().naive_utc(),
    }
}

/// Creates a persisted test product with the given name, price, and stock.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    price: f64,
    stock: i32,
) -> Result<entities::product::Model> {
    let session = test_admin_session()?;
    product::create_product(
        db,
        Some(&session),
        name.to_string(),
        None,
        price,
        "Test".to_string(),
        stock,
        None,
    )
    .await
}

/// Creates a persisted test team category with the given name.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::team_category::Model> {
    let session = test_admin_session()?;
    team::create_team_category(db, Some(&session), name, None).await
}

/// Sets up a complete test environment with one product in stock.
/// Returns (db, product) for checkout-related tests.
pub async fn setup_with_product() -> Result<(DatabaseConnection, entities::product::Model)> {
    let db = setup_test_db().await?;
    let product = create_test_product(&db, "Test Product", 10.0, 5).await?;
    Ok((db, product))
}
