//! Product business logic - catalog reads, privileged writes, and stock
//! bookkeeping.
//!
//! Reads are public: the storefront lists products without any session.
//! Writes (create, stock update, delete) require an active admin session and
//! re-check it on every call. Stock never goes below zero; decrements floor at
//! zero rather than failing, matching the clamp-and-decrement checkout model.

use crate::{
    config::catalog::CatalogConfig,
    core::session::{AdminSession, require_admin},
    entities::{Product, product},
    errors::{Error, Result},
};
use sea_orm::{ConnectionTrait, QueryOrder, Set, prelude::*};
use tracing::debug;

/// Category assigned when a product is created with a blank category label.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Retrieves all products, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_desc(product::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific product by its unique ID, returning None if absent.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new catalog product. Privileged.
///
/// The name is trimmed and required; a blank category falls back to
/// [`DEFAULT_CATEGORY`]; negative stock is floored at zero. The image URL is
/// stored as-is (uploads happen outside this crate).
///
/// # Errors
/// Returns an error if:
/// - The caller has no active admin session
/// - The product name is empty or whitespace-only
/// - The price is negative or not finite (NaN, infinity)
/// - The database insert operation fails
#[allow(clippy::too_many_arguments)]
pub async fn create_product(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    name: String,
    description: Option<String>,
    price: f64,
    category: String,
    stock: i32,
    image_url: Option<String>,
) -> Result<product::Model> {
    require_admin(session)?;

    if name.trim().is_empty() {
        return Err(Error::Validation {
            message: "Product name is required".to_string(),
        });
    }

    if price < 0.0 || !price.is_finite() {
        return Err(Error::InvalidPrice { price });
    }

    let category = match category.trim() {
        "" => DEFAULT_CATEGORY.to_string(),
        trimmed => trimmed.to_string(),
    };
    let description = description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty());

    let product = product::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        price: Set(price),
        image_url: Set(image_url),
        category: Set(category),
        stock: Set(stock.max(0)),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    product.insert(db).await.map_err(Into::into)
}

/// Replaces a product's stock count. Privileged. Values below zero are
/// floored at zero.
///
/// # Errors
/// Returns an error if:
/// - The caller has no active admin session
/// - The product does not exist
/// - The database update operation fails
pub async fn update_product_stock(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    product_id: i64,
    stock: i32,
) -> Result<product::Model> {
    require_admin(session)?;

    let mut product: product::ActiveModel = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?
        .into();

    product.stock = Set(stock.max(0));
    product.update(db).await.map_err(Into::into)
}

/// Decreases a product's stock by `quantity`, floored at zero.
///
/// Not privileged: checkout calls this for each order line after persisting
/// the order, inside the same database transaction, so it is generic over the
/// connection type.
///
/// # Errors
/// Returns an error if the product does not exist or the update fails.
pub async fn decrease_stock<C>(db: &C, product_id: i64, quantity: i32) -> Result<product::Model>
where
    C: ConnectionTrait,
{
    let current = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or(Error::ProductNotFound { id: product_id })?;

    let new_stock = (current.stock - quantity).max(0);
    let mut product: product::ActiveModel = current.into();
    product.stock = Set(new_stock);
    product.update(db).await.map_err(Into::into)
}

/// Permanently removes a product from the catalog. Privileged.
///
/// Orders that reference the product keep their snapshot lines; only the
/// catalog row goes away.
///
/// # Errors
/// Returns an error if:
/// - The caller has no active admin session
/// - The product does not exist
/// - The database delete operation fails
pub async fn delete_product(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    product_id: i64,
) -> Result<()> {
    require_admin(session)?;

    let result = Product::delete_by_id(product_id).exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::ProductNotFound { id: product_id });
    }
    Ok(())
}

/// Seeds the catalog from configuration, skipping products whose name is
/// already present. Returns the number of rows inserted.
///
/// # Errors
/// Returns an error if a database query or insert fails.
pub async fn seed_products(db: &DatabaseConnection, config: &CatalogConfig) -> Result<usize> {
    let mut inserted = 0;
    for entry in &config.products {
        let exists = Product::find()
            .filter(product::Column::Name.eq(entry.name.as_str()))
            .one(db)
            .await?
            .is_some();
        if exists {
            debug!("Product '{}' already seeded, skipping.", entry.name);
            continue;
        }

        let product = product::ActiveModel {
            name: Set(entry.name.clone()),
            description: Set(entry.description.clone()),
            price: Set(entry.price),
            image_url: Set(entry.image_url.clone()),
            category: Set(entry.category.clone()),
            stock: Set(entry.stock.max(0)),
            created_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        };
        product.insert(db).await?;
        inserted += 1;
    }
    Ok(inserted)
}
