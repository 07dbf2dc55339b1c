//! Product entity - Represents items in the instrument storefront catalog.
//!
//! Each product carries a price, an inventory count, and a category label used
//! for grouping in the shop listing. Stock is never negative; a product with
//! stock 0 stays visible but cannot be carted.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the product (e.g., "Classical Guitar")
    pub name: String,
    /// Optional longer description shown on the product card
    pub description: Option<String>,
    /// Unit price in the store currency
    pub price: f64,
    /// Optional public URL of the product image
    pub image_url: Option<String>,
    /// Category label used for grouping (e.g., "Guitar", "Microphone")
    pub category: String,
    /// Units currently in inventory, floored at 0
    pub stock: i32,
    /// When the product was added to the catalog
    pub created_at: DateTime,
}

/// Products have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
