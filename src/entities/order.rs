//! Order entity - Persisted customer requests.
//!
//! An order is either a store checkout (`type = "normal_order"`) or an
//! out-of-catalog supply request (`type = "custom_request"`). The `items`
//! column holds a JSON payload whose shape is determined by the `type` column;
//! [`crate::core::order::OrderItems`] is the typed view over it. `address` is
//! required for store checkouts and always null for custom requests.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name the customer submitted with the order
    pub customer_name: String,
    /// Contact phone number
    pub phone: String,
    /// Delivery address; `Some` for store checkouts, `None` for custom requests
    pub address: Option<String>,
    /// Item payload, shaped per the `type` column
    pub items: Json,
    /// One of `"pending_approval"`, `"approved_waiting"`, `"delivered"`, `"rejected"`
    pub status: String,
    /// One of `"normal_order"`, `"custom_request"`
    #[sea_orm(column_name = "type")]
    pub kind: String,
    /// When the order was submitted
    pub created_at: DateTimeUtc,
}

/// Orders have no relationships with other entities; item lines snapshot
/// product data instead of referencing product rows
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
