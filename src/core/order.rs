//! Order business logic - checkout, custom supply requests, and the admin
//! order queue.
//!
//! Store checkouts serialize the shopper's cart into a snapshot payload and
//! persist it together with the per-line stock decrements in one database
//! transaction. Custom requests are free-form and never touch stock. Item
//! payloads are a tagged union selected by the order's `type` column, and
//! status changes go through a checked transition table.

use crate::{
    core::{
        cart::Cart,
        product,
        session::{AdminSession, require_admin},
    },
    entities::{Order, order},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use tracing::warn;

/// Lifecycle state of an order.
///
/// Allowed transitions: `PendingApproval` to `ApprovedWaiting` or `Rejected`,
/// and `ApprovedWaiting` to `Delivered`. `Delivered` and `Rejected` are
/// terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Submitted, waiting for an admin decision
    PendingApproval,
    /// Approved, waiting to be delivered
    ApprovedWaiting,
    /// Handed over to the customer; terminal
    Delivered,
    /// Turned down by an admin; terminal
    Rejected,
}

impl OrderStatus {
    /// Wire string stored in the `status` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::ApprovedWaiting => "approved_waiting",
            Self::Delivered => "delivered",
            Self::Rejected => "rejected",
        }
    }

    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::PendingApproval, Self::ApprovedWaiting)
                | (Self::PendingApproval, Self::Rejected)
                | (Self::ApprovedWaiting, Self::Delivered)
        )
    }

    /// True for states with no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Rejected)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "pending_approval" => Ok(Self::PendingApproval),
            "approved_waiting" => Ok(Self::ApprovedWaiting),
            "delivered" => Ok(Self::Delivered),
            "rejected" => Ok(Self::Rejected),
            other => Err(Error::UnknownOrderStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Which kind of request an order row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderKind {
    /// Cart checkout from the storefront
    NormalOrder,
    /// Out-of-catalog supply request
    CustomRequest,
}

impl OrderKind {
    /// Wire string stored in the `type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NormalOrder => "normal_order",
            Self::CustomRequest => "custom_request",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderKind {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "normal_order" => Ok(Self::NormalOrder),
            "custom_request" => Ok(Self::CustomRequest),
            other => Err(Error::UnknownOrderKind {
                value: other.to_string(),
            }),
        }
    }
}

/// One snapshot line of a store checkout: product data as it looked when the
/// cart was submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    /// Id of the product the line was created from
    pub product_id: i64,
    /// Product name at submission time
    pub name: String,
    /// Unit price at submission time
    pub price: f64,
    /// Units ordered
    pub quantity: i32,
}

/// Items payload of a store checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreOrderItems {
    /// Snapshot lines, in cart order
    pub products: Vec<OrderLine>,
    /// Cart total at submission time
    pub total_price: f64,
}

/// Items payload of a custom supply request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomRequestItems {
    /// Rough category the customer is asking about
    pub category: String,
    /// Free-form description of what they want sourced
    pub product_detail: String,
    /// Optional budget range text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
}

/// Typed view over an order's JSON `items` column.
///
/// The variant is selected by the order's `type` column, never inferred from
/// the payload shape.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderItems {
    /// `type = "normal_order"`
    Store(StoreOrderItems),
    /// `type = "custom_request"`
    Custom(CustomRequestItems),
}

/// Decodes an order row's items payload according to its `type` column.
///
/// # Errors
/// Returns an error when the type string is unknown or the payload does not
/// match the shape that type promises.
pub fn order_items(row: &order::Model) -> Result<OrderItems> {
    match row.kind.parse::<OrderKind>()? {
        OrderKind::NormalOrder => Ok(OrderItems::Store(serde_json::from_value(
            row.items.clone(),
        )?)),
        OrderKind::CustomRequest => Ok(OrderItems::Custom(serde_json::from_value(
            row.items.clone(),
        )?)),
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::Validation {
            message: format!("{field} is required"),
        });
    }
    Ok(trimmed.to_string())
}

/// Submits the shopper's cart as a store order.
///
/// The order row (status `pending_approval`, type `normal_order`) and the
/// per-line stock decrements are committed as one database transaction, so a
/// failure mid-way leaves no half-recorded checkout. Decrements floor at zero
/// and a cart line whose product row has since been deleted is skipped with a
/// warning; nothing blocks a checkout whose snapshot stock went stale.
///
/// # Errors
/// Returns an error if:
/// - Any of customer name, phone, or address is blank
/// - The cart is empty
/// - A database operation fails (the whole submission rolls back)
pub async fn submit_store_order(
    db: &DatabaseConnection,
    customer_name: &str,
    phone: &str,
    address: &str,
    cart: &Cart,
) -> Result<order::Model> {
    let customer_name = required(customer_name, "Customer name")?;
    let phone = required(phone, "Phone")?;
    let address = required(address, "Address")?;
    if cart.is_empty() {
        return Err(Error::Validation {
            message: "Cart is empty".to_string(),
        });
    }

    let items = cart.to_order_items();

    let txn = db.begin().await?;

    let row = order::ActiveModel {
        customer_name: Set(customer_name),
        phone: Set(phone),
        address: Set(Some(address)),
        items: Set(serde_json::to_value(&items)?),
        status: Set(OrderStatus::PendingApproval.as_str().to_string()),
        kind: Set(OrderKind::NormalOrder.as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for line in &items.products {
        match product::decrease_stock(&txn, line.product_id, line.quantity).await {
            Ok(_) => {}
            Err(Error::ProductNotFound { id }) => {
                warn!(
                    "Product {} in order {} no longer exists. Skipping stock decrement.",
                    id, row.id
                );
            }
            Err(e) => return Err(e),
        }
    }

    txn.commit().await?;
    Ok(row)
}

/// Persists an out-of-catalog supply request.
///
/// Stored with `address = None`, type `custom_request`, status
/// `pending_approval`. Never touches stock. A blank budget range is stored as
/// absent.
///
/// # Errors
/// Returns an error if any of customer name, phone, category, or product
/// detail is blank, or if the insert fails.
pub async fn submit_custom_request(
    db: &DatabaseConnection,
    customer_name: &str,
    phone: &str,
    category: &str,
    product_detail: &str,
    budget_range: Option<&str>,
) -> Result<order::Model> {
    let customer_name = required(customer_name, "Customer name")?;
    let phone = required(phone, "Phone")?;
    let items = CustomRequestItems {
        category: required(category, "Category")?,
        product_detail: required(product_detail, "Product detail")?,
        budget_range: budget_range
            .map(|b| b.trim().to_string())
            .filter(|b| !b.is_empty()),
    };

    order::ActiveModel {
        customer_name: Set(customer_name),
        phone: Set(phone),
        address: Set(None),
        items: Set(serde_json::to_value(&items)?),
        status: Set(OrderStatus::PendingApproval.as_str().to_string()),
        kind: Set(OrderKind::CustomRequest.as_str().to_string()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Retrieves all orders, newest first. Privileged.
///
/// # Errors
/// Returns an error if the caller has no active admin session or the query
/// fails.
pub async fn get_orders(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
) -> Result<Vec<order::Model>> {
    require_admin(session)?;

    Order::find()
        .order_by_desc(order::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific order by its unique ID, returning None if absent.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_order_by_id(
    db: &DatabaseConnection,
    order_id: i64,
) -> Result<Option<order::Model>> {
    Order::find_by_id(order_id).one(db).await.map_err(Into::into)
}

/// Moves an order to a new status. Privileged.
///
/// The change is checked against the transition table on
/// [`OrderStatus::can_transition_to`]; anything else is rejected, including
/// moves out of terminal states and same-state updates.
///
/// # Errors
/// Returns an error if:
/// - The caller has no active admin session
/// - The order does not exist
/// - The stored status string is unrecognized
/// - The requested transition is not allowed
/// - The database update operation fails
pub async fn update_order_status(
    db: &DatabaseConnection,
    session: Option<&AdminSession>,
    order_id: i64,
    new_status: OrderStatus,
) -> Result<order::Model> {
    require_admin(session)?;

    let row = Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::OrderNotFound { id: order_id })?;

    let current: OrderStatus = row.status.parse()?;
    if !current.can_transition_to(new_status) {
        return Err(Error::InvalidStatusTransition {
            from: current,
            to: new_status,
        });
    }

    let mut order: order::ActiveModel = row.into();
    order.status = Set(new_status.as_str().to_string());
    order.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_status_transition_table() {
        use OrderStatus::*;

        assert!(PendingApproval.can_transition_to(ApprovedWaiting));
        assert!(PendingApproval.can_transition_to(Rejected));
        assert!(ApprovedWaiting.can_transition_to(Delivered));

        // Everything else is illegal, including same-state and terminal moves
        assert!(!PendingApproval.can_transition_to(Delivered));
        assert!(!PendingApproval.can_transition_to(PendingApproval));
        assert!(!ApprovedWaiting.can_transition_to(Rejected));
        assert!(!Delivered.can_transition_to(PendingApproval));
        assert!(!Rejected.can_transition_to(ApprovedWaiting));

        assert!(Delivered.is_terminal());
        assert!(Rejected.is_terminal());
        assert!(!PendingApproval.is_terminal());
    }

    #[test]
    fn test_status_round_trips_through_strings() {
        for status in [
            OrderStatus::PendingApproval,
            OrderStatus::ApprovedWaiting,
            OrderStatus::Delivered,
            OrderStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!(matches!(
            "shipped".parse::<OrderStatus>().unwrap_err(),
            Error::UnknownOrderStatus { value } if value == "shipped"
        ));
    }

    #[test]
    fn test_items_wire_format_is_camel_case() {
        let items = StoreOrderItems {
            products: vec![OrderLine {
                product_id: 1,
                name: "Guitar".to_string(),
                price: 2499.0,
                quantity: 1,
            }],
            total_price: 2499.0,
        };
        let json = serde_json::to_value(&items).unwrap();
        assert_eq!(json["products"][0]["productId"], 1);
        assert_eq!(json["totalPrice"], 2499.0);

        let custom = CustomRequestItems {
            category: "Percussion".to_string(),
            product_detail: "A 22-inch ride cymbal".to_string(),
            budget_range: None,
        };
        let json = serde_json::to_value(&custom).unwrap();
        assert_eq!(json["productDetail"], "A 22-inch ride cymbal");
        assert!(json.get("budgetRange").is_none());
    }

    #[tokio::test]
    async fn test_submit_store_order_round_trip() -> Result<()> {
        let db = setup_test_db().await?;
        let guitar = create_test_product(&db, "Guitar", 2499.0, 5).await?;
        let mic = create_test_product(&db, "Microphone", 1899.0, 3).await?;

        let mut cart = Cart::new();
        cart.add_item(&guitar, 2);
        cart.add_item(&mic, 1);
        let cart_total = cart.total_price();

        let order = submit_store_order(&db, "A", "555", "X", &cart).await?;

        assert_eq!(order.status, "pending_approval");
        assert_eq!(order.kind, "normal_order");
        assert_eq!(order.address.as_deref(), Some("X"));

        let OrderItems::Store(items) = order_items(&order)? else {
            panic!("expected store items");
        };
        assert_eq!(items.products.len(), 2);
        assert_eq!(items.products[0].product_id, guitar.id);
        assert_eq!(items.products[0].name, "Guitar");
        assert_eq!(items.products[0].price, 2499.0);
        assert_eq!(items.products[0].quantity, 2);
        assert_eq!(items.products[1].quantity, 1);
        assert_eq!(items.total_price, cart_total);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_store_order_decrements_stock() -> Result<()> {
        let db = setup_test_db().await?;
        let guitar = create_test_product(&db, "Guitar", 2499.0, 5).await?;

        let mut cart = Cart::new();
        cart.add_item(&guitar, 1);
        submit_store_order(&db, "A", "555", "X", &cart).await?;

        let after = crate::core::product::get_product_by_id(&db, guitar.id)
            .await?
            .unwrap();
        assert_eq!(after.stock, 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_store_order_stock_floors_at_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let guitar = create_test_product(&db, "Guitar", 2499.0, 2).await?;

        // Cart built against a stale snapshot claiming more stock
        let mut stale = guitar.clone();
        stale.stock = 10;
        let mut cart = Cart::new();
        cart.add_item(&stale, 5);

        submit_store_order(&db, "A", "555", "X", &cart).await?;

        let after = crate::core::product::get_product_by_id(&db, guitar.id)
            .await?
            .unwrap();
        assert_eq!(after.stock, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_store_order_skips_vanished_product() -> Result<()> {
        let db = setup_test_db().await?;
        let session = test_admin_session()?;
        let guitar = create_test_product(&db, "Guitar", 2499.0, 5).await?;
        let mic = create_test_product(&db, "Microphone", 1899.0, 3).await?;

        let mut cart = Cart::new();
        cart.add_item(&guitar, 1);
        cart.add_item(&mic, 1);

        // Catalog row disappears between carting and checkout
        crate::core::product::delete_product(&db, Some(&session), guitar.id).await?;

        let order = submit_store_order(&db, "A", "555", "X", &cart).await?;

        // Order keeps both snapshot lines; only the surviving row is decremented
        let OrderItems::Store(items) = order_items(&order)? else {
            panic!("expected store items");
        };
        assert_eq!(items.products.len(), 2);
        let mic_after = crate::core::product::get_product_by_id(&db, mic.id)
            .await?
            .unwrap();
        assert_eq!(mic_after.stock, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_store_order_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let guitar = create_test_product(&db, "Guitar", 2499.0, 5).await?;

        let mut cart = Cart::new();
        cart.add_item(&guitar, 1);

        for (name, phone, address) in [("", "555", "X"), ("A", " ", "X"), ("A", "555", "")] {
            let result = submit_store_order(&db, name, phone, address, &cart).await;
            assert!(matches!(
                result.unwrap_err(),
                Error::Validation { message: _ }
            ));
        }

        let empty = Cart::new();
        let result = submit_store_order(&db, "A", "555", "X", &empty).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        // Nothing was persisted and no stock moved
        assert!(get_orders(&db, Some(&test_admin_session()?)).await?.is_empty());
        let unchanged = crate::core::product::get_product_by_id(&db, guitar.id)
            .await?
            .unwrap();
        assert_eq!(unchanged.stock, 5);

        Ok(())
    }

    #[tokio::test]
    async fn test_submit_custom_request() -> Result<()> {
        let db = setup_test_db().await?;

        let order = submit_custom_request(
            &db,
            "B",
            "556",
            "Percussion",
            "A 22-inch ride cymbal",
            Some("  "),
        )
        .await?;

        assert_eq!(order.kind, "custom_request");
        assert_eq!(order.status, "pending_approval");
        assert_eq!(order.address, None);

        let OrderItems::Custom(items) = order_items(&order)? else {
            panic!("expected custom items");
        };
        assert_eq!(items.category, "Percussion");
        assert_eq!(items.product_detail, "A 22-inch ride cymbal");
        assert_eq!(items.budget_range, None);

        let result = submit_custom_request(&db, "B", "556", "", "detail", None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { message: _ }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_order_items_decode_is_keyed_on_kind() -> Result<()> {
        let db = setup_test_db().await?;
        let order = submit_custom_request(&db, "B", "556", "Percussion", "Cymbal", None).await?;

        // Forcing the wrong kind makes decoding fail instead of misparsing
        let mut mislabeled = order;
        mislabeled.kind = OrderKind::NormalOrder.as_str().to_string();
        assert!(matches!(
            order_items(&mislabeled).unwrap_err(),
            Error::ItemsPayload(_)
        ));

        mislabeled.kind = "refund".to_string();
        assert!(matches!(
            order_items(&mislabeled).unwrap_err(),
            Error::UnknownOrderKind { value } if value == "refund"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_orders_requires_admin() -> Result<()> {
        let db = setup_test_db().await?;

        let result = get_orders(&db, None).await;
        assert!(matches!(result.unwrap_err(), Error::Unauthorized));

        Ok(())
    }

    #[tokio::test]
    async fn test_get_orders_newest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let session = test_admin_session()?;

        submit_custom_request(&db, "First", "1", "Cat", "Detail", None).await?;
        submit_custom_request(&db, "Second", "2", "Cat", "Detail", None).await?;

        let orders = get_orders(&db, Some(&session)).await?;
        assert_eq!(orders.len(), 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_status_happy_path() -> Result<()> {
        let db = setup_test_db().await?;
        let session = test_admin_session()?;
        let order = submit_custom_request(&db, "B", "556", "Cat", "Detail", None).await?;

        let approved = update_order_status(
            &db,
            Some(&session),
            order.id,
            OrderStatus::ApprovedWaiting,
        )
        .await?;
        assert_eq!(approved.status, "approved_waiting");

        let delivered =
            update_order_status(&db, Some(&session), order.id, OrderStatus::Delivered).await?;
        assert_eq!(delivered.status, "delivered");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_status_rejects_illegal_transition() -> Result<()> {
        let db = setup_test_db().await?;
        let session = test_admin_session()?;
        let order = submit_custom_request(&db, "B", "556", "Cat", "Detail", None).await?;

        // Straight to delivered from pending is not allowed
        let result =
            update_order_status(&db, Some(&session), order.id, OrderStatus::Delivered).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidStatusTransition {
                from: OrderStatus::PendingApproval,
                to: OrderStatus::Delivered,
            }
        ));

        // Terminal states stay terminal
        update_order_status(&db, Some(&session), order.id, OrderStatus::Rejected).await?;
        let result =
            update_order_status(&db, Some(&session), order.id, OrderStatus::PendingApproval).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidStatusTransition { .. }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_status_requires_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let order = submit_custom_request(&db, "B", "556", "Cat", "Detail", None).await?;

        let result = update_order_status(&db, None, order.id, OrderStatus::ApprovedWaiting).await;
        assert!(matches!(result.unwrap_err(), Error::Unauthorized));

        let unchanged = get_order_by_id(&db, order.id).await?.unwrap();
        assert_eq!(unchanged.status, "pending_approval");

        Ok(())
    }

    #[tokio::test]
    async fn test_update_order_status_missing_order() -> Result<()> {
        let db = setup_test_db().await?;
        let session = test_admin_session()?;

        let result =
            update_order_status(&db, Some(&session), 999, OrderStatus::ApprovedWaiting).await;
        assert!(matches!(result.unwrap_err(), Error::OrderNotFound { id: 999 }));

        Ok(())
    }
}
