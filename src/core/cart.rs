//! Cart business logic - the shopper's pending selection.
//!
//! A [`Cart`] lives entirely in the shopper's session; it is never persisted.
//! Each line holds a point-in-time snapshot of the product it was created
//! from, and every mutation clamps quantities against that snapshot's stock so
//! a cart can never ask for more units than the shop advertised when the
//! product was fetched. Totals are recomputed on every read.
//!
//! Clamping is silent: over-limit adds and updates succeed with the capped
//! quantity instead of erroring, and adding a product with no stock is a no-op.

use crate::core::order::{OrderLine, StoreOrderItems};
use crate::entities::product;

/// One cart entry: a product snapshot plus the selected quantity.
///
/// The snapshot does not track live stock changes made by other shoppers;
/// the authoritative stock check happens at order submission.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    /// Product as it looked when the line was created
    pub product: product::Model,
    /// Selected quantity, always in `1..=product.stock`
    pub quantity: i32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Ordered collection of cart lines, unique by product id.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Adds one unit of `product`, merging into an existing line if present.
    pub fn add(&mut self, product: &product::Model) {
        self.add_item(product, 1);
    }

    /// Adds `quantity` units of `product`, clamped against the snapshot stock.
    ///
    /// Out-of-stock products and lines already at the stock ceiling are left
    /// unchanged. Never errors; the effective added quantity is
    /// `min(quantity, stock - already_in_cart)`.
    pub fn add_item(&mut self, product: &product::Model, quantity: i32) {
        let max_stock = product.stock.max(0);
        if max_stock == 0 {
            return;
        }
        let current = self
            .lines
            .iter()
            .find(|line| line.product.id == product.id)
            .map_or(0, |line| line.quantity);
        let add_qty = quantity.min(max_stock - current);
        if add_qty <= 0 {
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            line.quantity += add_qty;
        } else {
            self.lines.push(CartLine {
                product: product.clone(),
                quantity: add_qty,
            });
        }
    }

    /// Removes the line for `product_id`; absent ids are a no-op.
    pub fn remove_item(&mut self, product_id: i64) {
        self.lines.retain(|line| line.product.id != product_id);
    }

    /// Replaces the stored quantity for `product_id`.
    ///
    /// A quantity of zero or less removes the line entirely; anything else is
    /// clamped to the snapshot stock. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, product_id: i64, quantity: i32) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)
        {
            line.quantity = quantity.min(line.product.stock.max(0));
        }
    }

    /// Empties the cart unconditionally (used after a successful checkout).
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Sum of all line quantities.
    #[must_use]
    pub fn total_items(&self) -> i32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn total_price(&self) -> f64 {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// True when the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Read-only view of the lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Serializes the cart into the order payload submitted at checkout.
    #[must_use]
    pub fn to_order_items(&self) -> StoreOrderItems {
        StoreOrderItems {
            products: self
                .lines
                .iter()
                .map(|line| OrderLine {
                    product_id: line.product.id,
                    name: line.product.name.clone(),
                    price: line.product.price,
                    quantity: line.quantity,
                })
                .collect(),
            total_price: self.total_price(),
        }
    }
}
