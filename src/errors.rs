//! Unified error types and result handling for the store backend.
//!
//! Every fallible operation in the crate returns [`Result`], so callers get a
//! single error surface whether a failure came from input validation, the
//! authorization gate, or the database layer.

use crate::core::order::OrderStatus;
use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration problem (missing env var, unreadable config file, ...)
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what was wrong
        message: String,
    },

    /// A required input field was missing or malformed
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of the rejected input
        message: String,
    },

    /// The caller did not present an active admin session
    #[error("unauthorized")]
    Unauthorized,

    /// No product row with the given id
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No order row with the given id
    #[error("Order not found: {id}")]
    OrderNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No team category row with the given id
    #[error("Team category not found: {id}")]
    CategoryNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// No team member row with the given id
    #[error("Team member not found: {id}")]
    MemberNotFound {
        /// The id that was looked up
        id: i64,
    },

    /// Product price was negative, NaN, or infinite
    #[error("Invalid price: {price}")]
    InvalidPrice {
        /// The rejected price value
        price: f64,
    },

    /// A stored status string did not match any known order status
    #[error("Unknown order status: {value}")]
    UnknownOrderStatus {
        /// The unrecognized status string
        value: String,
    },

    /// A stored order type string did not match any known order kind
    #[error("Unknown order type: {value}")]
    UnknownOrderKind {
        /// The unrecognized type string
        value: String,
    },

    /// The requested status change is not in the allowed transition table
    #[error("Illegal status transition: {from} -> {to}")]
    InvalidStatusTransition {
        /// Status the order currently has
        from: OrderStatus,
        /// Status the caller asked for
        to: OrderStatus,
    },

    /// Database error from the underlying store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// An order items payload could not be encoded or decoded
    #[error("Order items payload error: {0}")]
    ItemsPayload(#[from] serde_json::Error),

    /// I/O error (config file reads)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
