//! Core business logic - framework-agnostic storefront and admin operations.
//!
//! Everything here is plain Rust over a [`sea_orm::DatabaseConnection`] (or no
//! connection at all, for the cart): no HTTP types, no rendering concerns.
//! Privileged operations take an explicit admin session value and re-check it
//! on every call; see [`session`].

/// Shopper-held cart with stock-aware mutation rules
pub mod cart;
/// Contact form submissions and admin-side listing
pub mod contact;
/// Order submission, typed item payloads, and the status state machine
pub mod order;
/// Catalog reads, privileged catalog writes, and stock bookkeeping
pub mod product;
/// Admin password gate and session capability values
pub mod session;
/// Team roster categories and members
pub mod team;
