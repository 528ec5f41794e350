//! Integration tests for Green Hub Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p green-hub-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store over directory-backed storage, across
//!   fresh store instances
//! - `checkout_flow` - Add, adjust and check out through the CLI commands

use green_hub_core::{NewCartItem, Price, ProductId};

/// Product snapshot with predictable fields for test `id`.
#[must_use]
pub fn product(id: i32, price_minor: i64) -> NewCartItem {
    NewCartItem::new(
        ProductId::new(id),
        format!("Plant {id}"),
        Price::from_minor(price_minor),
        format!("/images/{id}.jpg"),
    )
}
