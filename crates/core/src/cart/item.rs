//! Cart line items and derived totals.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Product snapshot handed to [`CartStore::add`](super::CartStore::add).
///
/// Name, price and image are copied into the cart when the product is added
/// and are not re-synced with the catalog afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

impl NewCartItem {
    /// Create a product snapshot.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    pub(crate) fn with_qty(self, qty: u32) -> CartItem {
        CartItem {
            id: self.id,
            name: self.name,
            price: self.price,
            image: self.image,
            qty,
        }
    }
}

/// One line in the cart.
///
/// The serialized shape is the persisted payload format:
/// `{"id": 1, "name": "...", "price": 120.0, "image": "...", "qty": 2}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub qty: u32,
}

impl CartItem {
    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// Totals shown on the cart and checkout pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartSummary {
    /// Number of distinct products.
    pub line_count: usize,
    /// Sum of all quantities.
    pub item_count: u64,
    /// Sum of all line totals.
    pub subtotal: Price,
}

impl CartSummary {
    /// Summarize a list of cart lines.
    #[must_use]
    pub fn of(items: &[CartItem]) -> Self {
        Self {
            line_count: items.len(),
            item_count: items.iter().map(|item| u64::from(item.qty)).sum(),
            subtotal: items.iter().map(CartItem::line_total).sum(),
        }
    }

    /// Whether the summarized cart has no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}
