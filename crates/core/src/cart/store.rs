//! The cart store: read-modify-write over a [`CartStorage`] backend.

use thiserror::Error;
use tracing::{debug, warn};

use super::item::{CartItem, CartSummary, NewCartItem};
use super::storage::{CartStorage, StorageError};
use crate::types::ProductId;

/// Storage key the cart payload lives under.
pub const CART_KEY: &str = "cart";

/// Why a stored cart could not be loaded.
#[derive(Debug, Error)]
pub enum CartLoadError {
    /// The backend could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The stored payload is not a JSON array of cart lines.
    #[error("malformed cart payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Owns the shopper's cart inside one storage backend.
///
/// Every mutation reads the full cart, applies one change and writes the full
/// result back. There is no change notification; callers re-[`read`](Self::read)
/// after mutating. Two stores over the same backend do not coordinate, so the
/// last writer wins.
///
/// ```
/// use green_hub_core::{CartStore, MemoryStorage, NewCartItem, Price, ProductId};
///
/// let store = CartStore::new(MemoryStorage::new());
/// let fern = NewCartItem::new(ProductId::new(1), "Fern", Price::from_minor(9_900), "/fern.jpg");
///
/// store.add(fern.clone(), 2);
/// store.add(fern, 3);
///
/// let cart = store.read();
/// assert_eq!(cart.len(), 1);
/// assert_eq!(cart[0].qty, 5);
/// ```
#[derive(Debug, Clone)]
pub struct CartStore<S> {
    storage: S,
    key: String,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a store over `storage` using the standard [`CART_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, CART_KEY)
    }

    /// Create a store that persists under a custom key.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The backend this store writes to.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored cart, reporting why it could not be read.
    ///
    /// A missing key is an empty cart, not an error. Lines with `qty == 0`
    /// are dropped and repeated product IDs are merged into their first
    /// occurrence, so the result always satisfies the cart invariants.
    ///
    /// # Errors
    ///
    /// Returns [`CartLoadError`] if the backend fails or the payload does not
    /// parse.
    pub fn load(&self) -> Result<Vec<CartItem>, CartLoadError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(Vec::new());
        };
        let items: Vec<CartItem> = serde_json::from_str(&raw)?;
        Ok(normalize(items))
    }

    /// Current cart lines in insertion order.
    ///
    /// Never fails: an unreadable or malformed cart reads as empty.
    #[must_use]
    pub fn read(&self) -> Vec<CartItem> {
        self.load().unwrap_or_else(|e| {
            warn!(key = %self.key, error = %e, "Cart unreadable, treating as empty");
            Vec::new()
        })
    }

    /// Totals for the current cart.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::of(&self.read())
    }

    /// Add `quantity` of a product.
    ///
    /// An existing line has its quantity increased (saturating); otherwise a
    /// new line is appended. Adding zero does nothing.
    pub fn add(&self, item: NewCartItem, quantity: u32) {
        if quantity == 0 {
            debug!(id = %item.id, "Ignoring add of zero quantity");
            return;
        }

        let mut items = self.read();
        if let Some(existing) = items.iter_mut().find(|line| line.id == item.id) {
            existing.qty = existing.qty.saturating_add(quantity);
            debug!(id = %item.id, qty = existing.qty, "Increased cart line quantity");
        } else {
            debug!(id = %item.id, qty = quantity, "Appended cart line");
            items.push(item.with_qty(quantity));
        }
        self.save(&items);
    }

    /// Add a single unit of a product.
    pub fn add_one(&self, item: NewCartItem) {
        self.add(item, 1);
    }

    /// Set the quantity of an existing line.
    ///
    /// A quantity of zero or less removes the line. Unknown IDs are ignored.
    pub fn set_quantity(&self, id: ProductId, quantity: i64) {
        let mut items = self.read();
        let Some(pos) = items.iter().position(|line| line.id == id) else {
            debug!(%id, "Quantity update for product not in cart");
            return;
        };

        if quantity <= 0 {
            items.remove(pos);
            debug!(%id, quantity, "Removed cart line on non-positive quantity");
        } else if let Some(line) = items.get_mut(pos) {
            line.qty = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.save(&items);
    }

    /// Remove a line. Unknown IDs are ignored.
    pub fn remove(&self, id: ProductId) {
        let mut items = self.read();
        let before = items.len();
        items.retain(|line| line.id != id);
        if items.len() == before {
            debug!(%id, "Remove for product not in cart");
            return;
        }
        self.save(&items);
    }

    /// Empty the cart.
    pub fn clear(&self) {
        self.save(&[]);
    }

    fn save(&self, items: &[CartItem]) {
        let raw = match serde_json::to_string(items) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Failed to encode cart");
                return;
            }
        };
        if let Err(e) = self.storage.set(&self.key, &raw) {
            warn!(key = %self.key, error = %e, "Failed to persist cart");
        }
    }
}

fn normalize(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut out: Vec<CartItem> = Vec::with_capacity(items.len());
    for item in items {
        if item.qty == 0 {
            continue;
        }
        match out.iter_mut().find(|line| line.id == item.id) {
            Some(existing) => existing.qty = existing.qty.saturating_add(item.qty),
            None => out.push(item),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::cart::MemoryStorage;
    use crate::types::Price;

    fn product(id: i32) -> NewCartItem {
        NewCartItem::new(
            ProductId::new(id),
            format!("Plant {id}"),
            Price::from_minor(i64::from(id) * 1_000),
            format!("/images/{id}.jpg"),
        )
    }

    fn ids(items: &[CartItem]) -> Vec<i32> {
        items.iter().map(|line| line.id.as_i32()).collect()
    }

    /// Backend that fails every call.
    struct BrokenStorage;

    impl CartStorage for BrokenStorage {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    #[test]
    fn test_new_cart_is_empty() {
        let store = CartStore::new(MemoryStorage::new());
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_add_distinct_products_appends_in_order() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(3), 1);
        store.add(product(1), 2);
        store.add(product(2), 4);

        let items = store.read();
        assert_eq!(ids(&items), vec![3, 1, 2]);
        assert_eq!(items[1].qty, 2);
        assert_eq!(items[2].qty, 4);
    }

    #[test]
    fn test_add_existing_product_increments_quantity() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 2);
        store.add(product(1), 3);

        let items = store.read();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ProductId::new(1));
        assert_eq!(items[0].qty, 5);
    }

    #[test]
    fn test_add_keeps_first_snapshot() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 1);
        let mut renamed = product(1);
        renamed.name = "Renamed".to_string();
        renamed.price = Price::from_minor(1);
        store.add(renamed, 1);

        let items = store.read();
        assert_eq!(items[0].name, "Plant 1");
        assert_eq!(items[0].price, Price::from_minor(1_000));
    }

    #[test]
    fn test_add_preserves_position_of_existing_line() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 1);
        store.add(product(2), 1);
        store.add(product(1), 1);
        assert_eq!(ids(&store.read()), vec![1, 2]);
    }

    #[test]
    fn test_add_sums_quantities_per_product() {
        let store = CartStore::new(MemoryStorage::new());
        let adds = [(1, 2), (2, 1), (1, 4), (3, 7), (2, 2)];
        for (id, qty) in adds {
            store.add(product(id), qty);
        }

        let items = store.read();
        assert_eq!(items.len(), 3);
        for line in &items {
            let expected: u32 = adds
                .iter()
                .filter(|(id, _)| *id == line.id.as_i32())
                .map(|(_, qty)| qty)
                .sum();
            assert_eq!(line.qty, expected);
        }
    }

    #[test]
    fn test_add_zero_is_noop() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 0);
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_add_saturates_quantity() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), u32::MAX);
        store.add(product(1), 10);
        assert_eq!(store.read()[0].qty, u32::MAX);
    }

    #[test]
    fn test_add_one() {
        let store = CartStore::new(MemoryStorage::new());
        store.add_one(product(5));
        store.add_one(product(5));
        assert_eq!(store.read()[0].qty, 2);
    }

    #[test]
    fn test_set_quantity() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 1);
        store.set_quantity(ProductId::new(1), 9);
        assert_eq!(store.read()[0].qty, 9);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 1);
        store.add(product(2), 1);
        store.set_quantity(ProductId::new(1), 0);
        assert_eq!(ids(&store.read()), vec![2]);
    }

    #[test]
    fn test_set_quantity_negative_removes_line() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 3);
        store.set_quantity(ProductId::new(1), -4);
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_set_quantity_unknown_id_is_noop() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 3);
        let before = store.read();
        store.set_quantity(ProductId::new(99), 5);
        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_set_quantity_clamps_large_values() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 1);
        store.set_quantity(ProductId::new(1), i64::MAX);
        assert_eq!(store.read()[0].qty, u32::MAX);
    }

    #[test]
    fn test_remove() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 1);
        store.add(product(2), 1);
        store.add(product(3), 1);
        store.remove(ProductId::new(2));
        assert_eq!(ids(&store.read()), vec![1, 3]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 2);
        let before = store.read();
        store.remove(ProductId::new(42));
        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_clear() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 1);
        store.add(product(2), 5);
        store.clear();
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_clear_empty_cart() {
        let store = CartStore::new(MemoryStorage::new());
        store.clear();
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_reload_over_same_storage() {
        let storage = MemoryStorage::new();
        let store = CartStore::new(storage.clone());
        store.add(product(2), 1);
        store.add(product(1), 3);
        let before = store.read();

        let reloaded = CartStore::new(storage);
        assert_eq!(reloaded.read(), before);
    }

    #[test]
    fn test_corrupted_payload_reads_empty() {
        let storage = MemoryStorage::new();
        storage.set(CART_KEY, "{not json").unwrap();
        let store = CartStore::new(storage);

        assert!(matches!(store.load(), Err(CartLoadError::Malformed(_))));
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_wrong_shape_payload_reads_empty() {
        let storage = MemoryStorage::new();
        storage
            .set(CART_KEY, r#"{"items":[{"id":1,"qty":2}]}"#)
            .unwrap();
        assert!(CartStore::new(storage).read().is_empty());
    }

    #[test]
    fn test_negative_quantity_payload_reads_empty() {
        let storage = MemoryStorage::new();
        storage
            .set(
                CART_KEY,
                r#"[{"id":1,"name":"a","price":1,"image":"","qty":-1}]"#,
            )
            .unwrap();
        assert!(CartStore::new(storage).read().is_empty());
    }

    #[test]
    fn test_mutation_overwrites_corrupted_payload() {
        let storage = MemoryStorage::new();
        storage.set(CART_KEY, "garbage").unwrap();
        let store = CartStore::new(storage);
        store.add(product(1), 1);
        assert_eq!(ids(&store.read()), vec![1]);
    }

    #[test]
    fn test_load_normalizes_legacy_payload() {
        let storage = MemoryStorage::new();
        storage
            .set(
                CART_KEY,
                r#"[
                    {"id":1,"name":"a","price":10,"image":"","qty":2},
                    {"id":2,"name":"b","price":20,"image":"","qty":0},
                    {"id":3,"name":"c","price":30,"image":"","qty":1},
                    {"id":1,"name":"a2","price":11,"image":"","qty":3}
                ]"#,
            )
            .unwrap();

        let items = CartStore::new(storage).read();
        assert_eq!(ids(&items), vec![1, 3]);
        assert_eq!(items[0].qty, 5);
        assert_eq!(items[0].name, "a");
    }

    #[test]
    fn test_unavailable_storage_degrades_silently() {
        let store = CartStore::new(BrokenStorage);
        store.add(product(1), 1);
        store.set_quantity(ProductId::new(1), 2);
        store.remove(ProductId::new(1));
        store.clear();

        assert!(matches!(store.load(), Err(CartLoadError::Storage(_))));
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_failed_write_leaves_previous_state() {
        let storage = MemoryStorage::with_quota(120);
        let store = CartStore::new(storage);
        store.add(product(1), 1);
        let before = store.read();
        assert_eq!(before.len(), 1);

        store.add(product(2), 1);
        assert_eq!(store.read(), before);
    }

    #[test]
    fn test_custom_key_is_isolated() {
        let storage = MemoryStorage::new();
        let main = CartStore::new(storage.clone());
        let wishlist = CartStore::with_key(storage, "wishlist");
        main.add(product(1), 1);
        assert!(wishlist.read().is_empty());
    }

    #[test]
    fn test_persisted_layout() {
        let storage = MemoryStorage::new();
        let store = CartStore::new(storage.clone());
        store.add(product(4), 2);

        let raw = storage.get(CART_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        assert_eq!(array[0]["id"], 4);
        assert_eq!(array[0]["qty"], 2);
    }

    #[test]
    fn test_summary() {
        let store = CartStore::new(MemoryStorage::new());
        store.add(product(1), 2);
        store.add(product(2), 1);

        let summary = store.summary();
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.subtotal, Price::from_minor(4_000));
    }
}
