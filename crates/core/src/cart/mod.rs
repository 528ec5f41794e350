//! The shopper's cart.
//!
//! A cart is an ordered list of [`CartItem`]s keyed by product ID, persisted
//! as a JSON array under [`CART_KEY`] in some [`CartStorage`] backend. The
//! [`CartStore`] is the only writer and keeps two invariants on every value
//! it stores or returns:
//!
//! - product IDs are unique (adding an existing product bumps its quantity)
//! - every line has `qty >= 1`
//!
//! The cart is convenience state, not a system of record. Storage failures
//! never reach the caller: reads degrade to an empty cart and writes are
//! best-effort.

mod item;
mod storage;
mod store;

pub use item::{CartItem, CartSummary, NewCartItem};
pub use storage::{CartStorage, MemoryStorage, StorageError};
pub use store::{CART_KEY, CartLoadError, CartStore};
