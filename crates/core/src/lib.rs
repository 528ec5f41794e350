//! Green Hub Core - cart and checkout library.
//!
//! This crate provides the pieces of Green Hub Shop that carry state:
//! - the shopper's cart, persisted through a pluggable key/value backend
//! - the checkout step that totals and empties that cart
//!
//! # Architecture
//!
//! The core crate contains types, traits and in-memory logic only - no file
//! access and no HTTP clients. Durable backends (e.g. the directory-backed
//! storage in `green-hub-cli`) implement [`CartStorage`] outside this crate.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`cart`] - Cart line items, storage backends and the [`CartStore`]
//! - [`checkout`] - Shipping details, payment methods and order confirmation

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod checkout;
pub mod types;

pub use cart::{
    CART_KEY, CartItem, CartLoadError, CartStorage, CartStore, CartSummary, MemoryStorage,
    NewCartItem, StorageError,
};
pub use checkout::{CheckoutError, OrderConfirmation, PaymentMethod, ShippingDetails, checkout};
pub use types::*;
