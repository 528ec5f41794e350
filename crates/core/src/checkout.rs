//! Checkout: turn the current cart into an order confirmation.
//!
//! Submitting the order to a backend is outside this crate. Checkout here
//! validates what the shopper entered, snapshots and totals the cart, and
//! empties it.

use core::fmt;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use crate::cart::{CartItem, CartStorage, CartStore, CartSummary};
use crate::types::Price;

/// Errors that can occur during checkout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// There is nothing to order.
    #[error("cart is empty")]
    EmptyCart,
    /// A required shipping field is blank.
    #[error("{0} is required")]
    MissingField(&'static str),
    /// The payment method string is not recognised.
    #[error("unknown payment method: {0}")]
    UnknownPaymentMethod(String),
}

/// How the shopper pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Cash on delivery.
    #[default]
    #[serde(rename = "cod")]
    CashOnDelivery,
    /// Bank transfer.
    #[serde(rename = "bank")]
    BankTransfer,
    /// Credit or debit card.
    #[serde(rename = "credit")]
    Card,
}

impl PaymentMethod {
    /// Short code used in forms and on the command line.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::CashOnDelivery => "cod",
            Self::BankTransfer => "bank",
            Self::Card => "credit",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cod" => Ok(Self::CashOnDelivery),
            "bank" => Ok(Self::BankTransfer),
            "credit" => Ok(Self::Card),
            other => Err(CheckoutError::UnknownPaymentMethod(other.to_owned())),
        }
    }
}

/// Where the order ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl ShippingDetails {
    /// Check that every field is filled in.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingField`] naming the first blank field.
    pub fn validate(&self) -> Result<(), CheckoutError> {
        for (field, value) in [
            ("name", &self.name),
            ("phone", &self.phone),
            ("address", &self.address),
        ] {
            if value.trim().is_empty() {
                return Err(CheckoutError::MissingField(field));
            }
        }
        Ok(())
    }
}

/// Result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderConfirmation {
    pub order_number: Uuid,
    pub placed_at: DateTime<Utc>,
    pub shipping: ShippingDetails,
    pub payment: PaymentMethod,
    pub lines: Vec<CartItem>,
    pub summary: CartSummary,
}

impl OrderConfirmation {
    /// Amount due.
    #[must_use]
    pub const fn total(&self) -> Price {
        self.summary.subtotal
    }
}

/// Place an order for everything in the cart and empty it.
///
/// The cart is left untouched when validation fails.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] if there is nothing to order, or
/// [`CheckoutError::MissingField`] if the shipping details are incomplete.
pub fn checkout<S: CartStorage>(
    store: &CartStore<S>,
    shipping: ShippingDetails,
    payment: PaymentMethod,
) -> Result<OrderConfirmation, CheckoutError> {
    let lines = store.read();
    if lines.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    shipping.validate()?;

    let summary = CartSummary::of(&lines);
    store.clear();

    let confirmation = OrderConfirmation {
        order_number: Uuid::new_v4(),
        placed_at: Utc::now(),
        shipping,
        payment,
        lines,
        summary,
    };
    info!(
        order_number = %confirmation.order_number,
        payment = %payment,
        total = %confirmation.total(),
        "Order placed"
    );
    Ok(confirmation)
}
