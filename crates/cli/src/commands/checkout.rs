//! Checkout command.
//!
//! # Usage
//!
//! ```bash
//! gh-cart checkout --name "Somchai Jaidee" --phone 0812345678 \
//!     --address "99 Sukhumvit Rd, Bangkok" --payment bank
//! ```

use std::fmt::Write as _;

use green_hub_core::{OrderConfirmation, PaymentMethod, ShippingDetails};
use tracing::instrument;

use super::Context;
use super::cart::render;

/// Place the order and render the confirmation.
///
/// # Errors
///
/// Returns an error if the cart is empty or a shipping field is blank; the
/// cart is untouched in that case.
#[instrument(skip(ctx, shipping))]
pub fn run(
    ctx: &Context,
    shipping: ShippingDetails,
    payment: PaymentMethod,
) -> Result<String, green_hub_core::CheckoutError> {
    let confirmation = green_hub_core::checkout(&ctx.store, shipping, payment)?;
    Ok(render_confirmation(&confirmation, &ctx.currency_symbol))
}

fn render_confirmation(confirmation: &OrderConfirmation, symbol: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order {} placed", confirmation.order_number);
    let _ = writeln!(out, "Placed at: {}", confirmation.placed_at.to_rfc3339());
    let _ = writeln!(
        out,
        "Ship to: {}, {} ({})",
        confirmation.shipping.name, confirmation.shipping.address, confirmation.shipping.phone
    );
    let _ = writeln!(out, "Payment: {}", confirmation.payment);
    out.push_str(&render(&confirmation.lines, symbol));
    let _ = writeln!(out, "Total due: {}", confirmation.total().display(symbol));
    out
}
