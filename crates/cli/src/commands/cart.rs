//! Cart commands.
//!
//! # Usage
//!
//! ```bash
//! gh-cart add --id 3 --name "Monstera" --price 450 --image /img/monstera.jpg --qty 2
//! gh-cart set-qty 3 5
//! gh-cart remove 3
//! gh-cart list
//! gh-cart clear
//! ```

use std::fmt::Write as _;

use green_hub_core::{CartItem, CartSummary, NewCartItem, Price, ProductId};
use tracing::{info, instrument};

use super::Context;

/// Render cart lines and totals as a plain-text table.
#[must_use]
pub fn render(items: &[CartItem], symbol: &str) -> String {
    if items.is_empty() {
        return "Cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{:>6}  {:<30} {:>5} x {:>12} = {:>12}",
            item.id,
            item.name,
            item.qty,
            item.price.display(symbol),
            item.line_total().display(symbol),
        );
    }
    let summary = CartSummary::of(items);
    let _ = writeln!(
        out,
        "{} line(s), {} item(s), subtotal {}",
        summary.line_count,
        summary.item_count,
        summary.subtotal.display(symbol),
    );
    out
}

/// Show the cart, as a table or as the raw JSON payload.
///
/// # Errors
///
/// Returns an error if JSON encoding fails.
pub fn list(ctx: &Context, json: bool) -> Result<String, Box<dyn std::error::Error>> {
    let items = ctx.store.read();
    if json {
        let mut out = serde_json::to_string_pretty(&items)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(render(&items, &ctx.currency_symbol))
}

/// Add a product snapshot to the cart.
#[instrument(skip(ctx, name, image))]
pub fn add(
    ctx: &Context,
    id: ProductId,
    name: String,
    price: Price,
    image: String,
    qty: u32,
) -> String {
    ctx.store.add(NewCartItem::new(id, name, price, image), qty);
    info!("Added to cart");
    render(&ctx.store.read(), &ctx.currency_symbol)
}

/// Set a line's quantity; zero or less removes it.
#[instrument(skip(ctx))]
pub fn set_qty(ctx: &Context, id: ProductId, qty: i64) -> String {
    ctx.store.set_quantity(id, qty);
    render(&ctx.store.read(), &ctx.currency_symbol)
}

/// Remove a line.
#[instrument(skip(ctx))]
pub fn remove(ctx: &Context, id: ProductId) -> String {
    ctx.store.remove(id);
    render(&ctx.store.read(), &ctx.currency_symbol)
}

/// Empty the cart.
#[instrument(skip(ctx))]
pub fn clear(ctx: &Context) -> String {
    ctx.store.clear();
    info!("Cart cleared");
    render(&[], &ctx.currency_symbol)
}
