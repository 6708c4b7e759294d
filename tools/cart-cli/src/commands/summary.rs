//! Checkout summary command.

use anyhow::Result;
use foodie_cart::prelude::*;

use crate::context::Context;

/// Show the checkout breakdown.
pub fn run(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    let state = cart.state();
    let summary = OrderSummary::for_cart(state, &ctx.config.pricing);

    if ctx.output.is_json() {
        ctx.output.json(&summary);
        return Ok(());
    }

    ctx.output.header("Order summary");

    if state.is_empty() {
        ctx.output.info("Your cart is empty.");
        return Ok(());
    }

    let currency = ctx.currency();
    ctx.output
        .amount("Subtotal", &summary.subtotal.display(currency));
    ctx.output
        .amount("Delivery fee", &summary.delivery_fee.display(currency));
    ctx.output.amount(
        &format!("Taxes ({}%)", ctx.config.pricing.tax_rate_percent),
        &summary.taxes.display(currency),
    );
    if summary.has_discount() {
        let code = state
            .applied_coupon()
            .map(|c| c.code.as_str())
            .unwrap_or_default();
        ctx.output.amount(
            &format!("Discount ({})", code),
            &format!("-{}", summary.discount.display(currency)),
        );
    }
    ctx.output
        .amount("Total", &summary.grand_total.display(currency));
    ctx.output.info(&format!(
        "You'll earn {} points on this order",
        summary.points_earned
    ));

    Ok(())
}
