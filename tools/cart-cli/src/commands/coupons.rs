//! Coupon commands.

use anyhow::Result;
use foodie_cart::prelude::*;

use super::cart::print_cart;
use super::ApplyArgs;
use crate::context::Context;
use crate::output::{coupon_badge, format_coupon_value};

/// List the coupons a customer can redeem.
pub fn list(ctx: &Context) -> Result<()> {
    let book = ctx.coupon_book();
    let cart = ctx.open_cart()?;
    let total = cart.state().total();

    let coupons: Vec<&Coupon> = book.available().collect();

    if ctx.output.is_json() {
        ctx.output.json(&coupons);
        return Ok(());
    }

    ctx.output.header("Available coupons");

    if coupons.is_empty() {
        ctx.output.info("No coupons available.");
        return Ok(());
    }

    let currency = ctx.currency();
    let widths = [12, 22, 12, 14, 0];
    ctx.output.table_row(
        &["CODE", "VALUE", "MIN ORDER", "STATUS", "DESCRIPTION"],
        &widths,
    );

    for coupon in &coupons {
        let value = format_coupon_value(&coupon.value, currency);
        let min_order = coupon.min_order.display(currency);
        let badge = coupon_badge(coupon, total);
        ctx.output.table_row(
            &[&coupon.code, &value, &min_order, &badge, &coupon.description],
            &widths,
        );
    }

    Ok(())
}

/// Redeem a code against the current cart.
pub fn apply(args: ApplyArgs, ctx: &Context) -> Result<()> {
    let book = ctx.coupon_book();
    let mut cart = ctx.open_cart()?;

    let state = cart.redeem(&book, &args.code)?;
    ctx.output.success(&format!(
        "Applied {}: you save {}",
        args.code,
        state.discount().display(ctx.currency())
    ));
    print_cart(state, ctx);
    Ok(())
}

/// Remove the applied coupon.
pub fn drop_coupon(ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let applied = cart.state().applied_coupon().map(|c| c.code.clone());
    match applied {
        Some(code) => {
            cart.remove_coupon();
            ctx.output.success(&format!("Removed coupon {}", code));
        }
        None => ctx.output.info("No coupon applied."),
    }
    print_cart(cart.state(), ctx);
    Ok(())
}
