//! Cart inspection and editing commands.

use anyhow::{bail, Result};
use foodie_cart::prelude::*;

use super::{AddArgs, RemoveArgs, SetQtyArgs};
use crate::context::Context;
use crate::output::format_coupon_value;

/// Show the cart.
pub fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.open_cart()?;
    print_cart(cart.state(), ctx);
    Ok(())
}

/// Add one unit of an item.
pub fn add(args: AddArgs, ctx: &Context) -> Result<()> {
    if !args.price.is_finite() || args.price < 0.0 {
        bail!("Price must be a non-negative amount, got {}", args.price);
    }

    let mut item = NewItem::new(
        args.id.as_str(),
        args.name,
        Money::from_decimal(args.price),
        args.restaurant_id,
        args.restaurant_name,
    );
    if let Some(category) = args.category {
        item = item.with_category(category);
    }
    if args.veg {
        item = item.with_veg(true);
    }

    let mut cart = ctx.open_cart()?;
    let state = cart.add_item(item);
    let quantity = state
        .get_item(&ItemId::new(args.id.as_str()))
        .map(|i| i.quantity)
        .unwrap_or(0);

    ctx.output
        .success(&format!("Added '{}' (quantity {})", args.id, quantity));
    print_cart(state, ctx);
    Ok(())
}

/// Remove a line.
pub fn remove(args: RemoveArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ItemId::new(args.id.as_str());
    if cart.state().get_item(&id).is_none() {
        ctx.output
            .warn(&format!("'{}' is not in the cart; nothing to remove", args.id));
    }

    let state = cart.remove_item(id);
    print_cart(state, ctx);
    Ok(())
}

/// Set a line's quantity.
pub fn set_qty(args: SetQtyArgs, ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let id = ItemId::new(args.id.as_str());
    if cart.state().get_item(&id).is_none() {
        ctx.output
            .warn(&format!("'{}' is not in the cart; nothing to update", args.id));
    }

    let max = ctx.config.limits.max_quantity();
    if args.quantity > i64::from(max) {
        ctx.output
            .warn(&format!("Quantity capped at {} per item", max));
    }

    let state = cart.update_quantity(id, args.quantity);
    print_cart(state, ctx);
    Ok(())
}

/// Empty the cart.
pub fn clear(ctx: &Context) -> Result<()> {
    let mut cart = ctx.open_cart()?;
    let state = cart.clear();
    ctx.output.success("Cart cleared");
    if ctx.output.is_json() {
        ctx.output.json(state);
    }
    Ok(())
}

/// Print the cart as a table, or as the persisted JSON in `--json` mode.
pub fn print_cart(state: &CartState, ctx: &Context) {
    if ctx.output.is_json() {
        ctx.output.json(state);
        return;
    }

    ctx.output.header("Cart");

    if state.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let currency = ctx.currency();
    let widths = [16, 28, 6, 12, 12];
    ctx.output
        .table_row(&["ID", "ITEM", "QTY", "PRICE", "LINE TOTAL"], &widths);

    for (restaurant_id, restaurant_name) in state.restaurants() {
        ctx.output
            .group(&format!("{} ({})", restaurant_name, restaurant_id));
        for line in state
            .items()
            .iter()
            .filter(|i| &i.restaurant_id == restaurant_id)
        {
            let quantity = line.quantity.to_string();
            let price = line.price.display(currency);
            let line_total = line.line_total().display(currency);
            ctx.output.table_row(
                &[line.id.as_str(), &line.name, &quantity, &price, &line_total],
                &widths,
            );
        }
    }

    ctx.output.info("");
    ctx.output.kv("Items", &state.item_count().to_string());
    ctx.output.kv("Total", &state.total().display(currency));

    if let Some(coupon) = state.applied_coupon() {
        ctx.output.kv(
            "Coupon",
            &format!(
                "{} - {}",
                coupon.code,
                format_coupon_value(&coupon.value, currency)
            ),
        );
        ctx.output.kv("Discount", &state.discount().display(currency));
        if state.discount().is_zero() {
            ctx.output.warn(&format!(
                "{} needs a minimum order of {}",
                coupon.code,
                coupon.min_order.display(currency)
            ));
        }
    }
}
