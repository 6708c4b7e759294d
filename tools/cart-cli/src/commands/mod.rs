//! CLI command implementations.

pub mod cart;
pub mod coupons;
pub mod summary;

use clap::Args;

/// Arguments for the add command.
#[derive(Args)]
pub struct AddArgs {
    /// Menu item ID.
    pub id: String,

    /// Display name.
    #[arg(long)]
    pub name: String,

    /// Unit price in major units (e.g. 149.50).
    #[arg(long)]
    pub price: f64,

    /// Restaurant the item is ordered from.
    #[arg(long)]
    pub restaurant_id: String,

    /// Restaurant display name.
    #[arg(long)]
    pub restaurant_name: String,

    /// Menu category.
    #[arg(long)]
    pub category: Option<String>,

    /// Mark the item vegetarian.
    #[arg(long)]
    pub veg: bool,
}

/// Arguments for the remove command.
#[derive(Args)]
pub struct RemoveArgs {
    /// Item ID to remove.
    pub id: String,
}

/// Arguments for the set-qty command.
#[derive(Args)]
pub struct SetQtyArgs {
    /// Item ID.
    pub id: String,

    /// New quantity. Zero or below removes the line.
    #[arg(allow_negative_numbers = true)]
    pub quantity: i64,
}

/// Arguments for the apply command.
#[derive(Args)]
pub struct ApplyArgs {
    /// Coupon code, matched exactly.
    pub code: String,
}
