//! Cart state and its reducer.

use crate::cart::coupon::{discount_for, Coupon};
use crate::cart::item::{LineItem, NewItem, OrderLine};
use crate::error::CartError;
use crate::ids::{ItemId, RestaurantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Default cap on a single line's quantity.
pub const MAX_QUANTITY_PER_ITEM: u32 = 9999;

/// Limits applied by the reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartLimits {
    /// Quantities above this are clamped, not rejected. A limit of zero
    /// is treated as one.
    pub max_quantity_per_item: u32,
}

impl CartLimits {
    /// The effective per-line cap, never below one.
    pub fn max_quantity(&self) -> u32 {
        self.max_quantity_per_item.max(1)
    }
}

impl Default for CartLimits {
    fn default() -> Self {
        Self {
            max_quantity_per_item: MAX_QUANTITY_PER_ITEM,
        }
    }
}

/// A mutation of the cart.
#[derive(Debug, Clone, PartialEq)]
pub enum CartAction {
    /// Add one unit; merges into an existing line with the same ID.
    AddItem(NewItem),
    /// Drop a line. No-op if absent.
    RemoveItem(ItemId),
    /// Set a line's quantity; zero or below removes it.
    UpdateQuantity { id: ItemId, quantity: i64 },
    /// Replace the applied coupon.
    ApplyCoupon(Coupon),
    /// Drop the applied coupon.
    RemoveCoupon,
    /// Reset to the empty cart.
    Clear,
    /// Replace the whole state with a snapshot from storage.
    Hydrate(CartState),
}

/// The cart: the sole unit of persistence.
///
/// `total` and `discount` are derived from `items` and `applied_coupon`
/// and recomputed on every transition, so the fields are read-only outside
/// the reducer.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CartState {
    items: Vec<LineItem>,
    total: Money,
    applied_coupon: Option<Coupon>,
    discount: Money,
}

impl CartState {
    /// The empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one action, producing the next state.
    ///
    /// Never fails: unknown IDs are ignored and quantities are clamped to
    /// `limits`.
    pub fn reduce(mut self, action: CartAction, limits: &CartLimits) -> CartState {
        match action {
            CartAction::Hydrate(state) => self = state,
            CartAction::Clear => return CartState::new(),
            CartAction::AddItem(item) => {
                if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
                    // A line hydrated above the cap is left as is.
                    let bumped = existing.quantity.saturating_add(1).min(limits.max_quantity());
                    existing.quantity = existing.quantity.max(bumped);
                } else {
                    self.items.push(item.into_line_item(1));
                }
            }
            CartAction::RemoveItem(id) => {
                self.items.retain(|i| i.id != id);
            }
            CartAction::UpdateQuantity { id, quantity } => {
                if quantity <= 0 {
                    self.items.retain(|i| i.id != id);
                } else if let Some(existing) = self.items.iter_mut().find(|i| i.id == id) {
                    let max = limits.max_quantity();
                    let capped = quantity.min(i64::from(max));
                    existing.quantity = u32::try_from(capped).unwrap_or(max);
                }
            }
            CartAction::ApplyCoupon(coupon) => {
                self.applied_coupon = Some(coupon);
            }
            CartAction::RemoveCoupon => {
                self.applied_coupon = None;
            }
        }
        self.recompute();
        self
    }

    fn recompute(&mut self) {
        self.total = Money::sum(self.items.iter().map(LineItem::line_total));
        self.discount = discount_for(self.applied_coupon.as_ref(), self.total);
    }

    /// Validate a decoded snapshot and re-derive its totals.
    ///
    /// Snapshots with duplicate item IDs or zero quantities are rejected.
    /// A stored `total` or `discount` that disagrees with the items is
    /// replaced by the recomputed value.
    pub fn from_snapshot(mut snapshot: CartState) -> Result<CartState, CartError> {
        let mut seen = HashSet::new();
        for item in &snapshot.items {
            if !seen.insert(&item.id) {
                return Err(CartError::InvalidSnapshot(format!(
                    "duplicate item id {}",
                    item.id
                )));
            }
            if item.quantity == 0 {
                return Err(CartError::InvalidSnapshot(format!(
                    "item {} has zero quantity",
                    item.id
                )));
            }
        }

        let (stored_total, stored_discount) = (snapshot.total, snapshot.discount);
        snapshot.recompute();
        if snapshot.total != stored_total || snapshot.discount != stored_discount {
            tracing::debug!(
                stored_total = %stored_total,
                total = %snapshot.total,
                stored_discount = %stored_discount,
                discount = %snapshot.discount,
                "re-derived cart totals from snapshot"
            );
        }
        Ok(snapshot)
    }

    /// Decode and validate a persisted snapshot.
    pub fn decode(raw: &str) -> Result<CartState, CartError> {
        Self::from_snapshot(serde_json::from_str(raw)?)
    }

    /// Encode for persistence.
    pub fn encode(&self) -> Result<String, CartError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Sum of unit price times quantity over all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    /// The applied coupon, if any.
    pub fn applied_coupon(&self) -> Option<&Coupon> {
        self.applied_coupon.as_ref()
    }

    /// Discount yielded by the applied coupon against the current total.
    pub fn discount(&self) -> Money {
        self.discount
    }

    /// Get a line by item ID.
    pub fn get_item(&self, id: &ItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Distinct restaurants in the order their first item was added.
    pub fn restaurants(&self) -> Vec<(&RestaurantId, &str)> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .filter(|i| seen.insert(&i.restaurant_id))
            .map(|i| (&i.restaurant_id, i.restaurant_name.as_str()))
            .collect()
    }

    /// Rows for the external order store.
    pub fn order_lines(&self) -> Vec<OrderLine> {
        self.items.iter().map(LineItem::to_order_line).collect()
    }
}
