//! The cart store: reducer, persistence, and cross-context sync.

use crate::cart::{CartAction, CartLimits, CartState, Coupon, NewItem};
use crate::catalog::CouponBook;
use crate::config::CartConfig;
use crate::error::{CartError, CouponError};
use crate::ids::ItemId;
use foodie_storage::{Storage, Subscription};
use tracing::{debug, info, warn};

/// Owns one context's cart.
///
/// Every mutation runs the pure reducer and then writes the full snapshot
/// to storage under a fixed key. Writes from other contexts arrive as
/// storage notifications; [`CartStore::sync`] replaces the in-memory cart
/// with the newest one. There is no merge: if two contexts edit the cart at
/// the same time, the last write wins and the other edit is lost.
///
/// # Example
///
/// ```rust
/// use foodie_cart::prelude::*;
/// use foodie_storage::Storage;
///
/// let tab_a_storage = Storage::in_memory();
/// let tab_b_storage = tab_a_storage.new_context();
/// let config = CartConfig::default();
///
/// let mut tab_a = CartStore::open(tab_a_storage, &config);
/// let mut tab_b = CartStore::open(tab_b_storage, &config);
///
/// tab_a.add_item(NewItem::new("dosa", "Masala Dosa", Money::from_major(120), "r-1", "Udupi"));
/// assert!(tab_b.sync());
/// assert_eq!(tab_b.state().total(), Money::from_major(120));
/// ```
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    storage: Storage,
    subscription: Subscription,
    key: String,
    limits: CartLimits,
}

impl CartStore {
    /// Open the cart for a context, hydrating from storage.
    ///
    /// A missing snapshot yields the empty cart. An unreadable or invalid
    /// one is logged and also yields the empty cart; it is left in storage
    /// until the next mutation overwrites it.
    pub fn open(storage: Storage, config: &CartConfig) -> Self {
        // Subscribe before reading so no write slips between the two.
        let subscription = storage.subscribe();
        let key = config.storage.key.clone();
        let state = load_snapshot(&storage, &key).unwrap_or_default();

        info!(
            key = %key,
            context = %storage.context(),
            items = state.unique_item_count(),
            "cart opened"
        );

        Self {
            state,
            storage,
            subscription,
            key,
            limits: config.limits,
        }
    }

    /// The current cart.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    /// Storage key the cart is persisted under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Apply an action, then persist the result.
    ///
    /// Pending writes from other contexts are pulled in first, so the action
    /// lands on top of whatever was written before it.
    pub fn dispatch(&mut self, action: CartAction) -> &CartState {
        self.sync();
        let state = std::mem::take(&mut self.state);
        self.state = state.reduce(action, &self.limits);
        debug!(
            key = %self.key,
            items = self.state.unique_item_count(),
            total = %self.state.total(),
            discount = %self.state.discount(),
            "cart updated"
        );
        self.persist();
        &self.state
    }

    /// Add one unit of an item.
    pub fn add_item(&mut self, item: NewItem) -> &CartState {
        self.dispatch(CartAction::AddItem(item))
    }

    /// Remove a line. Unknown IDs are ignored.
    pub fn remove_item(&mut self, id: impl Into<ItemId>) -> &CartState {
        self.dispatch(CartAction::RemoveItem(id.into()))
    }

    /// Set a line's quantity. Zero or below removes the line.
    pub fn update_quantity(&mut self, id: impl Into<ItemId>, quantity: i64) -> &CartState {
        self.dispatch(CartAction::UpdateQuantity {
            id: id.into(),
            quantity,
        })
    }

    /// Apply a coupon without checking eligibility.
    ///
    /// An inactive coupon or one whose minimum order is not met is still
    /// applied; it yields no discount until the total qualifies. Use
    /// [`CartStore::redeem`] to gate codes first.
    pub fn apply_coupon(&mut self, coupon: Coupon) -> &CartState {
        self.dispatch(CartAction::ApplyCoupon(coupon))
    }

    /// Look up `code` in `book`, check it against the current total, and
    /// apply it.
    ///
    /// Pending writes from other contexts are pulled in first so the
    /// minimum order is checked against the cart the coupon lands on.
    pub fn redeem(&mut self, book: &CouponBook, code: &str) -> Result<&CartState, CouponError> {
        self.sync();
        let coupon = book.check_eligibility(code, self.state.total())?.clone();
        Ok(self.apply_coupon(coupon))
    }

    /// Remove the applied coupon.
    pub fn remove_coupon(&mut self) -> &CartState {
        self.dispatch(CartAction::RemoveCoupon)
    }

    /// Empty the cart.
    pub fn clear(&mut self) -> &CartState {
        self.dispatch(CartAction::Clear)
    }

    /// Pull in writes from other contexts.
    ///
    /// Drains pending notifications for the cart key and hydrates from the
    /// newest snapshot that decodes. Deletions and undecodable snapshots are
    /// skipped. Returns whether the in-memory cart was replaced.
    pub fn sync(&mut self) -> bool {
        let events = self.subscription.drain_key(&self.key);
        let newest = events.into_iter().rev().find_map(|event| {
            let raw = event.new_value?;
            match CartState::decode(&raw) {
                Ok(state) => Some((event.origin, state)),
                Err(e) => {
                    warn!(
                        key = %self.key,
                        origin = %event.origin,
                        error = %e,
                        "ignoring undecodable cart from another context"
                    );
                    None
                }
            }
        });

        let Some((origin, state)) = newest else {
            return false;
        };

        debug!(
            key = %self.key,
            origin = %origin,
            items = state.unique_item_count(),
            "cart replaced by another context"
        );
        let current = std::mem::take(&mut self.state);
        self.state = current.reduce(CartAction::Hydrate(state), &self.limits);
        true
    }

    fn persist(&self) {
        let result = self.state.encode().and_then(|raw| {
            self.storage
                .set_raw(&self.key, &raw)
                .map_err(CartError::from)
        });
        if let Err(e) = result {
            warn!(key = %self.key, error = %e, "failed to persist cart");
        }
    }
}

fn load_snapshot(storage: &Storage, key: &str) -> Option<CartState> {
    let raw = match storage.get_raw(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key = %key, error = %e, "failed to read cart from storage");
            return None;
        }
    };

    match CartState::decode(&raw) {
        Ok(state) => Some(state),
        Err(e) => {
            warn!(key = %key, error = %e, "discarding unreadable cart snapshot");
            None
        }
    }
}
