//! Menu items and cart line items.

use crate::ids::{ItemId, RestaurantId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A dish or product as listed on a restaurant menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_veg: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_alcoholic: Option<bool>,
}

/// An item about to be added to the cart: a line item without a quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Unit price at the time of adding.
    pub price: Money,
    pub image: String,
    pub category: String,
    pub is_veg: Option<bool>,
    pub is_alcoholic: Option<bool>,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
}

impl NewItem {
    /// Minimal item with empty display metadata.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        restaurant_id: impl Into<RestaurantId>,
        restaurant_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            image: String::new(),
            category: String::new(),
            is_veg: None,
            is_alcoholic: None,
            restaurant_id: restaurant_id.into(),
            restaurant_name: restaurant_name.into(),
        }
    }

    /// Select a menu item from a restaurant.
    pub fn from_menu_item(
        item: MenuItem,
        restaurant_id: impl Into<RestaurantId>,
        restaurant_name: impl Into<String>,
    ) -> Self {
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            price: item.price,
            image: item.image,
            category: item.category,
            is_veg: item.is_veg,
            is_alcoholic: item.is_alcoholic,
            restaurant_id: restaurant_id.into(),
            restaurant_name: restaurant_name.into(),
        }
    }

    /// Set the category tag.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the vegetarian flag.
    pub fn with_veg(mut self, is_veg: bool) -> Self {
        self.is_veg = Some(is_veg);
        self
    }

    pub(crate) fn into_line_item(self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
            is_veg: self.is_veg,
            is_alcoholic: self.is_alcoholic,
            quantity,
            restaurant_id: self.restaurant_id,
            restaurant_name: self.restaurant_name,
        }
    }
}

/// A line in the cart.
///
/// The price is a snapshot taken when the item was first added; later menu
/// price changes do not reach items already in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LineItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    pub price: Money,
    pub image: String,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_veg: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_alcoholic: Option<bool>,
    /// Always at least 1 while the line is in a cart.
    pub quantity: u32,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
}

impl LineItem {
    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.price.saturating_mul(self.quantity)
    }

    /// The order-table row for this line.
    pub fn to_order_line(&self) -> OrderLine {
        OrderLine {
            menu_item_id: self.id.clone(),
            menu_item_name: self.name.clone(),
            restaurant_id: self.restaurant_id.clone(),
            restaurant_name: self.restaurant_name.clone(),
            quantity: self.quantity,
            price: self.price,
            is_veg: self.is_veg.unwrap_or(false),
        }
    }
}

/// A line item as handed to the order store at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: ItemId,
    pub menu_item_name: String,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub quantity: u32,
    pub price: Money,
    pub is_veg: bool,
}
