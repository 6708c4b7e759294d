//! Newtype IDs for type-safe identifiers.
//!
//! Menu item IDs come from the restaurant catalog and are not UUIDs, so these
//! wrap plain strings and serialize transparently.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifies a sellable menu item; unique within a cart.
    ItemId
);
define_id!(
    /// Identifies the restaurant selling an item.
    RestaurantId
);
define_id!(
    /// Identifies a coupon definition.
    CouponId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_from_str() {
        let id: ItemId = "biryani-01".into();
        assert_eq!(id.as_str(), "biryani-01");
        assert_eq!(format!("{}", id), "biryani-01");
    }

    #[test]
    fn test_id_serializes_as_plain_string() {
        let id = RestaurantId::new("r-7");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""r-7""#);

        let back: RestaurantId = serde_json::from_str(r#""r-7""#).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_id_equality_is_case_sensitive() {
        assert_ne!(CouponId::new("SAVE15"), CouponId::new("save15"));
    }
}
