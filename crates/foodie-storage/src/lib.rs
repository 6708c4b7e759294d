//! Durable local key-value storage for Foodie.
//!
//! Plays the role a browser's local storage plays for a web client: a small
//! string-keyed store that survives reloads, with JSON serialization on top
//! and change notifications delivered to every other open context.
//!
//! # Example
//!
//! ```rust,ignore
//! use foodie_storage::Storage;
//!
//! let storage = Storage::open_dir("/var/lib/foodie")?;
//!
//! // Store a value
//! storage.set("foodie-cart", &cart)?;
//!
//! // Retrieve a value
//! let cart: Option<CartState> = storage.get("foodie-cart")?;
//!
//! // Watch for writes from other contexts
//! let mut events = storage.subscribe();
//! while let Some(event) = events.try_next() {
//!     println!("{} changed", event.key);
//! }
//! ```

mod backend;
mod error;
mod event;
mod kv;

pub use backend::{FileStorage, KeyValueStore, MemoryStorage};
pub use error::StorageError;
pub use event::{ContextId, StorageEvent, Subscription, EVENT_CHANNEL_CAPACITY};
pub use kv::Storage;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{ContextId, Storage, StorageError, StorageEvent, Subscription};
}
