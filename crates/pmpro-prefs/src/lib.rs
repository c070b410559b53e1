//! PM-Pro Preferences
//!
//! Persistence of the selected model identifier and an explicit typed
//! channel that tells the rest of the process when it changes.
//!
//! # Example
//!
//! ```rust
//! use pmpro_prefs::{MemoryPreferenceStore, ModelPreferences, ModelSelectionBus};
//! use std::sync::Arc;
//!
//! let prefs = ModelPreferences::new(
//!     Arc::new(MemoryPreferenceStore::new()),
//!     ModelSelectionBus::default(),
//! );
//! let mut sub = prefs.subscribe();
//! prefs.select("mistral").unwrap();
//! assert_eq!(sub.try_next().unwrap().model, "mistral");
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod bus;
pub mod error;
pub mod model;
pub mod store;

// Re-exports
pub use bus::{ModelSelected, ModelSelectionBus, ModelSubscription};
pub use error::PreferenceError;
pub use model::{ModelPreferences, DEFAULT_MODEL, SELECTED_MODEL_KEY};
pub use store::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
