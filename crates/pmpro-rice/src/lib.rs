//! PM-Pro RICE engine
//!
//! Feature prioritization by RICE score (`reach * impact * confidence / effort`).
//!
//! # Core Concepts
//!
//! - [`score`]: pure scorer, rounded half away from zero to two decimals
//! - [`FeatureStore`]: owned record collection with the mutation API
//!   (`add`, `remove`, `recompute_all`, `update_inputs`, `list`)
//! - [`ranker`]: score descending, ties by ascending id
//! - [`views`]: bar and radar chart projections
//!
//! # Example
//!
//! ```rust
//! use pmpro_rice::{FeatureStore, RiceInputs};
//!
//! let mut store = FeatureStore::new();
//! store.add("AI Search", RiceInputs::new(8.0, 9.0, 7.0, 5.0)).unwrap();
//! let mobile = store.add("Mobile App", RiceInputs::new(9.0, 8.0, 6.0, 9.0)).unwrap();
//!
//! assert_eq!(store.list()[0].rice_score(), 100.8);
//! assert!(store.remove(mobile));
//! assert_eq!(store.len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod ranker;
pub mod record;
pub mod samples;
pub mod scorer;
pub mod store;
pub mod views;

// Re-exports
pub use error::{FeatureError, InvalidInput};
pub use record::{
    Criterion, FeatureDraft, FeatureId, FeatureRecord, RiceInputs, DEFAULT_CRITERION,
    MAX_CRITERION, MIN_CRITERION,
};
pub use scorer::score;
pub use store::FeatureStore;
pub use views::{BarRow, RadarRow};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the RICE engine
    pub use crate::{FeatureDraft, FeatureError, FeatureId, FeatureRecord, FeatureStore, RiceInputs};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
