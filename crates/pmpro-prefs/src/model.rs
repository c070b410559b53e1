//! Selected-model preference

use crate::bus::{ModelSelected, ModelSelectionBus, ModelSubscription};
use crate::error::PreferenceError;
use crate::store::PreferenceStore;
use std::sync::Arc;

/// Fixed key under which the selected model is stored
pub const SELECTED_MODEL_KEY: &str = "selectedModel";

/// Model used when nothing has been selected yet
pub const DEFAULT_MODEL: &str = "phi3";

/// Reads, persists and broadcasts the selected model
#[derive(Clone)]
pub struct ModelPreferences {
    store: Arc<dyn PreferenceStore>,
    bus: ModelSelectionBus,
}

impl ModelPreferences {
    /// Create over a store and bus
    #[inline]
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>, bus: ModelSelectionBus) -> Self {
        Self { store, bus }
    }

    /// Explicitly selected model, if any
    ///
    /// # Errors
    /// Store read failures.
    pub fn stored(&self) -> Result<Option<String>, PreferenceError> {
        Ok(self
            .store
            .load(SELECTED_MODEL_KEY)?
            .filter(|m| !m.trim().is_empty()))
    }

    /// Currently selected model, or the default
    ///
    /// # Errors
    /// Store read failures.
    pub fn current(&self) -> Result<String, PreferenceError> {
        Ok(self
            .stored()?
            .unwrap_or_else(|| DEFAULT_MODEL.to_string()))
    }

    /// Persist a new selection, then notify subscribers
    ///
    /// Nothing is published when persisting fails.
    ///
    /// # Errors
    /// - `PreferenceError::EmptyModel` for blank identifiers
    /// - store write failures
    pub fn select(&self, model: &str) -> Result<(), PreferenceError> {
        let model = model.trim();
        if model.is_empty() {
            return Err(PreferenceError::EmptyModel);
        }

        self.store.save(SELECTED_MODEL_KEY, model)?;
        let reached = self.bus.publish(ModelSelected {
            model: model.to_string(),
        });
        tracing::info!("Selected model {} ({} subscribers notified)", model, reached);
        Ok(())
    }

    /// Subscribe to future selections
    #[inline]
    #[must_use]
    pub fn subscribe(&self) -> ModelSubscription {
        self.bus.subscribe()
    }

    /// Underlying bus
    #[inline]
    #[must_use]
    pub fn bus(&self) -> &ModelSelectionBus {
        &self.bus
    }
}

impl std::fmt::Debug for ModelPreferences {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelPreferences")
            .field("bus", &self.bus)
            .finish_non_exhaustive()
    }
}
