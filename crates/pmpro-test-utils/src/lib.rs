//! Testing utilities for the PM-Pro workspace
//!
//! Shared fixtures, scripted text generators and preference helpers.

#![allow(missing_docs)]

use async_trait::async_trait;
use parking_lot::Mutex;
use pmpro_assist::{AssistConfig, AssistError, GenerationOptions, TextGenerator};
use pmpro_prefs::{MemoryPreferenceStore, ModelPreferences, ModelSelectionBus};
use pmpro_rice::{samples, FeatureStore, RiceInputs};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

/// Two-feature store: AI Search (100.8) and Mobile App (48.0)
pub fn scenario_store() -> FeatureStore {
    let mut store = FeatureStore::new();
    store
        .add("AI Search", RiceInputs::new(8.0, 9.0, 7.0, 5.0))
        .unwrap();
    store
        .add("Mobile App", RiceInputs::new(9.0, 8.0, 6.0, 9.0))
        .unwrap();
    store
}

/// Store seeded with the default four-feature backlog
pub fn backlog_store() -> FeatureStore {
    FeatureStore::from_drafts(samples::default_backlog()).unwrap()
}

/// Simulated backend config that does not sleep
pub fn zero_latency_config() -> AssistConfig {
    AssistConfig::new().with_simulated_latency(Duration::ZERO)
}

/// In-memory model preferences with a fresh bus
pub fn memory_preferences() -> ModelPreferences {
    ModelPreferences::new(
        Arc::new(MemoryPreferenceStore::new()),
        ModelSelectionBus::default(),
    )
}

/// A recorded generation call
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub options: GenerationOptions,
}

/// Generator that replays scripted outcomes in order
///
/// Once the script runs out, the last outcome repeats.
pub struct ScriptedGenerator {
    script: Mutex<VecDeque<Result<String, String>>>,
    last: Mutex<Option<Result<String, String>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `text`
    pub fn answering(text: impl Into<String>) -> Self {
        Self::new().then_answer(text)
    }

    /// Always fail with a 503
    pub fn failing(body: impl Into<String>) -> Self {
        Self::new().then_fail(body)
    }

    pub fn then_answer(self, text: impl Into<String>) -> Self {
        self.script.lock().push_back(Ok(text.into()));
        self
    }

    pub fn then_fail(self, body: impl Into<String>) -> Self {
        self.script.lock().push_back(Err(body.into()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for ScriptedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AssistError> {
        self.calls.lock().push(RecordedCall {
            prompt: prompt.to_string(),
            options: *options,
        });

        let outcome = match self.script.lock().pop_front() {
            Some(next) => {
                *self.last.lock() = Some(next.clone());
                next
            }
            None => self
                .last
                .lock()
                .clone()
                .unwrap_or_else(|| Err("no scripted outcome".to_string())),
        };

        outcome.map_err(|body| AssistError::Server { status: 503, body })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
