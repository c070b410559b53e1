//! Feature store and mutation API
//!
//! Owns the working set of feature records. Every mutation validates at the
//! boundary, leaves the store untouched on failure, and restores ranked order
//! on success. Readers only ever get shared slices or cloned snapshots.
//!
//! The store does no locking; it expects a single writer. Integrations that
//! share one instance across tasks must serialize mutations themselves.

use crate::error::{FeatureError, InvalidInput};
use crate::ranker;
use crate::record::{FeatureDraft, FeatureId, FeatureRecord, RiceInputs};

/// Ranked collection of feature records
#[derive(Debug, Clone)]
pub struct FeatureStore {
    /// Records in ranked order
    records: Vec<FeatureRecord>,
    /// Next id to issue; never decremented
    next_id: u64,
}

impl FeatureStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Create a store pre-populated from drafts
    ///
    /// # Errors
    /// Fails on the first invalid draft; nothing is kept in that case.
    pub fn from_drafts<I>(drafts: I) -> Result<Self, FeatureError>
    where
        I: IntoIterator<Item = FeatureDraft>,
    {
        let mut store = Self::new();
        for draft in drafts {
            store.add_draft(draft)?;
        }
        Ok(store)
    }

    /// Add a feature
    ///
    /// Validates, assigns a fresh id, scores the record, inserts it and
    /// re-ranks the collection.
    ///
    /// # Errors
    /// - `FeatureError::InvalidFeatureInput` if the name is blank or any
    ///   criterion is outside `[1, 10]` (zero effort reports
    ///   `InvalidInput::DivisionByZero`)
    pub fn add(
        &mut self,
        name: impl Into<String>,
        inputs: RiceInputs,
    ) -> Result<FeatureId, FeatureError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InvalidInput::EmptyName.into());
        }
        inputs.validate()?;

        let id = FeatureId::new(self.next_id);
        self.next_id += 1;

        let record = FeatureRecord::scored(id, name, inputs);
        tracing::debug!(
            "Added feature {} ({}) with score {}",
            id,
            record.name(),
            record.rice_score()
        );
        self.records.push(record);
        ranker::rank(&mut self.records);

        Ok(id)
    }

    /// Add a feature from a draft
    ///
    /// # Errors
    /// Same as [`FeatureStore::add`].
    #[inline]
    pub fn add_draft(&mut self, draft: FeatureDraft) -> Result<FeatureId, FeatureError> {
        let inputs = draft.inputs();
        self.add(draft.name, inputs)
    }

    /// Remove a feature
    ///
    /// Returns whether a record was deleted. Unknown ids are a no-op.
    pub fn remove(&mut self, id: FeatureId) -> bool {
        let Some(index) = self.position(id) else {
            tracing::debug!("Remove of unknown feature {}", id);
            return false;
        };
        // Vec::remove keeps the remaining records in ranked order
        let record = self.records.remove(index);
        tracing::debug!("Removed feature {} ({})", id, record.name());
        true
    }

    /// Rescore every record from its current inputs and re-rank
    pub fn recompute_all(&mut self) -> &[FeatureRecord] {
        for record in &mut self.records {
            record.rescore();
        }
        ranker::rank(&mut self.records);
        tracing::debug!("Recomputed {} feature scores", self.records.len());
        &self.records
    }

    /// Replace a record's inputs, rescoring and re-ranking atomically
    ///
    /// # Errors
    /// - `FeatureError::InvalidFeatureInput` if the new inputs are invalid
    /// - `FeatureError::NotFound` if no record has this id
    pub fn update_inputs(
        &mut self,
        id: FeatureId,
        inputs: RiceInputs,
    ) -> Result<&FeatureRecord, FeatureError> {
        inputs.validate()?;
        let index = self.position(id).ok_or(FeatureError::NotFound(id))?;

        self.records[index].set_inputs(inputs);
        ranker::rank(&mut self.records);

        let index = self.position(id).ok_or(FeatureError::NotFound(id))?;
        let record = &self.records[index];
        tracing::debug!("Updated feature {} to score {}", id, record.rice_score());
        Ok(record)
    }

    /// Current ranked order, without recomputation
    #[inline]
    #[must_use]
    pub fn list(&self) -> &[FeatureRecord] {
        &self.records
    }

    /// Owned copy of the current ranked order
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> Vec<FeatureRecord> {
        self.records.clone()
    }

    /// Look up a record by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: FeatureId) -> Option<&FeatureRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Look up the first record (in ranked order) with this name
    #[inline]
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&FeatureRecord> {
        self.records.iter().find(|r| r.name() == name)
    }

    /// Number of records
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record has a positive score
    #[inline]
    #[must_use]
    pub fn has_scored(&self) -> bool {
        self.records.iter().any(|r| r.rice_score() > 0.0)
    }

    /// Iterate over records in ranked order
    pub fn iter(&self) -> impl Iterator<Item = &FeatureRecord> {
        self.records.iter()
    }

    fn position(&self, id: FeatureId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

impl Default for FeatureStore {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a FeatureStore {
    type Item = &'a FeatureRecord;
    type IntoIter = std::slice::Iter<'a, FeatureRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Criterion;
    use pretty_assertions::assert_eq;

    fn names(store: &FeatureStore) -> Vec<&str> {
        store.list().iter().map(FeatureRecord::name).collect()
    }

    #[test]
    fn store_new_is_empty() {
        let store = FeatureStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(!store.has_scored());
    }

    #[test]
    fn add_scores_immediately() {
        let mut store = FeatureStore::new();
        let id = store
            .add("AI Search", RiceInputs::new(8.0, 9.0, 7.0, 5.0))
            .unwrap();

        let record = store.get(id).unwrap();
        assert_eq!(record.rice_score(), 100.8);
        assert!(store.has_scored());
    }

    #[test]
    fn add_reranks() {
        let mut store = FeatureStore::new();
        store
            .add("Mobile App", RiceInputs::new(9.0, 8.0, 6.0, 9.0))
            .unwrap();
        store
            .add("AI Search", RiceInputs::new(8.0, 9.0, 7.0, 5.0))
            .unwrap();

        assert_eq!(names(&store), vec!["AI Search", "Mobile App"]);
    }

    #[test]
    fn add_rejects_blank_name() {
        let mut store = FeatureStore::new();
        let err = store.add("   ", RiceInputs::default()).unwrap_err();
        assert_eq!(err, FeatureError::InvalidFeatureInput(InvalidInput::EmptyName));
        assert!(store.is_empty());
    }

    #[test]
    fn add_rejects_out_of_range_without_consuming_id() {
        let mut store = FeatureStore::new();
        let err = store
            .add("X", RiceInputs::new(11.0, 5.0, 5.0, 5.0))
            .unwrap_err();
        assert!(matches!(
            err,
            FeatureError::InvalidFeatureInput(InvalidInput::OutOfRange {
                field: Criterion::Reach,
                ..
            })
        ));

        let err = store
            .add("X", RiceInputs::new(5.0, 5.0, 5.0, 0.0))
            .unwrap_err();
        assert!(err.is_division_by_zero());
        assert!(store.is_empty());

        let id = store.add("X", RiceInputs::default()).unwrap();
        assert_eq!(id, FeatureId::new(1));
    }

    #[test]
    fn ids_never_reused() {
        let mut store = FeatureStore::new();
        let a = store.add("a", RiceInputs::default()).unwrap();
        assert!(store.remove(a));
        let b = store.add("b", RiceInputs::default()).unwrap();
        assert_ne!(a, b);
        assert!(b > a);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut store = FeatureStore::new();
        let id = store.add("a", RiceInputs::default()).unwrap();
        store.add("b", RiceInputs::default()).unwrap();

        assert!(store.remove(id));
        assert!(!store.remove(id));
        assert_eq!(store.len(), 1);
        assert_eq!(names(&store), vec!["b"]);
    }

    #[test]
    fn update_inputs_rescores_and_reranks() {
        let mut store = FeatureStore::new();
        let low = store
            .add("low", RiceInputs::new(1.0, 1.0, 1.0, 10.0))
            .unwrap();
        store
            .add("high", RiceInputs::new(5.0, 5.0, 5.0, 5.0))
            .unwrap();
        assert_eq!(names(&store), vec!["high", "low"]);

        let updated = store
            .update_inputs(low, RiceInputs::new(10.0, 10.0, 10.0, 1.0))
            .unwrap();
        assert_eq!(updated.rice_score(), 1000.0);
        assert_eq!(names(&store), vec!["low", "high"]);
    }

    #[test]
    fn update_inputs_invalid_leaves_store_unchanged() {
        let mut store = FeatureStore::new();
        let id = store
            .add("a", RiceInputs::new(6.0, 7.0, 8.0, 4.0))
            .unwrap();
        let before = store.snapshot();

        let err = store
            .update_inputs(id, RiceInputs::new(6.0, 7.0, 8.0, 0.0))
            .unwrap_err();
        assert!(err.is_division_by_zero());
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn update_inputs_unknown_id() {
        let mut store = FeatureStore::new();
        let err = store
            .update_inputs(FeatureId::new(42), RiceInputs::default())
            .unwrap_err();
        assert_eq!(err, FeatureError::NotFound(FeatureId::new(42)));
    }

    #[test]
    fn recompute_all_is_stable() {
        let mut store = FeatureStore::new();
        store.add("a", RiceInputs::new(4.0, 1.0, 1.0, 2.0)).unwrap();
        store.add("b", RiceInputs::new(2.0, 1.0, 1.0, 1.0)).unwrap();
        store.add("c", RiceInputs::new(9.0, 9.0, 9.0, 1.0)).unwrap();

        let first: Vec<FeatureId> = store.recompute_all().iter().map(FeatureRecord::id).collect();
        let second: Vec<FeatureId> = store.recompute_all().iter().map(FeatureRecord::id).collect();
        assert_eq!(first, second);
        assert_eq!(names(&store), vec!["c", "a", "b"]);
    }

    #[test]
    fn from_drafts_stops_on_invalid() {
        let drafts = vec![
            FeatureDraft::new("ok", 5.0, 5.0, 5.0, 5.0),
            FeatureDraft::new("bad", 0.0, 5.0, 5.0, 5.0),
        ];
        assert!(FeatureStore::from_drafts(drafts).is_err());
    }

    #[test]
    fn find_by_name() {
        let mut store = FeatureStore::new();
        let id = store.add("Search", RiceInputs::default()).unwrap();
        assert_eq!(store.find_by_name("Search").map(FeatureRecord::id), Some(id));
        assert!(store.find_by_name("Nope").is_none());
    }
}
