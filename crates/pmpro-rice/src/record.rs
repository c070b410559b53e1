//! Feature records and their scoring inputs
//!
//! A [`FeatureRecord`] is only constructed by the store, which guarantees
//! that its score was computed from its current inputs. Fields are private
//! so external code cannot desynchronise the two.

use crate::error::InvalidInput;
use crate::scorer;
use serde::{Deserialize, Serialize};

/// Inclusive lower bound for every criterion
pub const MIN_CRITERION: f64 = 1.0;

/// Inclusive upper bound for every criterion
pub const MAX_CRITERION: f64 = 10.0;

/// Default slider position for new drafts
pub const DEFAULT_CRITERION: f64 = 5.0;

/// Unique feature identifier
///
/// Issued from a per-store monotonic counter: ascending id order is
/// creation order, and ids are never reused after deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureId(u64);

impl FeatureId {
    /// Wrap a raw id value
    #[inline]
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for FeatureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The four RICE criteria
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Criterion {
    /// How many users the feature reaches
    Reach,
    /// Impact per user
    Impact,
    /// Confidence in the estimates
    Confidence,
    /// Cost to build (denominator)
    Effort,
}

impl Criterion {
    /// All criteria in display order
    pub const ALL: [Criterion; 4] = [
        Criterion::Reach,
        Criterion::Impact,
        Criterion::Confidence,
        Criterion::Effort,
    ];

    /// Lowercase name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::Reach => "reach",
            Criterion::Impact => "impact",
            Criterion::Confidence => "confidence",
            Criterion::Effort => "effort",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw scoring inputs for one feature
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiceInputs {
    reach: f64,
    impact: f64,
    confidence: f64,
    effort: f64,
}

impl RiceInputs {
    /// Create an input set (unvalidated)
    #[inline]
    #[must_use]
    pub const fn new(reach: f64, impact: f64, confidence: f64, effort: f64) -> Self {
        Self {
            reach,
            impact,
            confidence,
            effort,
        }
    }

    /// Reach value
    #[inline]
    #[must_use]
    pub fn reach(&self) -> f64 {
        self.reach
    }

    /// Impact value
    #[inline]
    #[must_use]
    pub fn impact(&self) -> f64 {
        self.impact
    }

    /// Confidence value
    #[inline]
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Effort value
    #[inline]
    #[must_use]
    pub fn effort(&self) -> f64 {
        self.effort
    }

    /// Value of one criterion
    #[inline]
    #[must_use]
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::Reach => self.reach,
            Criterion::Impact => self.impact,
            Criterion::Confidence => self.confidence,
            Criterion::Effort => self.effort,
        }
    }

    /// Check every criterion against `[1, 10]`
    ///
    /// # Errors
    /// - `InvalidInput::NotFinite` for NaN or infinite values
    /// - `InvalidInput::DivisionByZero` for zero effort
    /// - `InvalidInput::OutOfRange` for anything else outside the range
    pub fn validate(&self) -> Result<(), InvalidInput> {
        for field in Criterion::ALL {
            let value = self.get(field);
            if !value.is_finite() {
                return Err(InvalidInput::NotFinite { field });
            }
            if field == Criterion::Effort && value == 0.0 {
                return Err(InvalidInput::DivisionByZero);
            }
            if !(MIN_CRITERION..=MAX_CRITERION).contains(&value) {
                return Err(InvalidInput::OutOfRange {
                    field,
                    value,
                    min: MIN_CRITERION,
                    max: MAX_CRITERION,
                });
            }
        }
        Ok(())
    }
}

impl Default for RiceInputs {
    fn default() -> Self {
        Self::new(
            DEFAULT_CRITERION,
            DEFAULT_CRITERION,
            DEFAULT_CRITERION,
            DEFAULT_CRITERION,
        )
    }
}

/// User-supplied feature proposal, not yet admitted to a store
///
/// Deserialization requires every field. [`FeatureDraft::default`] is the
/// blank form, not a fill-in for missing data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureDraft {
    /// Display label
    pub name: String,
    /// Reach (1-10)
    pub reach: f64,
    /// Impact (1-10)
    pub impact: f64,
    /// Confidence (1-10)
    pub confidence: f64,
    /// Effort (1-10)
    pub effort: f64,
}

impl FeatureDraft {
    /// Create a draft with all four criteria
    #[inline]
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        reach: f64,
        impact: f64,
        confidence: f64,
        effort: f64,
    ) -> Self {
        Self {
            name: name.into(),
            reach,
            impact,
            confidence,
            effort,
        }
    }

    /// Scoring inputs of this draft
    #[inline]
    #[must_use]
    pub fn inputs(&self) -> RiceInputs {
        RiceInputs::new(self.reach, self.impact, self.confidence, self.effort)
    }
}

impl Default for FeatureDraft {
    fn default() -> Self {
        Self::new(
            "",
            DEFAULT_CRITERION,
            DEFAULT_CRITERION,
            DEFAULT_CRITERION,
            DEFAULT_CRITERION,
        )
    }
}

/// A scored feature held by a [`FeatureStore`](crate::FeatureStore)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureRecord {
    id: FeatureId,
    name: String,
    #[serde(flatten)]
    inputs: RiceInputs,
    rice_score: f64,
}

impl FeatureRecord {
    /// Build a record whose score is derived from `inputs`
    pub(crate) fn scored(id: FeatureId, name: String, inputs: RiceInputs) -> Self {
        Self {
            id,
            name,
            rice_score: scorer::score_inputs(&inputs),
            inputs,
        }
    }

    /// Replace inputs and rescore
    pub(crate) fn set_inputs(&mut self, inputs: RiceInputs) {
        self.inputs = inputs;
        self.rescore();
    }

    /// Recompute the score from current inputs
    pub(crate) fn rescore(&mut self) {
        self.rice_score = scorer::score_inputs(&self.inputs);
    }

    /// Record id
    #[inline]
    #[must_use]
    pub fn id(&self) -> FeatureId {
        self.id
    }

    /// Display label
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scoring inputs
    #[inline]
    #[must_use]
    pub fn inputs(&self) -> &RiceInputs {
        &self.inputs
    }

    /// Reach value
    #[inline]
    #[must_use]
    pub fn reach(&self) -> f64 {
        self.inputs.reach
    }

    /// Impact value
    #[inline]
    #[must_use]
    pub fn impact(&self) -> f64 {
        self.inputs.impact
    }

    /// Confidence value
    #[inline]
    #[must_use]
    pub fn confidence(&self) -> f64 {
        self.inputs.confidence
    }

    /// Effort value
    #[inline]
    #[must_use]
    pub fn effort(&self) -> f64 {
        self.inputs.effort
    }

    /// Derived RICE score
    #[inline]
    #[must_use]
    pub fn rice_score(&self) -> f64 {
        self.rice_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn inputs_validate_accepts_bounds() {
        assert!(RiceInputs::new(1.0, 1.0, 1.0, 1.0).validate().is_ok());
        assert!(RiceInputs::new(10.0, 10.0, 10.0, 10.0).validate().is_ok());
        assert!(RiceInputs::new(2.5, 7.25, 9.9, 1.1).validate().is_ok());
    }

    #[test]
    fn inputs_validate_rejects_out_of_range() {
        let err = RiceInputs::new(11.0, 5.0, 5.0, 5.0).validate().unwrap_err();
        assert!(matches!(
            err,
            InvalidInput::OutOfRange {
                field: Criterion::Reach,
                ..
            }
        ));

        let err = RiceInputs::new(5.0, 5.0, 0.5, 5.0).validate().unwrap_err();
        assert!(matches!(
            err,
            InvalidInput::OutOfRange {
                field: Criterion::Confidence,
                ..
            }
        ));
    }

    #[test]
    fn inputs_validate_zero_effort_is_division_by_zero() {
        let err = RiceInputs::new(5.0, 5.0, 5.0, 0.0).validate().unwrap_err();
        assert_eq!(err, InvalidInput::DivisionByZero);
    }

    #[test]
    fn inputs_validate_rejects_nan() {
        let err = RiceInputs::new(5.0, f64::NAN, 5.0, 5.0)
            .validate()
            .unwrap_err();
        assert_eq!(
            err,
            InvalidInput::NotFinite {
                field: Criterion::Impact
            }
        );
    }

    #[test]
    fn draft_defaults_match_form() {
        let draft = FeatureDraft::default();
        assert!(draft.name.is_empty());
        assert_eq!(draft.inputs(), RiceInputs::default());
        assert_eq!(draft.reach, 5.0);
    }

    #[test]
    fn draft_requires_every_criterion() {
        let err = serde_json::from_str::<FeatureDraft>(
            r#"{"name":"Search","reach":10,"impact":10,"confidence":10}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("missing field `effort`"));

        let draft: FeatureDraft = serde_json::from_str(
            r#"{"name":"Search","reach":8,"impact":9,"confidence":7,"effort":5}"#,
        )
        .unwrap();
        assert_eq!(draft, FeatureDraft::new("Search", 8.0, 9.0, 7.0, 5.0));
    }

    #[test]
    fn record_serializes_camel_case() {
        let record = FeatureRecord::scored(
            FeatureId::new(1),
            "AI Search".to_string(),
            RiceInputs::new(8.0, 9.0, 7.0, 5.0),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["name"], "AI Search");
        assert_eq!(json["reach"], 8.0);
        assert_eq!(json["effort"], 5.0);
        assert_eq!(json["riceScore"], 100.8);
    }

    #[test]
    fn record_rescore_follows_inputs() {
        let mut record = FeatureRecord::scored(
            FeatureId::new(1),
            "x".to_string(),
            RiceInputs::new(6.0, 7.0, 8.0, 4.0),
        );
        assert_eq!(record.rice_score(), 84.0);

        record.set_inputs(RiceInputs::new(9.0, 8.0, 6.0, 9.0));
        assert_eq!(record.rice_score(), 48.0);
        assert_eq!(record.reach(), 9.0);
    }

    #[test]
    fn criterion_display() {
        assert_eq!(Criterion::Confidence.to_string(), "confidence");
        assert_eq!(Criterion::ALL.len(), 4);
    }
}
