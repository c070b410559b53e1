//! RICE scorer
//!
//! `score = round2((reach * impact * confidence) / effort)`
//!
//! Rounding is half away from zero at two decimal places. The scorer does
//! not validate its inputs; callers go through the store, which rejects
//! out-of-range values and zero effort before scoring.

use crate::record::RiceInputs;

/// Number of decimal places kept in a RICE score
pub const SCORE_DECIMALS: i32 = 2;

/// Compute the RICE score for four raw inputs
#[inline]
#[must_use]
pub fn score(reach: f64, impact: f64, confidence: f64, effort: f64) -> f64 {
    round_to(reach * impact * confidence / effort, SCORE_DECIMALS)
}

/// Compute the RICE score for a validated input set
#[inline]
#[must_use]
pub fn score_inputs(inputs: &RiceInputs) -> f64 {
    score(
        inputs.reach(),
        inputs.impact(),
        inputs.confidence(),
        inputs.effort(),
    )
}

/// Round half away from zero to `decimals` places
#[inline]
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
