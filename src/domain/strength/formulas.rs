//! One-rep max and rep weight formulas.
//!
//! The fatigue factor models strength lost over the prescribed volume:
//!
//! ```text
//! k = 1 - a·reps - b·sets - 0.002·reps·sets
//! ```
//!
//! A one-rep max is `weight / k · c`; the inverse gives the weight to use for
//! a rep/set scheme from a known one-rep max. Constants `a`, `b`, `c` depend
//! on the exercise [`Category`].

use std::num::NonZeroU64;

use super::values::{Category, Weight};

/// Interaction coefficient for the reps × sets term.
const VOLUME_COEFFICIENT: f64 = 0.002;

/// Reps above this make the estimate noticeably less reliable.
pub const ACCURATE_MAX_REPS: u64 = 8;

/// Sets above this make the estimate noticeably less reliable.
pub const ACCURATE_MAX_SETS: u64 = 5;

/// Calculator for strength estimates.
///
/// All functions are pure. Arguments are validated by their types, so the
/// only non-numeric outcome is `None`: the scheme implies failure before a
/// single rep and no meaningful weight exists.
pub struct StrengthCalculator;

impl StrengthCalculator {
    /// Computes the fatigue factor `k` for a rep/set scheme.
    pub fn fatigue_factor(reps: NonZeroU64, sets: NonZeroU64, category: Category) -> f64 {
        let reps = reps.get() as f64;
        let sets = sets.get() as f64;

        1.0 - category.rep_coefficient() * reps
            - category.set_coefficient() * sets
            - VOLUME_COEFFICIENT * reps * sets
    }

    /// Estimates the one-rep max from a weight lifted for `sets` × `reps`.
    ///
    /// Returns `None` when the fatigue factor is not positive.
    pub fn one_rep_max(
        weight: Weight,
        reps: NonZeroU64,
        sets: NonZeroU64,
        category: Category,
    ) -> Option<f64> {
        let k = Self::fatigue_factor(reps, sets, category);
        if k <= 0.0 {
            return None;
        }
        Some(weight.value() / k * category.scale())
    }

    /// Derives the weight to use for `sets` × `reps` from a one-rep max.
    ///
    /// Returns `None` when the result is not positive.
    pub fn target_weight(
        one_rep_max: Weight,
        reps: NonZeroU64,
        sets: NonZeroU64,
        category: Category,
    ) -> Option<f64> {
        let k = Self::fatigue_factor(reps, sets, category);
        let result = one_rep_max.value() * k / category.scale();
        if result <= 0.0 {
            return None;
        }
        Some(result)
    }

    /// True when the scheme is outside the range the formulas were fitted on.
    pub fn needs_accuracy_caveat(reps: NonZeroU64, sets: NonZeroU64) -> bool {
        reps.get() > ACCURATE_MAX_REPS || sets.get() > ACCURATE_MAX_SETS
    }
}
