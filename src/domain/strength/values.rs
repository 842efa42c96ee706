//! Validated inputs for the strength formulas.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A lifted load or one-rep max, in whatever unit the user types.
///
/// Always finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Weight(f64);

impl Weight {
    /// Creates a weight, rejecting zero, negative and non-finite values.
    pub fn new(value: f64) -> Result<Self, ValidationError> {
        if value.is_finite() && value > 0.0 {
            Ok(Self(value))
        } else {
            Err(ValidationError::not_positive("weight", value))
        }
    }

    /// Returns the raw value.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Exercise classification selecting which empirical constants apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Upper-body lifts (bench press).
    Upper,
    /// Lower-body lifts (squat, deadlift).
    Lower,
}

impl Category {
    /// Returns all categories.
    pub fn all() -> &'static [Category] {
        &[Category::Upper, Category::Lower]
    }

    /// Internal code, as stored in session records.
    pub fn code(&self) -> &'static str {
        match self {
            Category::Upper => "upper",
            Category::Lower => "lower",
        }
    }

    /// Per-rep decay coefficient `a`.
    pub(crate) fn rep_coefficient(&self) -> f64 {
        match self {
            Category::Upper => 0.02,
            Category::Lower => 0.03,
        }
    }

    /// Per-set decay coefficient `b`.
    pub(crate) fn set_coefficient(&self) -> f64 {
        match self {
            Category::Upper | Category::Lower => 0.01,
        }
    }

    /// Scaling constant `c` applied to the estimate.
    pub(crate) fn scale(&self) -> f64 {
        match self {
            Category::Upper => 0.97,
            Category::Lower => 0.96,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_accepts_positive_values() {
        assert_eq!(Weight::new(60.0).unwrap().value(), 60.0);
        assert_eq!(Weight::new(0.5).unwrap().value(), 0.5);
    }

    #[test]
    fn weight_rejects_zero_negative_and_non_finite() {
        for value in [0.0, -0.0, -5.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(Weight::new(value).is_err(), "{} should be rejected", value);
        }
    }

    #[test]
    fn weight_displays_without_trailing_zeroes() {
        assert_eq!(Weight::new(60.0).unwrap().to_string(), "60");
        assert_eq!(Weight::new(62.5).unwrap().to_string(), "62.5");
    }

    #[test]
    fn category_serializes_to_code() {
        assert_eq!(serde_json::to_string(&Category::Upper).unwrap(), "\"upper\"");
        let lower: Category = serde_json::from_str("\"lower\"").unwrap();
        assert_eq!(lower, Category::Lower);
    }

    #[test]
    fn category_rejects_unknown_code() {
        assert!(serde_json::from_str::<Category>("\"core\"").is_err());
    }
}
