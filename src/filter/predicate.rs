//! Typed predicates over a single attribute.

use serde::{Deserialize, Serialize};

use crate::data::AttributeValue;
use crate::error::{Result, VitrineError};

/// A condition on one attribute value.
///
/// Serialized with an `op` tag:
///
/// ```
/// use vitrine::filter::Predicate;
///
/// let p: Predicate = serde_json::from_str(r#"{"op": "range", "min": 1, "max": 5}"#).unwrap();
/// assert_eq!(p, Predicate::range(1.0, 5.0));
///
/// // An open bound may be omitted.
/// let p: Predicate = serde_json::from_str(r#"{"op": "range", "min": 10}"#).unwrap();
/// assert_eq!(p, Predicate::at_least(10.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Predicate {
    /// Exact, case-sensitive text equality.
    Equals { value: String },

    /// Case-insensitive substring match on text.
    Contains { value: String },

    /// Inclusive numeric range.
    Range {
        #[serde(default = "neg_infinity", skip_serializing_if = "is_neg_infinity")]
        min: f64,
        #[serde(default = "infinity", skip_serializing_if = "is_infinity")]
        max: f64,
    },
}

fn neg_infinity() -> f64 {
    f64::NEG_INFINITY
}

fn infinity() -> f64 {
    f64::INFINITY
}

fn is_neg_infinity(v: &f64) -> bool {
    *v == f64::NEG_INFINITY
}

fn is_infinity(v: &f64) -> bool {
    *v == f64::INFINITY
}

impl Predicate {
    pub fn equals(value: impl Into<String>) -> Self {
        Predicate::Equals {
            value: value.into(),
        }
    }

    pub fn contains(value: impl Into<String>) -> Self {
        Predicate::Contains {
            value: value.into(),
        }
    }

    /// `min <= value <= max`.
    pub fn range(min: f64, max: f64) -> Self {
        Predicate::Range { min, max }
    }

    /// `value >= min`.
    pub fn at_least(min: f64) -> Self {
        Predicate::Range {
            min,
            max: f64::INFINITY,
        }
    }

    /// `value <= max`.
    pub fn at_most(max: f64) -> Self {
        Predicate::Range {
            min: f64::NEG_INFINITY,
            max,
        }
    }

    /// Reject predicates that can never be evaluated meaningfully.
    pub fn validate(&self) -> Result<()> {
        match self {
            Predicate::Equals { .. } | Predicate::Contains { .. } => Ok(()),
            Predicate::Range { min, max } => {
                if min.is_nan() || max.is_nan() {
                    Err(VitrineError::invalid_predicate("range bound is NaN"))
                } else if min > max {
                    Err(VitrineError::invalid_predicate(format!(
                        "range min {min} is greater than max {max}"
                    )))
                } else {
                    Ok(())
                }
            }
        }
    }

    /// Evaluate against a value. A type mismatch is a non-match.
    pub fn matches(&self, value: &AttributeValue) -> bool {
        match (self, value) {
            (Predicate::Equals { value: expected }, AttributeValue::Text(actual)) => {
                actual == expected
            }
            (Predicate::Contains { value: needle }, AttributeValue::Text(actual)) => {
                actual.to_lowercase().contains(&needle.to_lowercase())
            }
            (Predicate::Range { min, max }, AttributeValue::Number(n)) => *min <= *n && *n <= *max,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equals_is_case_sensitive() {
        let p = Predicate::equals("Blender");
        assert!(p.matches(&AttributeValue::from("Blender")));
        assert!(!p.matches(&AttributeValue::from("blender")));
        assert!(!p.matches(&AttributeValue::from("Blender Pro")));
    }

    #[test]
    fn test_contains_is_case_insensitive() {
        let p = Predicate::contains("VACUUM");
        assert!(p.matches(&AttributeValue::from("Car Vacuum Cleaner")));
        assert!(!p.matches(&AttributeValue::from("Blender")));
    }

    #[test]
    fn test_range_is_inclusive() {
        let p = Predicate::range(1.0, 2.0);
        assert!(p.matches(&AttributeValue::Number(1.0)));
        assert!(p.matches(&AttributeValue::Number(2.0)));
        assert!(!p.matches(&AttributeValue::Number(2.5)));
    }

    #[test]
    fn test_open_ranges() {
        assert!(Predicate::at_least(10.0).matches(&AttributeValue::Number(1e9)));
        assert!(!Predicate::at_least(10.0).matches(&AttributeValue::Number(9.9)));
        assert!(Predicate::at_most(10.0).matches(&AttributeValue::Number(-1e9)));
    }

    #[test]
    fn test_type_mismatch_is_non_match() {
        assert!(!Predicate::range(0.0, 100.0).matches(&AttributeValue::from("50")));
        assert!(!Predicate::equals("50").matches(&AttributeValue::Number(50.0)));
        assert!(!Predicate::contains("5").matches(&AttributeValue::Number(50.0)));
    }

    #[test]
    fn test_validate() {
        assert!(Predicate::range(1.0, 1.0).validate().is_ok());
        assert!(Predicate::at_most(3.0).validate().is_ok());
        assert!(matches!(
            Predicate::range(2.0, 1.0).validate(),
            Err(VitrineError::InvalidPredicate(_))
        ));
        assert!(matches!(
            Predicate::range(f64::NAN, 1.0).validate(),
            Err(VitrineError::InvalidPredicate(_))
        ));
    }

    #[test]
    fn test_serde_open_bounds() {
        let json = serde_json::to_string(&Predicate::at_least(5.0)).unwrap();
        assert_eq!(json, r#"{"op":"range","min":5.0}"#);
        let back: Predicate = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Predicate::at_least(5.0));

        let unbounded =
            serde_json::to_string(&Predicate::range(f64::NEG_INFINITY, f64::INFINITY)).unwrap();
        assert_eq!(unbounded, r#"{"op":"range"}"#);
    }

    #[test]
    fn test_serde_keeps_inward_infinite_bounds() {
        let empty_high = Predicate::range(f64::INFINITY, f64::INFINITY);
        let value = serde_json::to_value(&empty_high).unwrap();
        assert!(value.get("min").is_some());
        assert!(!empty_high.matches(&AttributeValue::Number(1e300)));
        // JSON has no infinity, so the bound must not silently become open.
        assert!(serde_json::from_value::<Predicate>(value).is_err());

        let empty_low = Predicate::range(f64::NEG_INFINITY, f64::NEG_INFINITY);
        let value = serde_json::to_value(&empty_low).unwrap();
        assert!(value.get("max").is_some());
    }
}
