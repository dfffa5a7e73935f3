use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A value stored in a story flag or used as a condition literal.
///
/// Flags are loosely typed: authors may store booleans, numbers or text
/// under any key. Comparisons between incompatible variants never panic;
/// they simply do not match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FlagValue {
    /// A boolean value.
    Bool(bool),
    /// A 64-bit signed integer value.
    Integer(i64),
    /// A 64-bit floating-point value.
    Float(f64),
    /// A text value.
    Text(String),
}

impl FlagValue {
    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(n) => Some(*n as f64),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Loose equality: integers and floats compare numerically, every other
    /// pairing requires the same variant.
    pub fn loosely_equals(&self, other: &FlagValue) -> bool {
        match (self.as_f64(), other.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }

    /// Ordering between two values, when one is defined.
    ///
    /// Numbers order numerically and text orders lexicographically. Booleans
    /// and mixed pairings have no ordering.
    pub fn partial_order(&self, other: &FlagValue) -> Option<Ordering> {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => {
                let (a, b) = (self.as_f64()?, other.as_f64()?);
                a.partial_cmp(&b)
            }
        }
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for FlagValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for FlagValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<u32> for FlagValue {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for FlagValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for FlagValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for FlagValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FlagValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_shapes() {
        let values: Vec<FlagValue> = serde_json::from_str(r#"[true, 3, 2.5, "lab"]"#).unwrap();
        assert_eq!(
            values,
            vec![
                FlagValue::Bool(true),
                FlagValue::Integer(3),
                FlagValue::Float(2.5),
                FlagValue::Text("lab".to_string()),
            ]
        );
    }

    #[test]
    fn numbers_compare_across_variants() {
        assert!(FlagValue::Integer(2).loosely_equals(&FlagValue::Float(2.0)));
        assert_eq!(
            FlagValue::Integer(1).partial_order(&FlagValue::Float(1.5)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn mismatched_variants_do_not_match() {
        assert!(!FlagValue::Bool(true).loosely_equals(&FlagValue::Integer(1)));
        assert!(!FlagValue::Text("1".into()).loosely_equals(&FlagValue::Integer(1)));
        assert_eq!(FlagValue::Bool(true).partial_order(&FlagValue::Bool(false)), None);
        assert_eq!(FlagValue::Text("a".into()).partial_order(&FlagValue::Integer(1)), None);
    }

    #[test]
    fn text_orders_lexicographically() {
        assert_eq!(
            FlagValue::from("alpha").partial_order(&FlagValue::from("beta")),
            Some(Ordering::Less)
        );
    }
}
