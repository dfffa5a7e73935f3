//! Condition evaluation for scenes and choices.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::FlagValue;

/// Which part of the player state a condition reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConditionKind {
    /// Inventory presence of `key`.
    Item,
    /// The story flag stored under `key`.
    Flag,
    /// The relationship score of character `key` (0 when absent).
    Relationship,
    /// Whether scene `key` has been visited.
    Visited,
    /// The current total points; `key` is ignored.
    Score,
    /// A kind this version does not understand. Always evaluates to false.
    Unrecognized(String),
}

impl From<String> for ConditionKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "item" => Self::Item,
            "flag" => Self::Flag,
            "relationship" => Self::Relationship,
            "visited" => Self::Visited,
            "score" => Self::Score,
            _ => Self::Unrecognized(s),
        }
    }
}

impl From<ConditionKind> for String {
    fn from(kind: ConditionKind) -> Self {
        kind.to_string()
    }
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item => write!(f, "item"),
            Self::Flag => write!(f, "flag"),
            Self::Relationship => write!(f, "relationship"),
            Self::Visited => write!(f, "visited"),
            Self::Score => write!(f, "score"),
            Self::Unrecognized(s) => write!(f, "{s}"),
        }
    }
}

/// Comparison operator of a condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Operator {
    /// `==`
    Eq,
    /// `!=`
    Ne,
    /// `>`
    Gt,
    /// `<`
    Lt,
    /// `>=`
    Ge,
    /// `<=`
    Le,
    /// An operator this version does not understand. Always evaluates to false.
    Unrecognized(String),
}

impl Operator {
    /// Compare the value read from state against the condition literal.
    ///
    /// `actual` is `None` when the state holds nothing under the key (an unset
    /// flag). A missing value is unequal to everything and unordered.
    pub fn compare(&self, actual: Option<&FlagValue>, expected: &FlagValue) -> bool {
        let ordering = actual.and_then(|a| a.partial_order(expected));
        match self {
            Self::Eq => actual.is_some_and(|a| a.loosely_equals(expected)),
            Self::Ne => !actual.is_some_and(|a| a.loosely_equals(expected)),
            Self::Gt => ordering == Some(Ordering::Greater),
            Self::Lt => ordering == Some(Ordering::Less),
            Self::Ge => matches!(ordering, Some(Ordering::Greater | Ordering::Equal)),
            Self::Le => matches!(ordering, Some(Ordering::Less | Ordering::Equal)),
            Self::Unrecognized(_) => false,
        }
    }
}

impl From<String> for Operator {
    fn from(s: String) -> Self {
        match s.as_str() {
            "==" => Self::Eq,
            "!=" => Self::Ne,
            ">" => Self::Gt,
            "<" => Self::Lt,
            ">=" => Self::Ge,
            "<=" => Self::Le,
            _ => Self::Unrecognized(s),
        }
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> Self {
        op.to_string()
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Gt => ">",
            Self::Lt => "<",
            Self::Ge => ">=",
            Self::Le => "<=",
            Self::Unrecognized(s) => s.as_str(),
        };
        write!(f, "{symbol}")
    }
}

/// Read-only view of player state that conditions are evaluated against.
pub trait StateView {
    /// Whether the inventory holds `item`.
    fn has_item(&self, item: &str) -> bool;
    /// The story flag stored under `key`, if any.
    fn flag(&self, key: &str) -> Option<&FlagValue>;
    /// Relationship score with `character` (0 when absent).
    fn relationship(&self, character: &str) -> i64;
    /// Whether `scene_id` has been entered.
    fn has_visited(&self, scene_id: &str) -> bool;
    /// Points accumulated so far.
    fn total_points(&self) -> u32;
}

/// A predicate gating a scene or a choice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneCondition {
    /// Which part of the state to read.
    #[serde(rename = "type")]
    pub kind: ConditionKind,
    /// Key into the selected state component.
    pub key: String,
    /// The literal compared against.
    pub value: FlagValue,
    /// How the state value is compared with `value`.
    pub operator: Operator,
}

impl SceneCondition {
    /// Create a condition from its parts.
    pub fn new(
        kind: ConditionKind,
        key: impl Into<String>,
        operator: Operator,
        value: impl Into<FlagValue>,
    ) -> Self {
        Self {
            kind,
            key: key.into(),
            value: value.into(),
            operator,
        }
    }

    /// The player carries `item`.
    pub fn has_item(item: impl Into<String>) -> Self {
        Self::new(ConditionKind::Item, item, Operator::Eq, true)
    }

    /// Scene `scene_id` has been visited.
    pub fn visited(scene_id: impl Into<String>) -> Self {
        Self::new(ConditionKind::Visited, scene_id, Operator::Eq, true)
    }

    /// Total points are at least `points`.
    pub fn score_at_least(points: u32) -> Self {
        Self::new(
            ConditionKind::Score,
            "totalPoints",
            Operator::Ge,
            i64::from(points),
        )
    }

    /// Relationship with `character` is at least `level`.
    pub fn relationship_at_least(character: impl Into<String>, level: i64) -> Self {
        Self::new(ConditionKind::Relationship, character, Operator::Ge, level)
    }

    /// Evaluate the condition against the given state.
    pub fn evaluate(&self, state: &impl StateView) -> bool {
        let actual = match &self.kind {
            ConditionKind::Item => FlagValue::Bool(state.has_item(&self.key)),
            ConditionKind::Flag => return self.operator.compare(state.flag(&self.key), &self.value),
            ConditionKind::Relationship => FlagValue::Integer(state.relationship(&self.key)),
            ConditionKind::Visited => FlagValue::Bool(state.has_visited(&self.key)),
            ConditionKind::Score => FlagValue::Integer(i64::from(state.total_points())),
            ConditionKind::Unrecognized(_) => return false,
        };
        self.operator.compare(Some(&actual), &self.value)
    }
}

impl fmt::Display for SceneCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} {}", self.kind, self.key, self.operator, self.value)
    }
}

/// True iff every condition holds. An empty list always holds.
pub fn evaluate_all(conditions: &[SceneCondition], state: &impl StateView) -> bool {
    conditions.iter().all(|c| c.evaluate(state))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    #[derive(Default)]
    struct TestState {
        items: HashSet<String>,
        flags: HashMap<String, FlagValue>,
        relationships: HashMap<String, i64>,
        visited: HashSet<String>,
        points: u32,
    }

    impl StateView for TestState {
        fn has_item(&self, item: &str) -> bool {
            self.items.contains(item)
        }
        fn flag(&self, key: &str) -> Option<&FlagValue> {
            self.flags.get(key)
        }
        fn relationship(&self, character: &str) -> i64 {
            self.relationships.get(character).copied().unwrap_or(0)
        }
        fn has_visited(&self, scene_id: &str) -> bool {
            self.visited.contains(scene_id)
        }
        fn total_points(&self) -> u32 {
            self.points
        }
    }

    #[test]
    fn item_presence() {
        let mut state = TestState::default();
        let cond = SceneCondition::has_item("lab_notes");
        assert!(!cond.evaluate(&state));

        state.items.insert("lab_notes".to_string());
        assert!(cond.evaluate(&state));
    }

    #[test]
    fn score_threshold() {
        let mut state = TestState {
            points: 29,
            ..Default::default()
        };
        let cond = SceneCondition::score_at_least(30);
        assert!(!cond.evaluate(&state));

        state.points = 30;
        assert!(cond.evaluate(&state));
    }

    #[test]
    fn relationship_defaults_to_zero() {
        let state = TestState::default();
        let at_zero = SceneCondition::new(ConditionKind::Relationship, "mentor", Operator::Eq, 0);
        assert!(at_zero.evaluate(&state));
        assert!(!SceneCondition::relationship_at_least("mentor", 1).evaluate(&state));
    }

    #[test]
    fn unset_flag() {
        let state = TestState::default();
        let eq = SceneCondition::new(ConditionKind::Flag, "door", Operator::Eq, "open");
        let ne = SceneCondition::new(ConditionKind::Flag, "door", Operator::Ne, "open");
        let gt = SceneCondition::new(ConditionKind::Flag, "door", Operator::Gt, 1);
        assert!(!eq.evaluate(&state));
        assert!(ne.evaluate(&state));
        assert!(!gt.evaluate(&state));
    }

    #[test]
    fn text_flag_with_numeric_operator_is_false() {
        let mut state = TestState::default();
        state.flags.insert("mood".into(), FlagValue::from("calm"));
        let cond = SceneCondition::new(ConditionKind::Flag, "mood", Operator::Gt, 3);
        assert!(!cond.evaluate(&state));
    }

    #[test]
    fn visited_scene() {
        let mut state = TestState::default();
        let cond = SceneCondition::visited("scene_2");
        assert!(!cond.evaluate(&state));
        state.visited.insert("scene_2".into());
        assert!(cond.evaluate(&state));
    }

    #[test]
    fn unrecognized_parts_fail_closed() {
        let json = r#"{"type":"weather","key":"sky","value":"blue","operator":"=="}"#;
        let cond: SceneCondition = serde_json::from_str(json).unwrap();
        assert_eq!(cond.kind, ConditionKind::Unrecognized("weather".into()));
        assert!(!cond.evaluate(&TestState::default()));

        let json = r#"{"type":"score","key":"totalPoints","value":0,"operator":"=~"}"#;
        let cond: SceneCondition = serde_json::from_str(json).unwrap();
        assert_eq!(cond.operator, Operator::Unrecognized("=~".into()));
        assert!(!cond.evaluate(&TestState::default()));
    }

    #[test]
    fn conditions_combine_with_and() {
        let mut state = TestState {
            points: 50,
            ..Default::default()
        };
        let conds = vec![
            SceneCondition::score_at_least(30),
            SceneCondition::has_item("key"),
        ];
        assert!(!evaluate_all(&conds, &state));
        state.items.insert("key".into());
        assert!(evaluate_all(&conds, &state));
        assert!(evaluate_all(&[], &state));
    }

    #[test]
    fn serialized_shape() {
        let cond = SceneCondition::score_at_least(30);
        let json = serde_json::to_value(&cond).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "score", "key": "totalPoints", "value": 30, "operator": ">="})
        );
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn score_ge_matches_integer_comparison(points in 0u32..500, threshold in 0u32..500) {
                let state = TestState { points, ..Default::default() };
                let cond = SceneCondition::score_at_least(threshold);
                prop_assert_eq!(cond.evaluate(&state), points >= threshold);
            }

            #[test]
            fn relationship_operators_agree_with_i64(level in -50i64..50, literal in -50i64..50) {
                let mut state = TestState::default();
                state.relationships.insert("guide".into(), level);
                let check = |op: Operator| {
                    SceneCondition::new(ConditionKind::Relationship, "guide", op, literal).evaluate(&state)
                };
                prop_assert_eq!(check(Operator::Eq), level == literal);
                prop_assert_eq!(check(Operator::Ne), level != literal);
                prop_assert_eq!(check(Operator::Gt), level > literal);
                prop_assert_eq!(check(Operator::Lt), level < literal);
                prop_assert_eq!(check(Operator::Ge), level >= literal);
                prop_assert_eq!(check(Operator::Le), level <= literal);
            }
        }
    }
}
