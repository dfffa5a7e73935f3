//! Actions that modify player state when a choice is taken.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::FlagValue;

/// Story flag prefix set by [`GameAction::UnlockScene`].
pub const UNLOCKED_FLAG_PREFIX: &str = "unlocked_";

/// A side-effecting instruction executed when a choice is selected.
///
/// Actions run strictly in list order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameAction {
    /// Put an item into the inventory.
    AddItem {
        /// Item key.
        target: String,
        /// Message shown to the player.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Take an item out of the inventory.
    RemoveItem {
        /// Item key.
        target: String,
        /// Message shown to the player.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Set a story flag.
    SetFlag {
        /// Flag key.
        target: String,
        /// New value.
        value: FlagValue,
        /// Message shown to the player.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Shift a relationship score by a delta.
    ModifyRelationship {
        /// Character key.
        target: String,
        /// Delta added to the current score.
        value: i64,
        /// Message shown to the player.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Award points.
    AddPoints {
        /// Points added to the total.
        value: u32,
        /// Message shown to the player.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
    /// Mark a scene as unlocked by setting the flag `unlocked_<target>`.
    UnlockScene {
        /// Scene id.
        target: String,
        /// Message shown to the player.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        message: Option<String>,
    },
}

impl GameAction {
    /// Add `item` to the inventory.
    pub fn add_item(item: impl Into<String>) -> Self {
        Self::AddItem {
            target: item.into(),
            message: None,
        }
    }

    /// Remove `item` from the inventory.
    pub fn remove_item(item: impl Into<String>) -> Self {
        Self::RemoveItem {
            target: item.into(),
            message: None,
        }
    }

    /// Set flag `key` to `value`.
    pub fn set_flag(key: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        Self::SetFlag {
            target: key.into(),
            value: value.into(),
            message: None,
        }
    }

    /// Shift the relationship with `character` by `delta`.
    pub fn modify_relationship(character: impl Into<String>, delta: i64) -> Self {
        Self::ModifyRelationship {
            target: character.into(),
            value: delta,
            message: None,
        }
    }

    /// Award `points`.
    pub fn add_points(points: u32) -> Self {
        Self::AddPoints {
            value: points,
            message: None,
        }
    }

    /// Unlock `scene_id`.
    pub fn unlock_scene(scene_id: impl Into<String>) -> Self {
        Self::UnlockScene {
            target: scene_id.into(),
            message: None,
        }
    }

    /// Attach a player-facing message.
    pub fn with_message(mut self, text: impl Into<String>) -> Self {
        let slot = match &mut self {
            Self::AddItem { message, .. }
            | Self::RemoveItem { message, .. }
            | Self::SetFlag { message, .. }
            | Self::ModifyRelationship { message, .. }
            | Self::AddPoints { message, .. }
            | Self::UnlockScene { message, .. } => message,
        };
        *slot = Some(text.into());
        self
    }

    /// The player-facing message, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::AddItem { message, .. }
            | Self::RemoveItem { message, .. }
            | Self::SetFlag { message, .. }
            | Self::ModifyRelationship { message, .. }
            | Self::AddPoints { message, .. }
            | Self::UnlockScene { message, .. } => message.as_deref(),
        }
    }

    /// Flag key written by an `UnlockScene` action for `scene_id`.
    pub fn unlocked_flag(scene_id: &str) -> String {
        format!("{UNLOCKED_FLAG_PREFIX}{scene_id}")
    }
}

impl fmt::Display for GameAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddItem { target, .. } => write!(f, "add_item {target}"),
            Self::RemoveItem { target, .. } => write!(f, "remove_item {target}"),
            Self::SetFlag { target, value, .. } => write!(f, "set_flag {target}={value}"),
            Self::ModifyRelationship { target, value, .. } => {
                write!(f, "modify_relationship {target} {value:+}")
            }
            Self::AddPoints { value, .. } => write!(f, "add_points {value}"),
            Self::UnlockScene { target, .. } => write!(f, "unlock_scene {target}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tagged_json_shape() {
        let action = GameAction::modify_relationship("mentor", 2).with_message("Dr. Vega nods.");
        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "modify_relationship",
                "target": "mentor",
                "value": 2,
                "message": "Dr. Vega nods."
            })
        );
    }

    #[test]
    fn parses_flag_with_untyped_value() {
        let json = r#"{"type":"set_flag","target":"solved","value":true}"#;
        let action: GameAction = serde_json::from_str(json).unwrap();
        assert_eq!(action, GameAction::set_flag("solved", true));
        assert_eq!(action.message(), None);
    }

    #[test]
    fn message_is_attached_to_any_variant() {
        let action = GameAction::add_points(5).with_message("+5");
        assert_eq!(action.message(), Some("+5"));
        let action = GameAction::unlock_scene("scene_4").with_message("A door opens.");
        assert_eq!(action.message(), Some("A door opens."));
    }

    #[test]
    fn unknown_action_type_is_rejected() {
        let json = r#"{"type":"teleport","target":"moon"}"#;
        assert!(serde_json::from_str::<GameAction>(json).is_err());
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(
            GameAction::modify_relationship("guide", -1).to_string(),
            "modify_relationship guide -1"
        );
        assert_eq!(GameAction::unlocked_flag("scene_3"), "unlocked_scene_3");
    }
}
