//! Flat save-state snapshots.
//!
//! Maps and sets are flattened into sorted association lists so that a saved
//! game serializes the same way every time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tale_core::FlagValue;

use crate::error::EngineResult;
use crate::state::{NarrativeGameState, StoryProgress};

/// A flat, serializable copy of an engine's state and progress log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveState {
    /// The scene the player is in.
    pub current_scene_id: String,
    /// Item presence pairs.
    pub inventory: Vec<(String, bool)>,
    /// Story flag pairs.
    pub story_flags: Vec<(String, FlagValue)>,
    /// Relationship pairs.
    pub character_relationships: Vec<(String, i64)>,
    /// Visited scene ids.
    pub visited_scenes: Vec<String>,
    /// Choices processed.
    pub total_choices: u32,
    /// Points earned.
    pub total_points: u32,
    /// Start of the play-through.
    pub start_time: DateTime<Utc>,
    /// Last state change.
    pub last_save_time: DateTime<Utc>,
    /// Objectives completed.
    pub completed_objectives: Vec<String>,
    /// The full progress log.
    pub progress_history: Vec<StoryProgress>,
}

impl SaveState {
    /// Flatten a state and its progress log.
    pub fn capture(state: &NarrativeGameState, history: &[StoryProgress]) -> Self {
        let mut inventory: Vec<_> = state
            .inventory
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        inventory.sort_by(|a, b| a.0.cmp(&b.0));

        let mut story_flags: Vec<_> = state
            .story_flags
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        story_flags.sort_by(|a, b| a.0.cmp(&b.0));

        let mut character_relationships: Vec<_> = state
            .character_relationships
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect();
        character_relationships.sort_by(|a, b| a.0.cmp(&b.0));

        let mut visited_scenes: Vec<_> = state.visited_scenes.iter().cloned().collect();
        visited_scenes.sort();

        Self {
            current_scene_id: state.current_scene_id.clone(),
            inventory,
            story_flags,
            character_relationships,
            visited_scenes,
            total_choices: state.total_choices,
            total_points: state.total_points,
            start_time: state.start_time,
            last_save_time: state.last_save_time,
            completed_objectives: state.completed_objectives.clone(),
            progress_history: history.to_vec(),
        }
    }

    /// Rebuild the state and progress log.
    pub fn restore(self) -> (NarrativeGameState, Vec<StoryProgress>) {
        let state = NarrativeGameState {
            current_scene_id: self.current_scene_id,
            inventory: self.inventory.into_iter().collect(),
            story_flags: self.story_flags.into_iter().collect(),
            character_relationships: self.character_relationships.into_iter().collect(),
            visited_scenes: self.visited_scenes.into_iter().collect(),
            total_choices: self.total_choices,
            total_points: self.total_points,
            start_time: self.start_time,
            last_save_time: self.last_save_time,
            completed_objectives: self.completed_objectives,
        };
        (state, self.progress_history)
    }

    /// Serialize as JSON.
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tale_core::GameAction;

    fn sample_state() -> NarrativeGameState {
        let t = DateTime::from_timestamp(1_700_000_000, 250_000_000).unwrap();
        let mut state = NarrativeGameState::new("scene_2", t);
        state.apply_action(&GameAction::add_item("compass"));
        state.apply_action(&GameAction::add_item("map"));
        state.apply_action(&GameAction::set_flag("weather", "storm"));
        state.apply_action(&GameAction::set_flag("level", 2.5));
        state.apply_action(&GameAction::modify_relationship("guide", 2));
        state.visited_scenes.insert("scene_1".into());
        state.visited_scenes.insert("scene_2".into());
        state.total_choices = 1;
        state.total_points = 10;
        state.complete_objective("navigation");
        state
    }

    #[test]
    fn lists_are_sorted() {
        let snap = SaveState::capture(&sample_state(), &[]);
        assert_eq!(
            snap.inventory,
            vec![("compass".to_string(), true), ("map".to_string(), true)]
        );
        assert_eq!(snap.visited_scenes, vec!["scene_1", "scene_2"]);
        assert_eq!(snap.story_flags[0].0, "level");
    }

    #[test]
    fn json_round_trip_is_lossless() {
        let state = sample_state();
        let history = vec![StoryProgress {
            scene_id: "scene_1".into(),
            choice_id: "choice_1".into(),
            timestamp: state.last_save_time,
            time_spent: 4_200,
            educational_value: 5,
        }];
        let json = SaveState::capture(&state, &history).to_json().unwrap();
        let (restored, restored_history) = SaveState::from_json(&json).unwrap().restore();
        assert_eq!(restored, state);
        assert_eq!(restored_history, history);
    }

    #[test]
    fn field_names_follow_save_format() {
        let json = SaveState::capture(&sample_state(), &[]).to_json().unwrap();
        for field in [
            "currentSceneId",
            "inventory",
            "storyFlags",
            "characterRelationships",
            "visitedScenes",
            "totalChoices",
            "totalPoints",
            "startTime",
            "lastSaveTime",
            "completedObjectives",
            "progressHistory",
        ] {
            assert!(json.contains(&format!("\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn malformed_snapshot_is_an_error() {
        assert!(SaveState::from_json(r#"{"currentSceneId": 3}"#).is_err());
    }
}
