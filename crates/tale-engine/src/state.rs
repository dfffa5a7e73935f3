//! Runtime player state and the append-only progress log.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tale_core::{FlagValue, GameAction, StateView};

/// Everything the engine knows about one play-through.
#[derive(Debug, Clone, PartialEq)]
pub struct NarrativeGameState {
    /// The scene the player is in.
    pub current_scene_id: String,
    /// Item presence by key.
    pub inventory: HashMap<String, bool>,
    /// Story flags by key.
    pub story_flags: HashMap<String, FlagValue>,
    /// Relationship scores by character key.
    pub character_relationships: HashMap<String, i64>,
    /// Scenes ever entered. Never shrinks.
    pub visited_scenes: HashSet<String>,
    /// Choices processed so far.
    pub total_choices: u32,
    /// Points accumulated so far.
    pub total_points: u32,
    /// When the play-through began.
    pub start_time: DateTime<Utc>,
    /// When the state last changed.
    pub last_save_time: DateTime<Utc>,
    /// Objectives marked complete by the caller.
    pub completed_objectives: Vec<String>,
}

impl NarrativeGameState {
    /// Fresh state positioned at `scene_id`.
    pub fn new(scene_id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            current_scene_id: scene_id.into(),
            inventory: HashMap::new(),
            story_flags: HashMap::new(),
            character_relationships: HashMap::new(),
            visited_scenes: HashSet::new(),
            total_choices: 0,
            total_points: 0,
            start_time: now,
            last_save_time: now,
            completed_objectives: Vec::new(),
        }
    }

    /// State built from a partial initial state. Missing pieces take fresh
    /// defaults: `starting_scene_id` and `now` for both timestamps.
    pub fn from_initial(initial: InitialState, starting_scene_id: &str, now: DateTime<Utc>) -> Self {
        let start_time = initial.start_time.unwrap_or(now);
        Self {
            current_scene_id: initial
                .current_scene_id
                .unwrap_or_else(|| starting_scene_id.to_string()),
            inventory: initial.inventory,
            story_flags: initial.story_flags,
            character_relationships: initial.character_relationships,
            visited_scenes: initial.visited_scenes,
            total_choices: initial.total_choices,
            total_points: initial.total_points,
            start_time,
            last_save_time: initial.last_save_time.unwrap_or(start_time),
            completed_objectives: initial.completed_objectives,
        }
    }

    /// Apply one action.
    pub fn apply_action(&mut self, action: &GameAction) {
        match action {
            GameAction::AddItem { target, .. } => {
                self.inventory.insert(target.clone(), true);
            }
            GameAction::RemoveItem { target, .. } => {
                self.inventory.insert(target.clone(), false);
            }
            GameAction::SetFlag { target, value, .. } => {
                self.story_flags.insert(target.clone(), value.clone());
            }
            GameAction::ModifyRelationship { target, value, .. } => {
                let level = self.character_relationships.entry(target.clone()).or_insert(0);
                *level = level.saturating_add(*value);
            }
            GameAction::AddPoints { value, .. } => {
                self.total_points = self.total_points.saturating_add(*value);
            }
            GameAction::UnlockScene { target, .. } => {
                self.story_flags
                    .insert(GameAction::unlocked_flag(target), FlagValue::Bool(true));
            }
        }
    }

    /// Mark an objective complete. Returns false if it already was.
    pub fn complete_objective(&mut self, objective: impl Into<String>) -> bool {
        let objective = objective.into();
        if self.completed_objectives.contains(&objective) {
            return false;
        }
        self.completed_objectives.push(objective);
        true
    }
}

impl StateView for NarrativeGameState {
    fn has_item(&self, item: &str) -> bool {
        self.inventory.get(item).copied().unwrap_or(false)
    }

    fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.story_flags.get(key)
    }

    fn relationship(&self, character: &str) -> i64 {
        self.character_relationships.get(character).copied().unwrap_or(0)
    }

    fn has_visited(&self, scene_id: &str) -> bool {
        self.visited_scenes.contains(scene_id)
    }

    fn total_points(&self) -> u32 {
        self.total_points
    }
}

/// A partial state used to start an engine somewhere other than the
/// beginning (e.g. a prepared classroom scenario).
#[derive(Debug, Clone, Default)]
pub struct InitialState {
    /// Scene to start in; the activity's starting scene when unset.
    pub current_scene_id: Option<String>,
    /// Initial inventory.
    pub inventory: HashMap<String, bool>,
    /// Initial story flags.
    pub story_flags: HashMap<String, FlagValue>,
    /// Initial relationship scores.
    pub character_relationships: HashMap<String, i64>,
    /// Scenes already visited.
    pub visited_scenes: HashSet<String>,
    /// Choices already made.
    pub total_choices: u32,
    /// Points already earned.
    pub total_points: u32,
    /// Start of the play-through; the engine's clock when unset.
    pub start_time: Option<DateTime<Utc>>,
    /// Last change; `start_time` when unset.
    pub last_save_time: Option<DateTime<Utc>>,
    /// Objectives already complete.
    pub completed_objectives: Vec<String>,
}

impl InitialState {
    /// Create an empty initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start in `scene_id`.
    pub fn at_scene(mut self, scene_id: impl Into<String>) -> Self {
        self.current_scene_id = Some(scene_id.into());
        self
    }

    /// Start with `item` in the inventory.
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.inventory.insert(item.into(), true);
        self
    }

    /// Start with flag `key` set.
    pub fn with_flag(mut self, key: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.story_flags.insert(key.into(), value.into());
        self
    }

    /// Start with a relationship score.
    pub fn with_relationship(mut self, character: impl Into<String>, level: i64) -> Self {
        self.character_relationships.insert(character.into(), level);
        self
    }

    /// Start with points already earned.
    pub fn with_points(mut self, points: u32) -> Self {
        self.total_points = points;
        self
    }

    /// Start with an objective complete.
    pub fn with_completed_objective(mut self, objective: impl Into<String>) -> Self {
        self.completed_objectives.push(objective.into());
        self
    }

    /// Start at a fixed instant.
    pub fn started_at(mut self, at: DateTime<Utc>) -> Self {
        self.start_time = Some(at);
        self
    }
}

/// One processed choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryProgress {
    /// Scene the choice was made in.
    pub scene_id: String,
    /// The choice taken.
    pub choice_id: String,
    /// When the choice was processed.
    pub timestamp: DateTime<Utc>,
    /// Milliseconds spent in the scene before choosing.
    pub time_spent: u64,
    /// Derived weight of the step.
    pub educational_value: u32,
}
