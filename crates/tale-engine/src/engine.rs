//! The narrative state machine.
//!
//! One [`NarrativeEngine`] drives one play-through. Callers alternate between
//! [`NarrativeEngine::available_choices`] and
//! [`NarrativeEngine::process_choice`] until an outcome carries a result.

use std::collections::HashMap;
use std::sync::Arc;

use tale_core::{
    Choice, FlagValue, GameAction, NarrativeActivity, Scene, SceneCondition, StateView,
    evaluate_all,
};

use crate::clock::{Clock, SystemClock};
use crate::config::EngineConfig;
use crate::error::{EngineError, EngineResult};
use crate::result::NarrativeResult;
use crate::snapshot::SaveState;
use crate::state::{InitialState, NarrativeGameState, StoryProgress};

/// Extra educational value for a choice that carries feedback text.
const FEEDBACK_VALUE: u32 = 2;
/// Extra educational value for a choice made in a scene with learning content.
const CONTENT_VALUE: u32 = 3;

/// What happened after a choice was processed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceOutcome {
    /// The scene the player moved to, if the target exists.
    pub next_scene: Option<Scene>,
    /// Present once the play-through is over.
    pub result: Option<NarrativeResult>,
    /// The actions that were executed, in order.
    pub actions: Vec<GameAction>,
    /// Messages attached to the executed actions.
    pub messages: Vec<String>,
    /// Consequence text of the chosen choice.
    pub consequence: Option<String>,
    /// Feedback text of the chosen choice.
    pub educational_feedback: Option<String>,
}

impl ChoiceOutcome {
    /// Whether the play-through has ended.
    pub fn is_complete(&self) -> bool {
        self.result.is_some()
    }
}

/// Configures and creates a [`NarrativeEngine`].
pub struct EngineBuilder {
    activity: NarrativeActivity,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
    initial: InitialState,
    snapshot: Option<SaveState>,
}

impl EngineBuilder {
    /// Use a scoring configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a clock.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Start from a partial state.
    pub fn initial_state(mut self, initial: InitialState) -> Self {
        self.initial = initial;
        self
    }

    /// Continue from a saved snapshot. Replaces any initial state.
    pub fn resume_from(mut self, snapshot: SaveState) -> Self {
        self.snapshot = Some(snapshot);
        self
    }

    /// Create the engine, failing if the activity's starting scene is
    /// missing.
    pub fn try_build(self) -> EngineResult<NarrativeEngine> {
        self.activity.starting_scene()?;
        Ok(self.build())
    }

    /// Create the engine.
    pub fn build(self) -> NarrativeEngine {
        let now = self.clock.now();
        let state =
            NarrativeGameState::from_initial(self.initial, &self.activity.starting_scene_id, now);
        tracing::debug!(
            activity = %self.activity.id,
            scene = %state.current_scene_id,
            "starting play-through"
        );
        let mut engine = NarrativeEngine {
            scene_index: index_scenes(&self.activity),
            activity: self.activity,
            state,
            history: Vec::new(),
            config: self.config,
            clock: self.clock,
        };
        if let Some(snapshot) = self.snapshot {
            engine.load_state(snapshot);
        }
        engine
    }
}

/// A branching-story interpreter for one play-through.
pub struct NarrativeEngine {
    activity: NarrativeActivity,
    scene_index: HashMap<String, usize>,
    state: NarrativeGameState,
    history: Vec<StoryProgress>,
    config: EngineConfig,
    clock: Arc<dyn Clock>,
}

impl NarrativeEngine {
    /// Create an engine at the activity's starting scene with default
    /// scoring and the system clock.
    pub fn new(activity: NarrativeActivity) -> Self {
        Self::builder(activity).build()
    }

    /// Start configuring an engine.
    pub fn builder(activity: NarrativeActivity) -> EngineBuilder {
        EngineBuilder {
            activity,
            config: EngineConfig::default(),
            clock: Arc::new(SystemClock),
            initial: InitialState::default(),
            snapshot: None,
        }
    }

    /// Create an engine from a saved snapshot with default scoring and the
    /// system clock. Use [`EngineBuilder::resume_from`] to keep a custom
    /// configuration or clock.
    pub fn resume(activity: NarrativeActivity, snapshot: SaveState) -> Self {
        Self::builder(activity).resume_from(snapshot).build()
    }

    /// The activity being played.
    pub fn activity(&self) -> &NarrativeActivity {
        &self.activity
    }

    /// The scoring configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.scene_index
            .get(scene_id)
            .and_then(|&i| self.activity.available_scenes.get(i))
    }

    /// Resolve the current scene and record it as visited.
    fn enter_current_scene(&mut self) -> Option<usize> {
        let index = *self.scene_index.get(&self.state.current_scene_id)?;
        let id = &self.activity.available_scenes.get(index)?.id;
        if self.state.visited_scenes.insert(id.clone()) {
            tracing::debug!(scene = %id, "scene visited");
        }
        Some(index)
    }

    /// The current scene, marking it visited.
    ///
    /// Returns `None` when the current scene id does not resolve, which
    /// happens after following a choice whose target is missing.
    pub fn current_scene(&mut self) -> Option<&Scene> {
        let index = self.enter_current_scene()?;
        self.activity.available_scenes.get(index)
    }

    /// The current scene without marking it visited.
    pub fn peek_current_scene(&self) -> Option<&Scene> {
        self.scene(&self.state.current_scene_id)
    }

    /// The current scene's choices whose conditions all hold, in authoring
    /// order. Entering the scene this way marks it visited, like
    /// [`current_scene`](Self::current_scene).
    pub fn available_choices(&mut self) -> Vec<&Choice> {
        let Some(index) = self.enter_current_scene() else {
            return Vec::new();
        };
        let state = &self.state;
        self.activity
            .available_scenes
            .get(index)
            .map(|scene| {
                scene
                    .choices
                    .iter()
                    .filter(|c| evaluate_all(&c.conditions, state))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Like [`available_choices`](Self::available_choices) but without
    /// marking the scene visited.
    pub fn peek_available_choices(&self) -> Vec<&Choice> {
        self.peek_current_scene()
            .map(|scene| {
                scene
                    .choices
                    .iter()
                    .filter(|c| evaluate_all(&c.conditions, &self.state))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Whether every condition holds against the current state.
    pub fn evaluate_conditions(&self, conditions: &[SceneCondition]) -> bool {
        evaluate_all(conditions, &self.state)
    }

    /// Take a choice of the current scene.
    ///
    /// The choice is looked up among all of the scene's choices, not only
    /// the available ones; hiding a choice is the caller's business. On
    /// error nothing is changed.
    pub fn process_choice(&mut self, choice_id: &str) -> EngineResult<ChoiceOutcome> {
        let scene = self.scene(&self.state.current_scene_id).ok_or_else(|| {
            tracing::warn!(scene = %self.state.current_scene_id, "no current scene");
            EngineError::NoCurrentScene {
                scene_id: self.state.current_scene_id.clone(),
            }
        })?;
        let choice = scene.choice(choice_id).cloned().ok_or_else(|| {
            tracing::warn!(scene = %scene.id, choice = %choice_id, "unknown choice");
            EngineError::UnknownChoice {
                scene_id: scene.id.clone(),
                choice_id: choice_id.to_string(),
            }
        })?;
        let scene_id = scene.id.clone();
        let educational_value = educational_value(&choice, scene);
        if self.state.visited_scenes.insert(scene_id.clone()) {
            tracing::debug!(scene = %scene_id, "scene visited");
        }

        let now = self.clock.now();
        let time_spent = (now - self.state.last_save_time)
            .num_milliseconds()
            .max(0)
            .unsigned_abs();

        let mut messages = Vec::new();
        for action in &choice.actions {
            tracing::debug!(%action, "applying action");
            self.state.apply_action(action);
            if let Some(message) = action.message() {
                messages.push(message.to_string());
            }
        }
        if let Some(points) = choice.points {
            self.state.total_points = self.state.total_points.saturating_add(points);
        }
        self.state.total_choices += 1;
        self.state.current_scene_id = choice.next_scene_id.clone();
        self.state.last_save_time = now;

        self.history.push(StoryProgress {
            scene_id,
            choice_id: choice.id.clone(),
            timestamp: now,
            time_spent,
            educational_value,
        });

        let next_scene = self.scene(&choice.next_scene_id).cloned();
        if next_scene.is_none() {
            tracing::warn!(target_scene = %choice.next_scene_id, "choice leads to a missing scene");
        }

        let reached_ending = next_scene.as_ref().is_some_and(|s| s.is_ending);
        let result = if reached_ending || self.is_story_complete() {
            if reached_ending {
                self.state.visited_scenes.insert(choice.next_scene_id.clone());
            }
            let result = self.generate_result();
            tracing::info!(
                activity = %self.activity.id,
                score = result.final_score,
                choices = self.state.total_choices,
                "play-through complete"
            );
            Some(result)
        } else {
            tracing::debug!(
                choice = %choice.id,
                next = %choice.next_scene_id,
                points = self.state.total_points,
                "choice processed"
            );
            None
        };

        Ok(ChoiceOutcome {
            next_scene,
            result,
            actions: choice.actions,
            messages,
            consequence: choice.consequence,
            educational_feedback: choice.educational_feedback,
        })
    }

    /// Whether the completion criteria hold: every declared objective is
    /// complete (trivially so when none are declared), or the choice limit
    /// has been reached.
    pub fn is_story_complete(&self) -> bool {
        let objectives_done =
            self.state.completed_objectives.len() >= self.activity.educational_objectives.len();
        let limit_reached = self
            .activity
            .max_choices
            .is_some_and(|max| max > 0 && self.state.total_choices >= max);
        objectives_done || limit_reached
    }

    /// Score the play-through as of now.
    pub fn generate_result(&self) -> NarrativeResult {
        NarrativeResult::compute(
            &self.activity,
            &self.state,
            &self.history,
            self.clock.now(),
            &self.config,
        )
    }

    /// Mark an objective complete. Returns false if it already was.
    pub fn complete_objective(&mut self, objective: impl Into<String>) -> bool {
        self.state.complete_objective(objective)
    }

    /// A copy of the current state.
    pub fn game_state(&self) -> NarrativeGameState {
        self.state.clone()
    }

    /// A copy of the progress log.
    pub fn progress_history(&self) -> Vec<StoryProgress> {
        self.history.clone()
    }

    /// Whether the inventory holds `item`.
    pub fn has_item(&self, item: &str) -> bool {
        self.state.has_item(item)
    }

    /// The story flag stored under `key`.
    pub fn flag(&self, key: &str) -> Option<&FlagValue> {
        self.state.flag(key)
    }

    /// Relationship score with `character` (0 when absent).
    pub fn relationship(&self, character: &str) -> i64 {
        self.state.relationship(character)
    }

    /// Whether `scene_id` has been visited.
    pub fn has_visited(&self, scene_id: &str) -> bool {
        self.state.has_visited(scene_id)
    }

    /// Capture the state and progress log.
    pub fn save_state(&self) -> SaveState {
        SaveState::capture(&self.state, &self.history)
    }

    /// Replace the state and progress log with a snapshot.
    pub fn load_state(&mut self, snapshot: SaveState) {
        let (state, history) = snapshot.restore();
        tracing::debug!(scene = %state.current_scene_id, steps = history.len(), "state loaded");
        self.state = state;
        self.history = history;
    }
}

fn index_scenes(activity: &NarrativeActivity) -> HashMap<String, usize> {
    let mut index = HashMap::with_capacity(activity.available_scenes.len());
    for (i, scene) in activity.available_scenes.iter().enumerate() {
        index.entry(scene.id.clone()).or_insert(i);
    }
    index
}

fn educational_value(choice: &Choice, scene: &Scene) -> u32 {
    let mut value = choice.difficulty.map_or(1, |d| d.base_value());
    if choice
        .educational_feedback
        .as_deref()
        .is_some_and(|f| !f.is_empty())
    {
        value += FEEDBACK_VALUE;
    }
    if scene.educational_content.is_some() {
        value += CONTENT_VALUE;
    }
    value
}
