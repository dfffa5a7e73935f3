//! Narrative activities: a scene graph plus the metadata the engine reads.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::scene::{Difficulty, Scene};

/// A complete branching story: scenes, where to start, and learning goals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeActivity {
    /// Activity identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Short description.
    #[serde(default)]
    pub description: String,
    /// School subject (e.g. `physics`).
    #[serde(default)]
    pub subject: String,
    /// Grade level.
    #[serde(default)]
    pub grade: String,
    /// Overall difficulty.
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Id of the first scene.
    pub starting_scene_id: String,
    /// All scenes of the graph.
    pub available_scenes: Vec<Scene>,
    /// Number of choices after which the story is complete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_choices: Option<u32>,
    /// Learning objectives of the activity.
    #[serde(default)]
    pub educational_objectives: Vec<String>,
    /// Expected play time in minutes.
    #[serde(default)]
    pub estimated_duration: u32,
    /// Optional visual/story theme.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Whether scenes carry multimedia resources.
    #[serde(default)]
    pub include_multimedia: bool,
}

impl NarrativeActivity {
    /// Create an activity from a title, a starting scene id and scenes.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        starting_scene_id: impl Into<String>,
        scenes: Vec<Scene>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            subject: String::new(),
            grade: String::new(),
            difficulty: Difficulty::default(),
            starting_scene_id: starting_scene_id.into(),
            available_scenes: scenes,
            max_choices: None,
            educational_objectives: Vec::new(),
            estimated_duration: 0,
            theme: None,
            include_multimedia: false,
        }
    }

    /// Set the choice limit.
    pub fn with_max_choices(mut self, max: u32) -> Self {
        self.max_choices = Some(max);
        self
    }

    /// Set the learning objectives.
    pub fn with_objectives(mut self, objectives: Vec<String>) -> Self {
        self.educational_objectives = objectives;
        self
    }

    /// Parse an activity from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the activity as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> CoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Look up a scene by id.
    pub fn scene(&self, scene_id: &str) -> Option<&Scene> {
        self.available_scenes.iter().find(|s| s.id == scene_id)
    }

    /// The starting scene, or an error if the id does not resolve.
    pub fn starting_scene(&self) -> CoreResult<&Scene> {
        self.scene(&self.starting_scene_id)
            .ok_or_else(|| CoreError::SceneNotFound(self.starting_scene_id.clone()))
    }

    /// Number of scenes in the graph.
    pub fn scene_count(&self) -> usize {
        self.available_scenes.len()
    }

    /// Check the graph for structural problems.
    ///
    /// Never fails: dangling choice targets and missing endings are reported
    /// as warnings because the engine tolerates them; an unresolved starting
    /// scene and duplicate ids are errors.
    pub fn validate(&self) -> Vec<GraphIssue> {
        let mut issues = Vec::new();
        let mut seen = HashSet::new();

        for scene in &self.available_scenes {
            if !seen.insert(scene.id.as_str()) {
                issues.push(GraphIssue::error(
                    &scene.id,
                    format!("duplicate scene id '{}'", scene.id),
                ));
            }
        }

        if !seen.contains(self.starting_scene_id.as_str()) {
            issues.push(GraphIssue::error(
                "activity",
                format!("starting scene '{}' does not exist", self.starting_scene_id),
            ));
        }

        for scene in &self.available_scenes {
            let mut choice_ids = HashSet::new();
            for choice in &scene.choices {
                if !choice_ids.insert(choice.id.as_str()) {
                    issues.push(GraphIssue::error(
                        &scene.id,
                        format!("duplicate choice id '{}'", choice.id),
                    ));
                }
                if !seen.contains(choice.next_scene_id.as_str()) {
                    issues.push(GraphIssue::warning(
                        &scene.id,
                        format!(
                            "choice '{}' leads to unknown scene '{}'",
                            choice.id, choice.next_scene_id
                        ),
                    ));
                }
            }
            if !scene.is_ending && scene.choices.is_empty() {
                issues.push(GraphIssue::warning(
                    &scene.id,
                    "dead end: not an ending and has no choices",
                ));
            }
        }

        if !self.available_scenes.iter().any(|s| s.is_ending) {
            issues.push(GraphIssue::warning("activity", "no ending scene"));
        }

        issues
    }
}

/// Severity of a [`GraphIssue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueLevel {
    /// The graph cannot be played as authored.
    Error,
    /// The graph plays but may stall or never end.
    Warning,
}

/// A structural problem found by [`NarrativeActivity::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphIssue {
    /// Severity.
    pub level: IssueLevel,
    /// Scene id (or `activity`) where the issue was found.
    pub location: String,
    /// Human-readable description.
    pub message: String,
}

impl GraphIssue {
    fn error(location: &str, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Error,
            location: location.to_string(),
            message: message.into(),
        }
    }

    fn warning(location: &str, message: impl Into<String>) -> Self {
        Self {
            level: IssueLevel::Warning,
            location: location.to_string(),
            message: message.into(),
        }
    }

    /// Whether this issue is an error.
    pub fn is_error(&self) -> bool {
        self.level == IssueLevel::Error
    }
}

impl fmt::Display for GraphIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.level {
            IssueLevel::Error => "error",
            IssueLevel::Warning => "warning",
        };
        write!(f, "{level}: {}: {}", self.location, self.message)
    }
}
