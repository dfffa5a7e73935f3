//! Scenes, choices, and their authoring metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::action::GameAction;
use crate::condition::SceneCondition;

/// How demanding a choice is. Weighs the educational value of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Base educational value 1.
    Easy,
    /// Base educational value 2.
    #[default]
    Medium,
    /// Base educational value 3.
    Hard,
}

impl Difficulty {
    /// Base educational value of a step taken at this difficulty.
    pub fn base_value(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(format!(
                "unknown difficulty '{other}' (expected easy, medium or hard)"
            )),
        }
    }
}

/// A reward granted on reaching a scene. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Reward {
    /// A named badge.
    Badge {
        /// Badge name.
        name: String,
    },
    /// Experience points.
    Xp {
        /// Amount of experience.
        amount: u32,
    },
}

/// A multimedia resource attached to educational content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multimedia {
    /// Resource kind (e.g. `image`, `video`, `simulation`).
    #[serde(rename = "type")]
    pub kind: String,
    /// What the resource shows.
    pub description: String,
}

/// Learning material attached to a scene. Opaque to the engine apart from
/// its presence, which raises the educational value of choices made there.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationalContent {
    /// The concept taught.
    pub concept: String,
    /// Explanation of the concept.
    pub explanation: String,
    /// Worked examples.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<String>,
    /// Optional multimedia resource.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multimedia: Option<Multimedia>,
}

/// An edge of the scene graph, carrying conditions, side effects and score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    /// Identifier, unique within the owning scene.
    pub id: String,
    /// Button text.
    pub text: String,
    /// Longer description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Target scene id.
    pub next_scene_id: String,
    /// All must hold for the choice to be offered.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<SceneCondition>,
    /// Executed in order on selection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<GameAction>,
    /// Points added to the total on selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    /// Text shown before the transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consequence: Option<String>,
    /// Weighs the educational value of the step.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Feedback returned to the player after the choice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_feedback: Option<String>,
}

impl Choice {
    /// Create a choice leading to `next_scene_id`.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        next_scene_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            description: None,
            next_scene_id: next_scene_id.into(),
            conditions: Vec::new(),
            actions: Vec::new(),
            points: None,
            consequence: None,
            difficulty: None,
            educational_feedback: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a condition.
    pub fn with_condition(mut self, condition: SceneCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add an action.
    pub fn with_action(mut self, action: GameAction) -> Self {
        self.actions.push(action);
        self
    }

    /// Set the points awarded.
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    /// Set the consequence text.
    pub fn with_consequence(mut self, consequence: impl Into<String>) -> Self {
        self.consequence = Some(consequence.into());
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Set the educational feedback.
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.educational_feedback = Some(feedback.into());
        self
    }
}

/// A node of the scene graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Identifier, unique within one activity.
    pub id: String,
    /// Scene title.
    pub title: String,
    /// Where the scene takes place.
    #[serde(default)]
    pub location: String,
    /// Narrative text.
    pub description: String,
    /// Choices in display order.
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Gate evaluated by callers before a transition. Not enforced by the engine.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub conditions: Vec<SceneCondition>,
    /// Reaching this scene ends the narrative.
    #[serde(default)]
    pub is_ending: bool,
    /// Rewards granted on reaching the scene.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rewards: Vec<Reward>,
    /// Learning material shown in the scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub educational_content: Option<EducationalContent>,
}

impl Scene {
    /// Create a scene with the given id, title and text.
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            location: String::new(),
            description: description.into(),
            choices: Vec::new(),
            conditions: Vec::new(),
            is_ending: false,
            rewards: Vec::new(),
            educational_content: None,
        }
    }

    /// Set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Add a choice.
    pub fn with_choice(mut self, choice: Choice) -> Self {
        self.choices.push(choice);
        self
    }

    /// Add a condition.
    pub fn with_condition(mut self, condition: SceneCondition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Add a reward.
    pub fn with_reward(mut self, reward: Reward) -> Self {
        self.rewards.push(reward);
        self
    }

    /// Attach educational content.
    pub fn with_educational_content(mut self, content: EducationalContent) -> Self {
        self.educational_content = Some(content);
        self
    }

    /// Mark the scene as an ending.
    pub fn ending(mut self) -> Self {
        self.is_ending = true;
        self
    }

    /// Find a choice of this scene by id.
    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}
