//! Final results of a play-through: score breakdown, achievements, feedback.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tale_core::NarrativeActivity;

use crate::config::EngineConfig;
use crate::state::{NarrativeGameState, StoryProgress};

/// Milestones awarded alongside the score. Several may fire at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Achievement {
    /// Earned more points than the configured threshold.
    HighScorer,
    /// Made more choices than the configured threshold.
    ThoroughExplorer,
    /// Visited every scene of the activity.
    SceneMaster,
    /// Finished in fewer choices than the configured threshold.
    EfficientLearner,
}

impl fmt::Display for Achievement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HighScorer => write!(f, "high_scorer"),
            Self::ThoroughExplorer => write!(f, "thorough_explorer"),
            Self::SceneMaster => write!(f, "scene_master"),
            Self::EfficientLearner => write!(f, "efficient_learner"),
        }
    }
}

/// Feedback tier chosen from the final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackTier {
    /// Final score of at least 200 by default.
    Exceptional,
    /// At least 150.
    VeryGood,
    /// At least 100.
    Good,
    /// Anything lower.
    KeepLearning,
}

impl FeedbackTier {
    /// Pick the tier for `score`.
    pub fn for_score(score: f64, config: &EngineConfig) -> Self {
        if score >= config.exceptional_score {
            Self::Exceptional
        } else if score >= config.very_good_score {
            Self::VeryGood
        } else if score >= config.good_score {
            Self::Good
        } else {
            Self::KeepLearning
        }
    }

    /// Player-facing feedback text.
    pub fn message(self) -> &'static str {
        match self {
            Self::Exceptional => {
                "Exceptional work! You mastered the material and made outstanding choices."
            }
            Self::VeryGood => "Very good! You showed a strong understanding of the concepts.",
            Self::Good => "Good job! You completed the adventure and learned along the way.",
            Self::KeepLearning => {
                "Keep learning! Review the material and try the adventure again."
            }
        }
    }
}

/// Recommendation given when choices were made too quickly.
pub const SLOW_DOWN: &str = "Take more time to read each scene and think about your choices.";
/// Recommendation given when objectives remain open.
pub const FOCUS_OBJECTIVES: &str = "Focus on completing the learning objectives.";
/// Recommendation given when too few scenes were visited.
pub const EXPLORE_MORE: &str = "Explore more scenes to discover additional learning content.";

/// The terminal outcome of a play-through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeResult {
    /// Sum of points and all bonuses.
    pub final_score: f64,
    /// Points earned through choices and actions.
    pub total_points: u32,
    /// Bonus for finishing quickly.
    pub time_bonus: u32,
    /// Bonus from the mean educational value of all steps.
    pub educational_bonus: f64,
    /// Bonus for completed objectives.
    pub objective_bonus: f64,
    /// Achievements earned.
    pub achievements: Vec<Achievement>,
    /// Feedback tier.
    pub feedback: FeedbackTier,
    /// Suggestions for the next attempt.
    pub recommendations: Vec<String>,
    /// Every processed choice.
    pub progress_history: Vec<StoryProgress>,
    /// Objectives completed.
    pub completed_objectives: Vec<String>,
    /// Choices made.
    pub total_choices: u32,
    /// Distinct scenes visited.
    pub visited_scenes: usize,
    /// Scenes in the activity.
    pub total_scenes: usize,
    /// Milliseconds from start to finish.
    pub total_time_ms: u64,
}

impl NarrativeResult {
    /// Score a play-through as of `now`.
    pub fn compute(
        activity: &NarrativeActivity,
        state: &NarrativeGameState,
        history: &[StoryProgress],
        now: DateTime<Utc>,
        config: &EngineConfig,
    ) -> Self {
        let elapsed = (now - state.start_time).max(chrono::Duration::zero());
        let elapsed_minutes = u32::try_from(elapsed.num_minutes()).unwrap_or(u32::MAX);
        let time_bonus = config.time_bonus_minutes.saturating_sub(elapsed_minutes);

        let educational_bonus = mean(history.iter().map(|p| f64::from(p.educational_value)))
            .map_or(0.0, |m| m * config.educational_bonus_weight);

        let declared = activity.educational_objectives.len();
        let completed = state.completed_objectives.len();
        let objective_bonus = if declared == 0 {
            0.0
        } else {
            completed as f64 / declared as f64 * config.objective_bonus_weight
        };

        let final_score =
            f64::from(state.total_points) + f64::from(time_bonus) + educational_bonus + objective_bonus;

        let total_scenes = activity.scene_count();
        let visited = state.visited_scenes.len();

        let mut achievements = Vec::new();
        if state.total_points > config.high_scorer_points {
            achievements.push(Achievement::HighScorer);
        }
        if history.len() > config.thorough_explorer_steps {
            achievements.push(Achievement::ThoroughExplorer);
        }
        if visited == total_scenes {
            achievements.push(Achievement::SceneMaster);
        }
        if state.total_choices < config.efficient_learner_choices {
            achievements.push(Achievement::EfficientLearner);
        }

        let mut recommendations = Vec::new();
        let mean_time = mean(history.iter().map(|p| p.time_spent as f64));
        if mean_time.is_some_and(|ms| ms < config.hasty_choice_ms as f64) {
            recommendations.push(SLOW_DOWN.to_string());
        }
        if completed < declared {
            recommendations.push(FOCUS_OBJECTIVES.to_string());
        }
        if total_scenes > 0 && (visited as f64 / total_scenes as f64) < config.exploration_ratio {
            recommendations.push(EXPLORE_MORE.to_string());
        }

        Self {
            final_score,
            total_points: state.total_points,
            time_bonus,
            educational_bonus,
            objective_bonus,
            achievements,
            feedback: FeedbackTier::for_score(final_score, config),
            recommendations,
            progress_history: history.to_vec(),
            completed_objectives: state.completed_objectives.clone(),
            total_choices: state.total_choices,
            visited_scenes: visited,
            total_scenes,
            total_time_ms: u64::try_from(elapsed.num_milliseconds()).unwrap_or(0),
        }
    }

    /// Whether `achievement` was earned.
    pub fn has_achievement(&self, achievement: Achievement) -> bool {
        self.achievements.contains(&achievement)
    }

    /// Render the result as a markdown report.
    pub fn to_markdown(&self, title: &str) -> String {
        let mut out = format!("# {title}: Results\n\n");
        out.push_str(&format!("**Final score**: {:.1}\n\n", self.final_score));
        out.push_str(&format!("{}\n\n", self.feedback.message()));

        out.push_str("## Breakdown\n\n");
        out.push_str(&format!("- Points: {}\n", self.total_points));
        out.push_str(&format!("- Time bonus: {}\n", self.time_bonus));
        out.push_str(&format!("- Educational bonus: {:.1}\n", self.educational_bonus));
        out.push_str(&format!("- Objective bonus: {:.1}\n", self.objective_bonus));
        out.push_str(&format!(
            "- Choices: {}, scenes visited: {}/{}\n\n",
            self.total_choices, self.visited_scenes, self.total_scenes
        ));

        if !self.achievements.is_empty() {
            out.push_str("## Achievements\n\n");
            for a in &self.achievements {
                out.push_str(&format!("- {a}\n"));
            }
            out.push('\n');
        }

        if !self.recommendations.is_empty() {
            out.push_str("## Recommendations\n\n");
            for r in &self.recommendations {
                out.push_str(&format!("- {r}\n"));
            }
            out.push('\n');
        }

        out
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
