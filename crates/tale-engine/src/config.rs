//! Scoring configuration for the narrative engine.

use serde::{Deserialize, Serialize};

/// Weights and thresholds used to score a finished play-through.
///
/// The defaults reproduce the standard scoring rules; override them to tune
/// pacing for a particular group of learners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Time bonus before elapsed minutes are subtracted.
    pub time_bonus_minutes: u32,
    /// Multiplier applied to the mean educational value.
    pub educational_bonus_weight: f64,
    /// Bonus for completing every objective.
    pub objective_bonus_weight: f64,
    /// Points above which `high_scorer` is awarded.
    pub high_scorer_points: u32,
    /// Progress entries above which `thorough_explorer` is awarded.
    pub thorough_explorer_steps: usize,
    /// Choices below which `efficient_learner` is awarded.
    pub efficient_learner_choices: u32,
    /// Mean time per choice (ms) below which the learner is told to slow down.
    pub hasty_choice_ms: u64,
    /// Fraction of visited scenes below which more exploration is suggested.
    pub exploration_ratio: f64,
    /// Minimum final score for the "exceptional" tier.
    pub exceptional_score: f64,
    /// Minimum final score for the "very good" tier.
    pub very_good_score: f64,
    /// Minimum final score for the "good" tier.
    pub good_score: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_bonus_minutes: 100,
            educational_bonus_weight: 10.0,
            objective_bonus_weight: 50.0,
            high_scorer_points: 100,
            thorough_explorer_steps: 10,
            efficient_learner_choices: 8,
            hasty_choice_ms: 5_000,
            exploration_ratio: 0.7,
            exceptional_score: 200.0,
            very_good_score: 150.0,
            good_score: 100.0,
        }
    }
}

impl EngineConfig {
    /// Set the time bonus ceiling in minutes.
    pub fn with_time_bonus_minutes(mut self, minutes: u32) -> Self {
        self.time_bonus_minutes = minutes;
        self
    }

    /// Set the threshold for the `high_scorer` achievement.
    pub fn with_high_scorer_points(mut self, points: u32) -> Self {
        self.high_scorer_points = points;
        self
    }

    /// Set the minimum mean time per choice in milliseconds.
    pub fn with_hasty_choice_ms(mut self, ms: u64) -> Self {
        self.hasty_choice_ms = ms;
        self
    }

    /// Set the exploration ratio (clamped to 0.0-1.0; NaN keeps the default).
    pub fn with_exploration_ratio(mut self, ratio: f64) -> Self {
        self.exploration_ratio = if ratio.is_nan() {
            Self::default().exploration_ratio
        } else {
            ratio.clamp(0.0, 1.0)
        };
        self
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    ///
    /// The exploration ratio is clamped as in
    /// [`with_exploration_ratio`](Self::with_exploration_ratio).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let cfg: Self = serde_json::from_str(json)?;
        let ratio = cfg.exploration_ratio;
        Ok(cfg.with_exploration_ratio(ratio))
    }
}
