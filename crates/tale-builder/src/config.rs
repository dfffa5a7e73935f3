//! Configuration for scene-graph generation.

use serde::{Deserialize, Serialize};

/// Pacing and point values used when generating activities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuilderConfig {
    /// Minutes of play per decision point; sets the choice limit.
    pub minutes_per_choice: f64,
    /// Points needed before the challenge scene opens.
    pub challenge_threshold: u32,
    /// Points for the opening choices.
    pub opening_points: u32,
    /// Points for an easy learning choice.
    pub easy_points: u32,
    /// Points for a medium learning choice.
    pub medium_points: u32,
    /// Points for a hard learning choice.
    pub hard_points: u32,
    /// Points for revisiting the material before the challenge.
    pub practice_points: u32,
    /// Points for solving the challenge.
    pub challenge_points: u32,
    /// Mentor relationship needed to ask for a hint in the challenge.
    pub hint_relationship: i64,
    /// Default points of a quick-scene choice.
    pub quick_choice_points: u32,
    /// Experience granted by the success ending.
    pub success_xp: u32,
    /// Experience granted by the alternative ending.
    pub alternative_xp: u32,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            minutes_per_choice: 2.5,
            challenge_threshold: 30,
            opening_points: 10,
            easy_points: 10,
            medium_points: 15,
            hard_points: 20,
            practice_points: 10,
            challenge_points: 50,
            hint_relationship: 2,
            quick_choice_points: 10,
            success_xp: 100,
            alternative_xp: 50,
        }
    }
}

impl BuilderConfig {
    /// Set the pacing (clamped to at least half a minute per choice).
    pub fn with_minutes_per_choice(mut self, minutes: f64) -> Self {
        self.minutes_per_choice = clamp_pace(minutes);
        self
    }

    /// Set the challenge threshold.
    pub fn with_challenge_threshold(mut self, points: u32) -> Self {
        self.challenge_threshold = points;
        self
    }

    /// Parse a configuration from JSON. Missing fields keep their defaults.
    ///
    /// The pacing is clamped as in [`with_minutes_per_choice`](Self::with_minutes_per_choice).
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let cfg: Self = serde_json::from_str(json)?;
        let pace = cfg.minutes_per_choice;
        Ok(cfg.with_minutes_per_choice(pace))
    }

    /// Number of decision points that fit into `duration` minutes.
    pub fn max_choices_for(&self, duration: u32) -> u32 {
        (f64::from(duration) / clamp_pace(self.minutes_per_choice)).ceil() as u32
    }
}

/// Fastest allowed pace; non-finite values fall back to it as well.
fn clamp_pace(minutes: f64) -> f64 {
    if minutes.is_finite() { minutes.max(0.5) } else { 0.5 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = BuilderConfig::default();
        assert_eq!(cfg.minutes_per_choice, 2.5);
        assert_eq!(cfg.challenge_threshold, 30);
    }

    #[test]
    fn pacing() {
        let cfg = BuilderConfig::default();
        assert_eq!(cfg.max_choices_for(25), 10);
        assert_eq!(cfg.max_choices_for(26), 11);
        assert_eq!(cfg.max_choices_for(1), 1);
        assert_eq!(cfg.max_choices_for(0), 0);
    }

    #[test]
    fn pacing_clamped() {
        let cfg = BuilderConfig::default().with_minutes_per_choice(0.0);
        assert_eq!(cfg.minutes_per_choice, 0.5);
    }

    #[test]
    fn json_pacing_clamped() {
        let cfg = BuilderConfig::from_json(r#"{"minutesPerChoice": 0}"#).unwrap();
        assert_eq!(cfg.minutes_per_choice, 0.5);
        assert_eq!(cfg.max_choices_for(25), 50);

        let cfg = BuilderConfig::from_json(r#"{"minutesPerChoice": -3.0}"#).unwrap();
        assert_eq!(cfg.max_choices_for(25), 50);
    }

    #[test]
    fn pacing_guarded_when_set_directly() {
        let cfg = BuilderConfig { minutes_per_choice: 0.0, ..BuilderConfig::default() };
        assert_eq!(cfg.max_choices_for(10), 20);
        let cfg = BuilderConfig { minutes_per_choice: f64::NAN, ..BuilderConfig::default() };
        assert_eq!(cfg.max_choices_for(10), 20);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = BuilderConfig::from_json(r#"{"challengeThreshold": 40}"#).unwrap();
        assert_eq!(cfg.challenge_threshold, 40);
        assert_eq!(cfg.hard_points, 20);
    }
}
