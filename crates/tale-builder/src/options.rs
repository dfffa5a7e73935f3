//! Authoring parameters for generated activities.

use std::fmt;

use tale_core::Difficulty;

/// School subject. Selects flavour text; never changes the graph shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Subject {
    /// Physics.
    Physics,
    /// Chemistry.
    Chemistry,
    /// Biology.
    Biology,
    /// Mathematics.
    Mathematics,
    /// Any other subject; uses generic content.
    Other(String),
}

impl Subject {
    /// Parse a subject name (case-insensitive). Unknown names become
    /// [`Subject::Other`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "physics" => Self::Physics,
            "chemistry" => Self::Chemistry,
            "biology" => Self::Biology,
            "mathematics" | "math" | "maths" => Self::Mathematics,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Physics => write!(f, "physics"),
            Self::Chemistry => write!(f, "chemistry"),
            Self::Biology => write!(f, "biology"),
            Self::Mathematics => write!(f, "mathematics"),
            Self::Other(name) => write!(f, "{name}"),
        }
    }
}

/// Parameters for [`SceneGraphBuilder::create_narrative_activity`](crate::SceneGraphBuilder::create_narrative_activity).
#[derive(Debug, Clone)]
pub struct ActivityOptions {
    /// Subject of the activity.
    pub subject: Subject,
    /// Grade level.
    pub grade: String,
    /// Overall difficulty.
    pub difficulty: Difficulty,
    /// One educational scene is generated per objective.
    pub educational_objectives: Vec<String>,
    /// Expected play time in minutes.
    pub estimated_duration: u32,
    /// Optional story theme woven into the opening.
    pub theme: Option<String>,
    /// Attach multimedia resources to educational content.
    pub include_multimedia: bool,
}

impl ActivityOptions {
    /// Options for `subject` with no objectives and a 15 minute duration.
    pub fn new(subject: Subject) -> Self {
        Self {
            subject,
            grade: String::new(),
            difficulty: Difficulty::Medium,
            educational_objectives: Vec::new(),
            estimated_duration: 15,
            theme: None,
            include_multimedia: false,
        }
    }

    /// Set the grade level.
    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = grade.into();
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Add a learning objective.
    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.educational_objectives.push(objective.into());
        self
    }

    /// Set the expected duration in minutes.
    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.estimated_duration = minutes;
        self
    }

    /// Set the theme.
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Attach multimedia resources.
    pub fn with_multimedia(mut self, include: bool) -> Self {
        self.include_multimedia = include;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_subjects() {
        assert_eq!(Subject::parse("Physics"), Subject::Physics);
        assert_eq!(Subject::parse(" chemistry "), Subject::Chemistry);
        assert_eq!(Subject::parse("math"), Subject::Mathematics);
        assert_eq!(Subject::parse("History"), Subject::Other("History".into()));
        assert_eq!(Subject::parse("History").to_string(), "History");
    }

    #[test]
    fn options_builder() {
        let opts = ActivityOptions::new(Subject::Biology)
            .with_grade("7")
            .with_objective("cells")
            .with_objective("organs")
            .with_duration(20)
            .with_theme("jungle expedition");
        assert_eq!(opts.educational_objectives.len(), 2);
        assert_eq!(opts.estimated_duration, 20);
        assert_eq!(opts.theme.as_deref(), Some("jungle expedition"));
        assert!(!opts.include_multimedia);
    }
}
