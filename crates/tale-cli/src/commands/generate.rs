use std::path::PathBuf;

use tale_builder::{ActivityOptions, BuilderConfig, SceneGraphBuilder, Subject};
use tale_core::Difficulty;

/// Arguments of `tale generate`.
pub struct GenerateArgs {
    pub title: String,
    pub description: String,
    pub subject: String,
    pub grade: String,
    pub difficulty: String,
    pub objectives: Vec<String>,
    pub duration: u32,
    pub theme: Option<String>,
    pub multimedia: bool,
    pub config: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

pub fn run(args: &GenerateArgs) -> Result<(), String> {
    let config = match &args.config {
        Some(path) => {
            let json = super::read_file(path)?;
            BuilderConfig::from_json(&json)
                .map_err(|e| format!("invalid builder config {}: {e}", path.display()))?
        }
        None => BuilderConfig::default(),
    };
    let difficulty: Difficulty = args.difficulty.parse()?;

    let mut options = ActivityOptions::new(Subject::parse(&args.subject))
        .with_grade(args.grade.as_str())
        .with_difficulty(difficulty)
        .with_duration(args.duration)
        .with_multimedia(args.multimedia);
    for objective in &args.objectives {
        options = options.with_objective(objective.as_str());
    }
    if let Some(theme) = &args.theme {
        options = options.with_theme(theme.as_str());
    }

    let activity = SceneGraphBuilder::with_config(config).create_narrative_activity(
        &args.title,
        &args.description,
        &options,
    );
    let json = activity.to_json_pretty().map_err(|e| e.to_string())?;
    super::write_output(&json, args.output.as_deref())
}
