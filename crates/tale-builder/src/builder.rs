//! Scene-graph generation.

use tale_core::{
    Choice, Difficulty, EducationalContent, GameAction, Multimedia, NarrativeActivity, Reward,
    Scene, SceneCondition,
};
use uuid::Uuid;

use crate::config::BuilderConfig;
use crate::content::SubjectContent;
use crate::options::ActivityOptions;

/// A choice description for [`SceneGraphBuilder::create_quick_scene`].
#[derive(Debug, Clone)]
pub struct QuickChoice {
    /// Button text.
    pub text: String,
    /// Target scene id.
    pub next_scene_id: String,
    /// Points; the configured default when unset.
    pub points: Option<u32>,
    /// Difficulty; medium when unset.
    pub difficulty: Option<Difficulty>,
}

impl QuickChoice {
    /// A choice with default points and difficulty.
    pub fn new(text: impl Into<String>, next_scene_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            next_scene_id: next_scene_id.into(),
            points: None,
            difficulty: None,
        }
    }

    /// Set the points.
    pub fn with_points(mut self, points: u32) -> Self {
        self.points = Some(points);
        self
    }

    /// Set the difficulty.
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }
}

/// Builds narrative activities from authoring parameters.
///
/// Scene and choice ids come from counters owned by the builder, so they are
/// unique within everything one builder produces and nowhere else.
#[derive(Debug, Clone, Default)]
pub struct SceneGraphBuilder {
    config: BuilderConfig,
    scene_counter: u32,
    choice_counter: u32,
}

/// Ids of every scene in a generated graph, allocated before any scene is
/// built so choices can point forward.
struct Layout {
    opening: String,
    lessons: Vec<String>,
    challenge: String,
    success: String,
    alternative: String,
}

impl Layout {
    /// The scene whose forward choices lead into the challenge.
    fn gateway(&self) -> &str {
        self.lessons.last().unwrap_or(&self.opening)
    }

    /// Where the player goes after `lesson` (or after the opening for `None`).
    fn after(&self, lesson: Option<usize>) -> &str {
        let next = lesson.map_or(0, |i| i + 1);
        self.lessons.get(next).unwrap_or(&self.challenge)
    }
}

impl SceneGraphBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with a custom configuration.
    pub fn with_config(config: BuilderConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    fn next_scene_id(&mut self) -> String {
        self.scene_counter += 1;
        format!("scene_{}", self.scene_counter)
    }

    fn next_choice_id(&mut self) -> String {
        self.choice_counter += 1;
        format!("choice_{}", self.choice_counter)
    }

    /// Generate a complete activity.
    ///
    /// The starting scene is the first generated scene. The choice limit is
    /// the number of decision points that fit into the estimated duration
    /// (unset for a zero duration). Empty objectives are allowed and yield a
    /// graph of opening, challenge and endings only.
    pub fn create_narrative_activity(
        &mut self,
        title: &str,
        description: &str,
        options: &ActivityOptions,
    ) -> NarrativeActivity {
        let scenes = self.generate_scenes(title, options);
        let starting_scene_id = scenes.first().map(|s| s.id.clone()).unwrap_or_default();
        let max_choices = self.config.max_choices_for(options.estimated_duration);

        tracing::debug!(
            title,
            subject = %options.subject,
            scenes = scenes.len(),
            max_choices,
            "generated narrative activity"
        );

        NarrativeActivity {
            id: format!("narrative_{}", Uuid::new_v4().simple()),
            title: title.to_string(),
            description: description.to_string(),
            subject: options.subject.to_string(),
            grade: options.grade.clone(),
            difficulty: options.difficulty,
            starting_scene_id,
            available_scenes: scenes,
            max_choices: (max_choices > 0).then_some(max_choices),
            educational_objectives: options.educational_objectives.clone(),
            estimated_duration: options.estimated_duration,
            theme: options.theme.clone(),
            include_multimedia: options.include_multimedia,
        }
    }

    /// Generate the scenes of an activity in order: opening, one lesson per
    /// objective, challenge, success ending, alternative ending.
    pub fn generate_scenes(&mut self, title: &str, options: &ActivityOptions) -> Vec<Scene> {
        let content = SubjectContent::for_subject(&options.subject);
        let layout = Layout {
            opening: self.next_scene_id(),
            lessons: options
                .educational_objectives
                .iter()
                .map(|_| self.next_scene_id())
                .collect(),
            challenge: self.next_scene_id(),
            success: self.next_scene_id(),
            alternative: self.next_scene_id(),
        };

        let mut scenes = Vec::with_capacity(layout.lessons.len() + 4);
        scenes.push(self.opening_scene(title, options, content, &layout));
        for (i, objective) in options.educational_objectives.iter().enumerate() {
            scenes.push(self.lesson_scene(i, objective, options, content, &layout));
        }
        scenes.push(self.challenge_scene(options, content, &layout));
        scenes.push(self.success_ending(options, content, &layout));
        scenes.push(self.alternative_ending(content, &layout));
        scenes
    }

    /// A single scene with generated ids. Choices default to medium
    /// difficulty and the configured quick-choice points.
    pub fn create_quick_scene(&mut self, title: &str, text: &str, choices: Vec<QuickChoice>) -> Scene {
        let mut scene = Scene::new(self.next_scene_id(), title, text);
        for quick in choices {
            let choice = Choice::new(self.next_choice_id(), quick.text, quick.next_scene_id)
                .with_points(quick.points.unwrap_or(self.config.quick_choice_points))
                .with_difficulty(quick.difficulty.unwrap_or(Difficulty::Medium));
            scene = scene.with_choice(choice);
        }
        scene
    }

    fn opening_scene(
        &mut self,
        title: &str,
        options: &ActivityOptions,
        content: &SubjectContent,
        layout: &Layout,
    ) -> Scene {
        let mut description = content.opening.to_string();
        if let Some(theme) = &options.theme {
            description.push_str(&format!(" Today's adventure: {theme}."));
        }

        let next = layout.after(None).to_string();
        let begin = Choice::new(self.next_choice_id(), "Begin the investigation", &next)
            .with_description("Dive straight into the first task.")
            .with_points(self.config.opening_points)
            .with_difficulty(Difficulty::Medium)
            .with_action(
                GameAction::add_item(content.starter_item)
                    .with_message(format!("You received: {}.", content.starter_item.replace('_', " "))),
            );
        let greet = Choice::new(self.next_choice_id(), format!("Talk with {}", content.mentor), &next)
            .with_description("Ask your mentor what to look out for.")
            .with_points(self.config.opening_points / 2)
            .with_difficulty(Difficulty::Easy)
            .with_action(
                GameAction::modify_relationship(content.mentor_key, 1)
                    .with_message(format!("{} appreciates your curiosity.", content.mentor)),
            )
            .with_feedback("Asking good questions is the first step of every investigation.");

        let mut scene = Scene::new(layout.opening.clone(), format!("{title}: The Beginning"), description)
            .with_location(content.location(0))
            .with_choice(begin)
            .with_choice(greet);
        if layout.gateway() == layout.opening {
            scene = self.gate_forward_choices(scene, content, layout);
        }
        scene
    }

    fn lesson_scene(
        &mut self,
        index: usize,
        objective: &str,
        options: &ActivityOptions,
        content: &SubjectContent,
        layout: &Layout,
    ) -> Scene {
        let id = layout.lessons[index].clone();
        let next = layout.after(Some(index)).to_string();
        let number = index + 1;

        let mut lesson = EducationalContent {
            concept: objective.to_string(),
            explanation: format!(
                "{} explains how {objective} shows up in the world around you.",
                content.mentor
            ),
            examples: vec![
                format!("Spot {objective} in an everyday situation."),
                format!("Predict what changes when {objective} is applied differently."),
            ],
            multimedia: None,
        };
        if options.include_multimedia {
            lesson.multimedia = Some(Multimedia {
                kind: content.media_kind.to_string(),
                description: format!("Interactive look at {objective}"),
            });
        }

        let observe = Choice::new(self.next_choice_id(), "Observe carefully", &next)
            .with_points(self.config.easy_points)
            .with_difficulty(Difficulty::Easy)
            .with_action(
                GameAction::add_item(format!("notes_{number}"))
                    .with_message("You jot down what you see."),
            )
            .with_feedback(format!("Careful observation is how {objective} is first noticed."));
        let experiment = Choice::new(self.next_choice_id(), "Run an experiment", &next)
            .with_points(self.config.medium_points)
            .with_difficulty(Difficulty::Medium)
            .with_action(GameAction::set_flag(format!("objective_{number}_explored"), true))
            .with_feedback(format!("Testing ideas turns {objective} from theory into evidence."));
        let analyze = Choice::new(self.next_choice_id(), "Analyze in depth", &next)
            .with_points(self.config.hard_points)
            .with_difficulty(Difficulty::Hard)
            .with_action(GameAction::set_flag(format!("objective_{number}_explored"), true))
            .with_action(
                GameAction::modify_relationship(content.mentor_key, 1)
                    .with_message(format!("{} is impressed by your rigour.", content.mentor)),
            )
            .with_feedback(format!("Deep analysis reveals why {objective} works the way it does."));

        let mut scene = Scene::new(
            id,
            format!("Objective {number}: {objective}"),
            format!("At the {}, a new puzzle about {objective} awaits.", content.location(number)),
        )
        .with_location(content.location(number))
        .with_educational_content(lesson)
        .with_choice(observe)
        .with_choice(experiment)
        .with_choice(analyze);

        if index > 0 {
            scene = scene.with_condition(SceneCondition::visited(layout.lessons[index - 1].clone()));
        }
        if layout.gateway() == layout.lessons[index] {
            scene = self.gate_forward_choices(scene, content, layout);
        }
        scene
    }

    /// Gate every choice into the challenge on the score threshold and add
    /// the two ways out when the threshold is not yet met: practising in
    /// place, or leaving for the alternative ending.
    fn gate_forward_choices(&mut self, mut scene: Scene, content: &SubjectContent, layout: &Layout) -> Scene {
        let gate = SceneCondition::score_at_least(self.config.challenge_threshold);
        for choice in &mut scene.choices {
            choice.conditions.push(gate.clone());
        }

        let practice = Choice::new(self.next_choice_id(), "Revisit the key ideas", &scene.id)
            .with_description("Practise a little more before the challenge.")
            .with_points(self.config.practice_points)
            .with_difficulty(Difficulty::Easy)
            .with_action(GameAction::set_flag("practiced", true))
            .with_feedback("Practice builds the confidence a challenge demands.");
        let leave = Choice::new(self.next_choice_id(), "Take a different path", &layout.alternative)
            .with_description(format!("Leave {} for today.", content.location(0)))
            .with_difficulty(Difficulty::Easy);
        scene.with_choice(practice).with_choice(leave)
    }

    fn challenge_scene(&mut self, options: &ActivityOptions, content: &SubjectContent, layout: &Layout) -> Scene {
        let summary = if options.educational_objectives.is_empty() {
            "everything you have seen so far".to_string()
        } else {
            options.educational_objectives.join(", ")
        };

        let solve = Choice::new(self.next_choice_id(), "Apply everything you learned", &layout.success)
            .with_points(self.config.challenge_points)
            .with_difficulty(Difficulty::Hard)
            .with_action(GameAction::set_flag("challenge_completed", true))
            .with_action(GameAction::unlock_scene(layout.success.clone()))
            .with_feedback(format!("Combining {summary} is what real problem solving looks like."));
        let hint = Choice::new(self.next_choice_id(), format!("Ask {} for a hint", content.mentor), &layout.success)
            .with_condition(SceneCondition::relationship_at_least(
                content.mentor_key,
                self.config.hint_relationship,
            ))
            .with_points(self.config.challenge_points / 2)
            .with_difficulty(Difficulty::Medium)
            .with_action(GameAction::set_flag("challenge_completed", true))
            .with_feedback("Knowing when to ask for help is a skill too.");
        let retreat = Choice::new(self.next_choice_id(), "Step back and reflect", &layout.alternative)
            .with_points(self.config.practice_points / 2)
            .with_difficulty(Difficulty::Easy)
            .with_consequence("You decide the challenge can wait.");

        Scene::new(layout.challenge.clone(), "The Final Challenge", content.challenge)
            .with_location(content.location(options.educational_objectives.len() + 1))
            .with_condition(SceneCondition::score_at_least(self.config.challenge_threshold))
            .with_educational_content(EducationalContent {
                concept: "Synthesis".to_string(),
                explanation: format!("Bring together {summary} to solve one problem."),
                examples: Vec::new(),
                multimedia: None,
            })
            .with_choice(solve)
            .with_choice(hint)
            .with_choice(retreat)
    }

    fn success_ending(&self, options: &ActivityOptions, content: &SubjectContent, layout: &Layout) -> Scene {
        let badge = match options.difficulty {
            Difficulty::Easy => "Explorer",
            Difficulty::Medium => "Investigator",
            Difficulty::Hard => "Master",
        };
        Scene::new(layout.success.clone(), "Mission Accomplished", content.success)
            .with_location(content.location(0))
            .with_reward(Reward::Badge {
                name: format!("{} {badge}", capitalize(&options.subject.to_string())),
            })
            .with_reward(Reward::Xp {
                amount: self.config.success_xp,
            })
            .ending()
    }

    fn alternative_ending(&self, content: &SubjectContent, layout: &Layout) -> Scene {
        Scene::new(layout.alternative.clone(), "A Different Path", content.alternative)
            .with_location(content.location(0))
            .with_reward(Reward::Xp {
                amount: self.config.alternative_xp,
            })
            .ending()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Subject;
    use tale_core::ConditionKind;

    fn three_objectives() -> ActivityOptions {
        ActivityOptions::new(Subject::Physics)
            .with_objective("a")
            .with_objective("b")
            .with_objective("c")
            .with_duration(25)
    }

    #[test]
    fn pacing_and_scene_count() {
        let mut builder = SceneGraphBuilder::new();
        let activity = builder.create_narrative_activity("Forces", "Push and pull", &three_objectives());
        assert_eq!(activity.max_choices, Some(10));
        assert_eq!(activity.available_scenes.len(), 7);
        assert_eq!(activity.starting_scene_id, "scene_1");
        assert!(activity.id.starts_with("narrative_"));
        assert!(activity.validate().is_empty(), "{:?}", activity.validate());
    }

    #[test]
    fn scene_order_and_ids() {
        let mut builder = SceneGraphBuilder::new();
        let scenes = builder.generate_scenes("Forces", &three_objectives());
        let ids: Vec<_> = scenes.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["scene_1", "scene_2", "scene_3", "scene_4", "scene_5", "scene_6", "scene_7"]
        );
        assert!(scenes[5].is_ending);
        assert!(scenes[6].is_ending);
        assert!(scenes[..5].iter().all(|s| !s.is_ending));
    }

    #[test]
    fn lessons_gated_on_predecessor() {
        let mut builder = SceneGraphBuilder::new();
        let scenes = builder.generate_scenes("Forces", &three_objectives());
        assert!(scenes[1].conditions.is_empty());
        assert_eq!(scenes[2].conditions, vec![SceneCondition::visited("scene_2")]);
        assert_eq!(scenes[3].conditions, vec![SceneCondition::visited("scene_3")]);
        assert!(scenes[1..4].iter().all(|s| s.educational_content.is_some()));
    }

    #[test]
    fn challenge_gated_on_score() {
        let mut builder = SceneGraphBuilder::new();
        let scenes = builder.generate_scenes("Forces", &three_objectives());
        let challenge = &scenes[4];
        assert_eq!(challenge.conditions, vec![SceneCondition::score_at_least(30)]);

        let gateway = &scenes[3];
        let into_challenge: Vec<_> = gateway
            .choices
            .iter()
            .filter(|c| c.next_scene_id == challenge.id)
            .collect();
        assert_eq!(into_challenge.len(), 3);
        assert!(into_challenge.iter().all(|c| c
            .conditions
            .iter()
            .any(|cond| cond.kind == ConditionKind::Score)));
        assert!(gateway.choices.iter().any(|c| c.next_scene_id == gateway.id));
        assert!(gateway.choices.iter().any(|c| c.next_scene_id == "scene_7"));
    }

    #[test]
    fn empty_objectives_yield_degenerate_graph() {
        let mut builder = SceneGraphBuilder::new();
        let opts = ActivityOptions::new(Subject::Other("history".into()));
        let activity = builder.create_narrative_activity("Eras", "", &opts);
        assert_eq!(activity.available_scenes.len(), 4);
        let opening = &activity.available_scenes[0];
        assert!(opening.choices.iter().any(|c| c.next_scene_id == "scene_2"));
        assert!(activity.validate().is_empty());
    }

    #[test]
    fn zero_duration_leaves_limit_unset() {
        let mut builder = SceneGraphBuilder::new();
        let opts = three_objectives().with_duration(0);
        assert_eq!(builder.create_narrative_activity("T", "", &opts).max_choices, None);
    }

    #[test]
    fn ids_keep_counting_across_calls() {
        let mut builder = SceneGraphBuilder::new();
        let first = builder.create_narrative_activity("One", "", &three_objectives());
        let second = builder.create_narrative_activity("Two", "", &three_objectives());
        assert_eq!(second.starting_scene_id, "scene_8");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn generation_is_deterministic() {
        let a = SceneGraphBuilder::new().generate_scenes("Forces", &three_objectives());
        let b = SceneGraphBuilder::new().generate_scenes("Forces", &three_objectives());
        assert_eq!(a, b);
    }

    #[test]
    fn subject_changes_text_not_topology() {
        let physics = SceneGraphBuilder::new().generate_scenes("T", &three_objectives());
        let mut biology_opts = three_objectives();
        biology_opts.subject = Subject::Biology;
        let biology = SceneGraphBuilder::new().generate_scenes("T", &biology_opts);

        assert_ne!(physics[0].location, biology[0].location);
        let edges = |scenes: &[Scene]| -> Vec<(String, String)> {
            scenes
                .iter()
                .flat_map(|s| s.choices.iter().map(move |c| (s.id.clone(), c.next_scene_id.clone())))
                .collect()
        };
        assert_eq!(edges(&physics), edges(&biology));
    }

    #[test]
    fn multimedia_is_optional() {
        let plain = SceneGraphBuilder::new().generate_scenes("T", &three_objectives());
        assert!(plain[1].educational_content.as_ref().unwrap().multimedia.is_none());

        let rich = SceneGraphBuilder::new()
            .generate_scenes("T", &three_objectives().with_multimedia(true));
        let media = rich[1].educational_content.as_ref().unwrap().multimedia.as_ref().unwrap();
        assert_eq!(media.kind, "simulation");
    }

    #[test]
    fn quick_scene_defaults() {
        let mut builder = SceneGraphBuilder::new();
        let scene = builder.create_quick_scene(
            "A",
            "text",
            vec![
                QuickChoice::new("go", "end"),
                QuickChoice::new("rush", "end").with_points(3).with_difficulty(Difficulty::Hard),
            ],
        );
        assert_eq!(scene.id, "scene_1");
        assert_eq!(scene.choices[0].id, "choice_1");
        assert_eq!(scene.choices[0].points, Some(10));
        assert_eq!(scene.choices[0].difficulty, Some(Difficulty::Medium));
        assert_eq!(scene.choices[1].id, "choice_2");
        assert_eq!(scene.choices[1].points, Some(3));
        assert_eq!(scene.choices[1].difficulty, Some(Difficulty::Hard));
    }

    #[test]
    fn success_badge_name() {
        let scenes = SceneGraphBuilder::new().generate_scenes("T", &three_objectives());
        insta::assert_debug_snapshot!(scenes[5].rewards, @r#"
        [
            Badge {
                name: "Physics Investigator",
            },
            Xp {
                amount: 100,
            },
        ]
        "#);
    }
}
