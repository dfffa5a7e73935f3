use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;
use tale_core::{Choice, Reward, Scene};
use tale_engine::{EngineConfig, NarrativeEngine, SaveState};

pub fn run(
    file: &Path,
    choices: Option<&str>,
    resume: Option<&Path>,
    save: Option<&Path>,
    config: Option<&Path>,
) -> Result<(), String> {
    let activity = super::load_activity(file)?;
    let config = match config {
        Some(path) => EngineConfig::from_json(&super::read_file(path)?)
            .map_err(|e| format!("invalid engine config {}: {e}", path.display()))?,
        None => EngineConfig::default(),
    };

    let mut builder = NarrativeEngine::builder(activity).config(config);
    if let Some(path) = resume {
        let snapshot = SaveState::from_json(&super::read_file(path)?).map_err(|e| e.to_string())?;
        builder = builder.resume_from(snapshot);
    }
    let mut engine = builder.try_build().map_err(|e| e.to_string())?;

    let mut script: Option<VecDeque<String>> = choices.map(|list| {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    });
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let mut result = None;
    loop {
        let Some(scene) = engine.current_scene().cloned() else {
            println!(
                "  {}",
                "The story cannot continue: this scene does not exist.".red()
            );
            break;
        };
        print_scene(&scene);

        let available: Vec<Choice> = engine.available_choices().into_iter().cloned().collect();
        if available.is_empty() {
            println!("  No choices available.");
            break;
        }
        for (i, choice) in available.iter().enumerate() {
            println!("  {}. {} {}", i + 1, choice.text, format!("({})", choice.id).dimmed());
        }

        let input = match script.as_mut() {
            Some(queue) => match queue.pop_front() {
                Some(input) => {
                    println!("  > {input}");
                    input
                }
                None => break,
            },
            None => {
                print!("  > ");
                io::stdout().flush().map_err(|e| e.to_string())?;
                match lines.next() {
                    Some(Ok(line)) => line.trim().to_string(),
                    _ => break,
                }
            }
        };
        if input == "quit" {
            break;
        }

        let Some(choice_id) = resolve_choice(&input, &available) else {
            if script.is_some() {
                return Err(format!("unknown choice: \"{input}\""));
            }
            println!("  Unknown choice, try again.");
            continue;
        };

        let outcome = engine.process_choice(&choice_id).map_err(|e| e.to_string())?;
        println!();
        for message in &outcome.messages {
            println!("  {}", message.italic());
        }
        if let Some(consequence) = &outcome.consequence {
            println!("  {consequence}");
        }
        if let Some(feedback) = &outcome.educational_feedback {
            println!("  {} {feedback}", "Insight:".cyan().bold());
        }
        if outcome.result.is_some() {
            if let Some(ending) = outcome.next_scene.as_ref().filter(|s| s.is_ending) {
                print_scene(ending);
                print_rewards(ending);
            }
            result = outcome.result;
            break;
        }
    }

    match &result {
        Some(result) => print!("\n{}", result.to_markdown(&engine.activity().title)),
        None => println!(
            "\n  Story paused after {} choices ({} points).",
            engine.game_state().total_choices,
            engine.game_state().total_points
        ),
    }

    if let Some(path) = save {
        let json = engine.save_state().to_json().map_err(|e| e.to_string())?;
        fs::write(path, json).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        println!("  Saved progress to {}", path.display());
    }
    Ok(())
}

/// Match a 1-based choice number or a choice id.
fn resolve_choice(input: &str, available: &[Choice]) -> Option<String> {
    if let Ok(n) = input.parse::<usize>() {
        return n
            .checked_sub(1)
            .and_then(|i| available.get(i))
            .map(|c| c.id.clone());
    }
    available
        .iter()
        .find(|c| c.id == input)
        .map(|c| c.id.clone())
}

fn print_scene(scene: &Scene) {
    println!();
    if scene.location.is_empty() {
        println!("  {}", scene.title.bold());
    } else {
        println!("  {} [{}]", scene.title.bold(), scene.location.dimmed());
    }
    for line in scene.description.lines() {
        println!("  {}", line.trim());
    }
    if let Some(content) = &scene.educational_content {
        println!("  {} {}", "Concept:".green(), content.concept);
        println!("  {}", content.explanation);
    }
    println!();
}

fn print_rewards(scene: &Scene) {
    for reward in &scene.rewards {
        match reward {
            Reward::Badge { name } => println!("  {} {name}", "Badge:".yellow().bold()),
            Reward::Xp { amount } => println!("  {} {amount}", "XP:".yellow().bold()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_numbers_and_ids() {
        let choices = vec![Choice::new("a", "A", "x"), Choice::new("b", "B", "y")];
        assert_eq!(resolve_choice("2", &choices), Some("b".to_string()));
        assert_eq!(resolve_choice("a", &choices), Some("a".to_string()));
        assert_eq!(resolve_choice("0", &choices), None);
        assert_eq!(resolve_choice("3", &choices), None);
        assert_eq!(resolve_choice("c", &choices), None);
    }
}
