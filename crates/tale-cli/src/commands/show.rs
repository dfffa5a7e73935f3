use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

pub fn run(file: &Path) -> Result<(), String> {
    let activity = super::load_activity(file)?;

    println!("  {} [{}]", activity.title.bold(), activity.id.dimmed());
    if !activity.description.is_empty() {
        println!("  {}", activity.description);
    }
    if !activity.educational_objectives.is_empty() {
        println!("  objectives: {}", activity.educational_objectives.join(", "));
    }
    match activity.max_choices {
        Some(max) => println!("  start: {}, choice limit: {max}", activity.starting_scene_id),
        None => println!("  start: {}", activity.starting_scene_id),
    }
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Title", "Choices", "Ending", "Gated"]);

    for scene in &activity.available_scenes {
        let targets: Vec<&str> = scene.choices.iter().map(|c| c.next_scene_id.as_str()).collect();
        let choices = if targets.is_empty() {
            "-".to_string()
        } else {
            format!("{} -> {}", targets.len(), targets.join(", "))
        };
        let gated = scene
            .conditions
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" and ");
        table.add_row(vec![
            scene.id.as_str(),
            scene.title.as_str(),
            choices.as_str(),
            if scene.is_ending { "yes" } else { "" },
            gated.as_str(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} scenes", activity.scene_count());
    Ok(())
}
