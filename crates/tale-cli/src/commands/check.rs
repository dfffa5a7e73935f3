use std::path::Path;

use colored::Colorize;

pub fn run(file: &Path) -> Result<(), String> {
    let activity = super::load_activity(file)?;
    let issues = activity.validate();

    for issue in &issues {
        let line = issue.to_string();
        if issue.is_error() {
            eprintln!("  {}", line.red());
        } else {
            eprintln!("  {}", line.yellow());
        }
    }

    let errors = issues.iter().filter(|i| i.is_error()).count();
    let warnings = issues.len() - errors;
    if errors > 0 {
        return Err(format!(
            "{} error{}, {} warning{}",
            errors,
            if errors == 1 { "" } else { "s" },
            warnings,
            if warnings == 1 { "" } else { "s" },
        ));
    }

    println!("  All checks passed for '{}'.", activity.title);
    println!(
        "  {} scenes, {} warning{}",
        activity.scene_count(),
        warnings,
        if warnings == 1 { "" } else { "s" }
    );
    Ok(())
}
