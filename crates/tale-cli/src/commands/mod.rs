pub mod check;
pub mod generate;
pub mod play;
pub mod show;

use std::fs;
use std::path::Path;

use tale_core::NarrativeActivity;

/// Read a file, naming it in the error.
fn read_file(path: &Path) -> Result<String, String> {
    fs::read_to_string(path).map_err(|e| format!("cannot read {}: {e}", path.display()))
}

/// Load an activity from a JSON file.
fn load_activity(path: &Path) -> Result<NarrativeActivity, String> {
    let json = read_file(path)?;
    NarrativeActivity::from_json(&json).map_err(|e| format!("invalid activity {}: {e}", path.display()))
}

/// Write `content` to `output`, or stdout when no path is given.
fn write_output(content: &str, output: Option<&Path>) -> Result<(), String> {
    match output {
        Some(path) => {
            fs::write(path, content).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
            eprintln!("  Wrote {}", path.display());
            Ok(())
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
