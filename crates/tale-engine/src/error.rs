//! Error types for the narrative engine.

use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors reported by the engine.
///
/// None of these poison the engine: a failed call leaves the state exactly as
/// it was and the caller may simply try again.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The current scene id does not resolve to a scene in the graph.
    #[error("no current scene: \"{scene_id}\" is not part of the activity")]
    NoCurrentScene {
        /// The unresolved scene id.
        scene_id: String,
    },

    /// The choice id is not one of the current scene's choices.
    #[error("unknown choice \"{choice_id}\" in scene \"{scene_id}\"")]
    UnknownChoice {
        /// The scene that was searched.
        scene_id: String,
        /// The requested choice id.
        choice_id: String,
    },

    /// A snapshot could not be parsed or produced.
    #[error("invalid save state: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Activity error.
    #[error("{0}")]
    Core(#[from] tale_core::CoreError),
}
