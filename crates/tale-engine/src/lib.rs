//! Narrative state machine for Tale.
//!
//! A [`NarrativeEngine`] drives one play-through of a
//! [`NarrativeActivity`](tale_core::NarrativeActivity): it tracks inventory,
//! story flags, relationships and visited scenes, filters choices by their
//! conditions, executes choice actions, and scores the play-through once an
//! ending is reached. State can be captured as a flat [`SaveState`] and
//! resumed later.

/// Wall-clock abstraction used for timestamps and scoring.
pub mod clock;
/// Scoring weights and thresholds.
pub mod config;
/// The engine itself.
pub mod engine;
/// Error types for the engine.
pub mod error;
/// Final results, achievements and feedback.
pub mod result;
/// Flat save-state snapshots.
pub mod snapshot;
/// Runtime player state and the progress log.
pub mod state;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::EngineConfig;
pub use engine::{ChoiceOutcome, EngineBuilder, NarrativeEngine};
pub use error::{EngineError, EngineResult};
pub use result::{Achievement, FeedbackTier, NarrativeResult};
pub use snapshot::SaveState;
pub use state::{InitialState, NarrativeGameState, StoryProgress};
