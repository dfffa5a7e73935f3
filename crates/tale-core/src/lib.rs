//! Core types for Tale: the scene graph that narrative activities are made of.
//!
//! This crate defines the data model shared by the scene-graph builder and the
//! narrative engine. It performs no I/O beyond JSON (de)serialization; you can
//! construct a [`NarrativeActivity`] programmatically or load one from JSON.

/// Side-effecting instructions executed when a choice is taken.
pub mod action;
/// Narrative activities (a scene graph plus metadata) and graph validation.
pub mod activity;
/// Predicates gating scenes and choices.
pub mod condition;
/// Error types used throughout the crate.
pub mod error;
/// Scenes, choices, and their authoring metadata.
pub mod scene;
/// Dynamically typed values stored in story flags.
pub mod value;

/// Re-export action types.
pub use action::GameAction;
/// Re-export activity types.
pub use activity::{GraphIssue, IssueLevel, NarrativeActivity};
/// Re-export condition types.
pub use condition::{ConditionKind, Operator, SceneCondition, StateView, evaluate_all};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export scene types.
pub use scene::{Choice, Difficulty, EducationalContent, Multimedia, Reward, Scene};
/// Re-export the flag value type.
pub use value::FlagValue;
