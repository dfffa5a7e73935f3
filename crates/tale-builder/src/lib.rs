//! Procedural scene-graph generator for Tale.
//!
//! [`SceneGraphBuilder`] turns authoring parameters (subject, difficulty,
//! learning objectives, duration) into a complete
//! [`NarrativeActivity`](tale_core::NarrativeActivity): an opening scene, one
//! educational scene per objective, a score-gated challenge, and two endings.

/// The scene-graph builder.
pub mod builder;
/// Builder configuration.
pub mod config;
/// Subject-specific flavour text.
pub mod content;
/// Authoring parameters.
pub mod options;

pub use builder::{QuickChoice, SceneGraphBuilder};
pub use config::BuilderConfig;
pub use content::SubjectContent;
pub use options::{ActivityOptions, Subject};
