/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when loading or saving a narrative activity.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The activity JSON could not be parsed or produced.
    #[error("invalid activity JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A scene id could not be resolved within the activity.
    #[error("scene not found: \"{0}\"")]
    SceneNotFound(String),
}
