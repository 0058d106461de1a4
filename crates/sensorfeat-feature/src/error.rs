/// Errors that can occur in feature operations.
#[derive(Debug, thiserror::Error)]
pub enum FeatureError {
    /// Decode or layout error.
    #[error("frame error: {0}")]
    Frame(#[from] sensorfeat_frame::FrameError),

    /// A layout file could not be loaded.
    #[error("failed to load layout: {0}")]
    Config(String),

    /// A layout file is not valid JSON for the expected shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
