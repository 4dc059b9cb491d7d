use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KineScoreError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timeline Export Error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    /// A pose track file exists but does not match the track format.
    #[error("Pose Track Error in '{}': {source}", .path.display())]
    PoseTrack {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid Scoring Parameters: {0}")]
    Config(String),

    #[error("Invalid Joint Table: {0}")]
    Validation(String),
}

pub type KsResult<T> = Result<T, KineScoreError>;
