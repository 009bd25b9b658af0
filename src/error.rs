use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    /// The topic has no usable question records, so no round can be played.
    #[error("topic '{topic}' has no questions to quiz on")]
    EmptyBank { topic: String },
    #[error("no topic matches '{0}'")]
    TopicNotFound(String),
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid topic json in {origin}: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}
