use thiserror::Error;

/// Everything that can go wrong between handing an image to a detection backend
/// and getting candidates back.
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("failed to load model: {0}")]
    ModelLoad(#[source] ort::Error),
    #[error("inference failed: {0}")]
    Inference(#[source] ort::Error),
    #[error("malformed detector output: {0}")]
    BadOutput(String),
}
