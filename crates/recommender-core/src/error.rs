use thiserror::Error;

#[derive(Error, Debug)]
pub enum RecommenderError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Cache error: {0}")]
    CacheError(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Inference error: {0}")]
    InferenceError(String),
}
