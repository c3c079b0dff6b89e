use thiserror::Error;

#[derive(Debug, Error)]
pub enum FaceViewError {
    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("viewport dimensions must be > 0")]
    ZeroViewport,

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("quality must be between 0.0 and 1.0, got {0}")]
    InvalidQuality(f32),

    #[error("eye-open threshold must be between 0.0 and 1.0, got {0}")]
    InvalidThreshold(f32),

    #[error("failed to load detection model: {0}")]
    ModelError(String),
}
