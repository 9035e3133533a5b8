use pixel_art::ConvertError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unknown profile: {0}")]
    UnknownProfile(String),

    #[error("Unexpected message: expected {0}")]
    UnexpectedMessage(&'static str),

    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),

    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: usize, height: usize },

    #[error("Invalid image: {0}")]
    Image(#[from] ConvertError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkerError {
    #[error("Worker is busy with another request")]
    Busy,

    #[error("No request is outstanding")]
    Idle,

    #[error("Processing failed: {0}")]
    Processing(String),

    #[error("Worker thread has stopped")]
    Disconnected,

    #[error("Failed to spawn worker thread: {0}")]
    Spawn(String),
}
