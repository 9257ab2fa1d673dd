//! Error types for repace.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepaceError {
    // Merge validation errors
    #[error("Merge requires at least two inputs, got {count}")]
    InvalidInputCount { count: usize },

    #[error("Sample rate mismatch: expected {expected} Hz, got {actual} Hz")]
    SampleRateMismatch { expected: u32, actual: u32 },

    #[error("Channel count mismatch: expected {expected}, got {actual}")]
    ChannelCountMismatch { expected: usize, actual: usize },

    // Segmentation / resynthesis errors
    #[error("No speech detected above the silence threshold")]
    NoSpeechDetected,

    #[error("Resynthesis produced an empty output ({samples} samples)")]
    EmptyResynthesis { samples: usize },

    // Codec errors
    #[error("Decode failed: {message}")]
    DecodeFailure { message: String },

    #[error("Encoder capability not available: {capability}")]
    EncoderUnavailable { capability: String },

    // Configuration errors
    #[error("Invalid setting {key}: {message}")]
    InvalidSetting { key: String, message: String },

    #[error("Invalid sample buffer: {message}")]
    InvalidBuffer { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, RepaceError>;
