use thiserror::Error;

/// Errors that can occur while setting up a puzzle session
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("Grid must have at least one row and one column (got {rows}x{cols})")]
    InvalidGrid { rows: usize, cols: usize },

    #[error("Image {width}x{height} is too small for a {rows}x{cols} grid")]
    ImageTooSmall {
        width: usize,
        height: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Snap offset must be a finite, non-negative number (got {0})")]
    InvalidSnapOffset(f32),

    #[error("Margin must be a finite, non-negative number (got {0})")]
    InvalidMargin(f32),

    #[error("Invalid color literal: {0:?}")]
    InvalidColor(String),

    #[error("Failed to parse configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for puzzle setup operations
pub type PuzzleResult<T> = Result<T, PuzzleError>;
