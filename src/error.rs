use thiserror::Error;

/// Errors that can occur while editing, loading or saving the canvas
#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    OutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },

    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Result type for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Errors produced when parsing user supplied text (colors, accelerators, operations)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Invalid color '{0}', expected #RRGGBB")]
    Color(String),

    #[error("Invalid accelerator '{0}'")]
    Accelerator(String),

    #[error("Invalid operation '{0}'")]
    Operation(String),
}
