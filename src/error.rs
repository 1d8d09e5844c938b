use thiserror::Error;

/// Result type alias using ContrastError.
pub type ContrastResult<T> = Result<T, ContrastError>;

/// Errors from the fallible edges of the crate: decoding inputs and exporting
/// reports. Rating itself never fails.
#[derive(Debug, Error)]
pub enum ContrastError {
    /// Pixel data length does not match `width * height * 4`.
    #[error("Invalid pixel buffer: {width}x{height} RGBA8 data has {len} bytes")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    /// Layer document could not be decoded.
    #[error("Invalid layer document: {0}")]
    Document(#[from] serde_json::Error),

    /// Report image could not be written.
    #[error("Image export error: {0}")]
    Image(#[from] image::ImageError),
}
