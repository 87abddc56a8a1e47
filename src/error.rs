//! Error types for texture import, export and wiki routing

use thiserror::Error;

/// Result type alias for nemtex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while importing or exporting a texture
#[derive(Error, Debug)]
pub enum Error {
    /// The decoded texture is not the required size
    #[error("Error: Only {expected_width}x{expected_height} textures supported. {width}x{height} detected.")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected_width: u32,
        expected_height: u32,
    },

    /// The input could not be decoded as an image. The detail is kept for
    /// logging only; users always see the generic message.
    #[error("Error: could not load the image.")]
    DecodeError(String),

    /// Export was requested before any texture was imported
    #[error("Import a texture first.")]
    NoTexture,

    /// One or more required descriptor fields are empty
    #[error("Please fill in all fields ({}).", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// A row index outside the imported texture
    #[error("Row {row} does not exist (texture has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// An in-flight import was replaced by a newer one
    #[error("Import superseded by a newer selection")]
    Superseded,

    /// Invalid configuration or manifest
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// JSON encoding or decoding failed
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Filesystem error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
