//! Custom error types for slicing operations

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Slicing error types
#[derive(Debug)]
pub enum SliceError {
    /// I/O error
    IoError(io::Error),
    /// Source bytes could not be decoded as an image
    Decode {
        /// Absolute path of the source image
        path: PathBuf,
        /// Codec error reported by the decoder
        source: image::ImageError,
    },
    /// Image codec error while encoding or converting
    ImageError(image::ImageError),
    /// A region or placement does not fit the image it refers to
    InvalidGeometry(String),
    /// The slice manifest is malformed
    Manifest(String),
    /// An output transform failed for a given input
    OutputFailed {
        /// Source path of the input being processed
        input: String,
        /// Destination path of the failing output
        output: String,
        /// Underlying failure
        source: Box<SliceError>,
    },
    /// Generic error with message
    GenericError(String),
}

impl fmt::Display for SliceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SliceError::IoError(e) => write!(f, "I/O error: {}", e),
            SliceError::Decode { path, source } => {
                write!(f, "Failed to decode {}: {}", path.display(), source)
            }
            SliceError::ImageError(e) => write!(f, "Image error: {}", e),
            SliceError::InvalidGeometry(msg) => write!(f, "Invalid geometry: {}", msg),
            SliceError::Manifest(msg) => write!(f, "Manifest error: {}", msg),
            SliceError::OutputFailed { input, output, source } => {
                write!(f, "Output {} of {} failed: {}", output, input, source)
            }
            SliceError::GenericError(msg) => write!(f, "Slice error: {}", msg),
        }
    }
}

impl std::error::Error for SliceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SliceError::IoError(e) => Some(e),
            SliceError::Decode { source, .. } => Some(source),
            SliceError::ImageError(e) => Some(e),
            SliceError::OutputFailed { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for SliceError {
    fn from(error: io::Error) -> Self {
        SliceError::IoError(error)
    }
}

impl From<image::ImageError> for SliceError {
    fn from(error: image::ImageError) -> Self {
        SliceError::ImageError(error)
    }
}

impl From<String> for SliceError {
    fn from(msg: String) -> Self {
        SliceError::GenericError(msg)
    }
}

/// Result type for slicing operations
pub type SliceResult<T> = Result<T, SliceError>;
