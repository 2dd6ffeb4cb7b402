// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Io(String),
    Config(String),
    /// An image could not be decoded.
    Decode(String),
    /// The collage could not be encoded or written.
    Export(String),
    /// Gap and margin leave no room for cells in the frame.
    InvalidLayout { cell_width: f32, cell_height: f32 },
    /// Frame width or aspect ratio is not a positive finite number.
    InvalidFrame(String),
}

impl Error {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            Error::Io(_) => "error-io",
            Error::Config(_) => "error-config",
            Error::Decode(_) => "error-decode",
            Error::Export(_) => "error-export",
            Error::InvalidLayout { .. } => "error-invalid-layout",
            Error::InvalidFrame(_) => "error-invalid-frame",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Decode(e) => write!(f, "Decode Error: {}", e),
            Error::Export(e) => write!(f, "Export Error: {}", e),
            Error::InvalidLayout {
                cell_width,
                cell_height,
            } => write!(
                f,
                "Invalid Layout: cells would be {}x{}",
                cell_width, cell_height
            ),
            Error::InvalidFrame(e) => write!(f, "Invalid Frame: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<image_rs::ImageError> for Error {
    fn from(err: image_rs::ImageError) -> Self {
        match err {
            image_rs::ImageError::IoError(io) => Error::Io(io.to_string()),
            image_rs::ImageError::Encoding(e) => Error::Export(e.to_string()),
            other => Error::Decode(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
