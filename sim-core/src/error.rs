//! Error types for parsing colors and loading configuration.
//!
//! Nothing in the per-frame simulation returns an error: a missing surface or
//! an empty viewport degrades to an empty frame. Errors only surface where
//! user-provided input is parsed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced when parsing a `#rrggbb` / `#rgb` color string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color `{0}` must start with `#`")]
    MissingHash(String),
    #[error("color `{0}` must have 3 or 6 hex digits")]
    BadLength(String),
    #[error("color `{0}` contains a non-hex digit")]
    BadDigit(String),
}

/// Errors produced when loading or validating a [`crate::config::FieldConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] serde_json::Error),
    #[error("animation speed must be finite and non-negative, got {0}")]
    InvalidSpeed(f32),
    #[error("particle size must be finite and non-negative, got {0}")]
    InvalidSize(f32),
}
