//! Error types for the confetti core.

use thiserror::Error;

/// Errors produced by field, palette, scheduling and greeting operations.
#[derive(Debug, Error)]
pub enum ConfettiError {
    /// Surface width or height was zero, negative, or not finite.
    #[error("invalid dimensions: width and height must be positive and finite")]
    InvalidDimensions,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// No built-in palette has the requested name.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// A field configuration value was out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The host frame scheduler refused to register a callback.
    #[error("frame scheduler error: {0}")]
    Scheduler(String),

    /// A file could not be written.
    #[error("i/o error: {0}")]
    Io(String),

    /// A greeting submission had a blank name.
    #[error("name must not be empty")]
    EmptyName,

    /// A greeting submission's photo was not an image.
    #[error("not an image file: {0}")]
    NotAnImage(String),
}
