//! Request argument and response body validation errors.

use thiserror::Error;

/// Errors raised when a request DTO is built with bad arguments, or when a
/// response cannot be interpreted.
///
/// Request-side variants are raised at construction time and are never
/// silently corrected. The one documented exception is accent strength on
/// [`crate::types::GeneratedVoiceRequest`], which is clamped.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A numeric argument fell outside its accepted range.
    #[error("`{field}` must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// Argument name.
        field: &'static str,
        /// The rejected value.
        value: f64,
        /// Inclusive lower bound.
        min: f64,
        /// Inclusive upper bound.
        max: f64,
    },

    /// A text argument had a length outside its accepted range.
    #[error("`{field}` must be between {min} and {max} characters, got {actual}")]
    LengthOutOfRange {
        /// Argument name.
        field: &'static str,
        /// Actual length in characters.
        actual: usize,
        /// Inclusive minimum length.
        min: usize,
        /// Inclusive maximum length.
        max: usize,
    },

    /// A required text field was empty.
    #[error("Field `{field}` must not be empty")]
    EmptyField {
        /// Field name.
        field: &'static str,
    },

    /// A media type was not of the form `type/subtype`.
    #[error("Invalid media type `{0}`, expected `type/subtype`")]
    InvalidMediaType(String),

    /// A URL argument could not be parsed.
    #[error("Field `{field}` is not a valid URL: {source}")]
    InvalidUrl {
        /// Field name.
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    /// A wrapped stream contained no data.
    #[error("Stream `{name}` is empty")]
    EmptyStream {
        /// Name given to the stream.
        name: String,
    },

    /// A wrapped stream could not be read.
    #[error("Stream `{name}` is not readable: {source}")]
    UnreadableStream {
        /// Name given to the stream.
        name: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Mutually exclusive arguments were both set, or neither was.
    #[error("Exactly one of {first} or {second} must be provided")]
    ConflictingSources {
        /// First argument name.
        first: &'static str,
        /// Second argument name.
        second: &'static str,
    },

    /// JSON (de)serialization failed.
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An expected response header was missing.
    #[error("Response is missing the `{0}` header")]
    MissingHeader(&'static str),
}

impl ValidationError {
    /// Returns `true` for errors raised while building a request.
    pub fn is_argument_error(&self) -> bool {
        !matches!(self, Self::JsonParse(_) | Self::MissingHeader(_))
    }

    /// Checks `value` against an inclusive range.
    pub(crate) fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), Self> {
        if value.is_nan() || value < min || value > max {
            return Err(Self::OutOfRange {
                field,
                value,
                min,
                max,
            });
        }
        Ok(())
    }
}
