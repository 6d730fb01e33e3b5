//! Error types for FlowDoc parsing, model application and conversion.
//!
//! FlowDoc is deliberately permissive: unrecognized lines, odd indentation and
//! malformed `$models` entries are tolerated rather than rejected (see
//! [`crate::Diagnostics`] for how to observe them). The errors below are the
//! few conditions that do stop a call.
//!
//! ## Error Categories
//!
//! - **Syntax Errors**: structural failures, raised only by strict parsing
//! - **Typed Value Errors**: a raw value failed strict validation for a declared field type
//! - **Model Errors**: `use_model` names an unknown model or is not a string
//! - **Conversion Errors**: JSON, MessagePack and I/O failures
//!
//! ## Examples
//!
//! ```rust
//! use flowdoc::{parse_typed, Error, FieldType};
//!
//! let err = parse_typed("yes", FieldType::Bool).unwrap_err();
//! assert!(matches!(err, Error::TypedValue { .. }));
//! assert!(err.to_string().contains("invalid bool value"));
//! ```

use crate::literal::FieldType;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised by this crate.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Structural failure in the document text
    #[error("Syntax error at line {line}:\n{context}\n{msg}")]
    Syntax {
        line: usize,
        msg: String,
        context: String,
    },

    /// Strict validation of a raw value against a declared field type failed
    #[error("invalid {expected} value: {found}")]
    TypedValue { expected: FieldType, found: String },

    /// `use_model` names a model that is not registered
    #[error("model '{0}' not found in registry")]
    ModelNotFound(String),

    /// A reserved directive has the wrong shape
    #[error("Invalid directive: {0}")]
    InvalidDirective(String),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(String),

    /// MessagePack encoding or decoding failed
    #[error("Binary codec error: {0}")]
    Binary(String),

    /// Value cannot be represented as a FlowDoc tree
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a syntax error for the given 1-based line.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowdoc::Error;
    ///
    /// let err = Error::syntax(10, "odd indentation", "   key = 1");
    /// assert!(err.to_string().contains("line 10"));
    /// ```
    pub fn syntax(line: usize, msg: &str, context: &str) -> Self {
        Error::Syntax {
            line,
            msg: msg.to_string(),
            context: context.to_string(),
        }
    }

    /// Creates a typed value error for `found` failing validation as `expected`.
    pub fn typed_value(expected: FieldType, found: &str) -> Self {
        Error::TypedValue {
            expected,
            found: found.to_string(),
        }
    }

    /// Creates a model lookup error.
    pub fn model_not_found(name: &str) -> Self {
        Error::ModelNotFound(name.to_string())
    }

    /// Creates an unsupported type error for values without a FlowDoc representation.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use flowdoc::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl From<rmp_serde::encode::Error> for Error {
    fn from(err: rmp_serde::encode::Error) -> Self {
        Error::Binary(err.to_string())
    }
}

impl From<rmp_serde::decode::Error> for Error {
    fn from(err: rmp_serde::decode::Error) -> Self {
        Error::Binary(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
