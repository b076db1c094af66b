use std::{fmt, io, string::FromUtf8Error};
use struson::reader::ReaderError;
use thiserror::Error as ThisError;

///
/// KsonError
///
/// Every failure raised while resolving adapters or moving values through a JSON stream.
///

#[derive(Debug, ThisError)]
pub enum KsonError {
    #[error("required field '{field}' of '{record}' is missing")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("unexpected null for {target}")]
    UnexpectedNull { target: &'static str },

    #[error("invalid number '{value}' for {target}")]
    InvalidNumber { value: String, target: &'static str },

    #[error("no type adapter available for '{0}'")]
    NoAdapter(String),

    #[error("adapter serving '{provided}' cannot be used for '{requested}'")]
    IncompatibleAdapter { requested: String, provided: String },

    #[error("type token '{token}' does not describe '{requested}'")]
    TokenMismatch {
        token: String,
        requested: &'static str,
    },

    #[error("type adapter registry has been dropped")]
    RegistryDropped,

    #[error(transparent)]
    Read(#[from] ReaderError),

    #[error("write error: {0}")]
    Write(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Utf8(#[from] FromUtf8Error),
}

impl KsonError {
    /// Required-field failure raised by generated read routines.
    #[must_use]
    pub const fn missing_field(record: &'static str, field: &'static str) -> Self {
        Self::MissingField { record, field }
    }

    #[must_use]
    pub const fn unexpected_null(target: &'static str) -> Self {
        Self::UnexpectedNull { target }
    }

    /// Return a stable error kind independent of the message text.
    #[must_use]
    pub const fn kind(&self) -> KsonErrorKind {
        match self {
            Self::MissingField { .. } => KsonErrorKind::MissingField,
            Self::UnexpectedNull { .. } => KsonErrorKind::UnexpectedNull,
            Self::InvalidNumber { .. } => KsonErrorKind::InvalidNumber,
            Self::NoAdapter(_) => KsonErrorKind::NoAdapter,
            Self::IncompatibleAdapter { .. } => KsonErrorKind::IncompatibleAdapter,
            Self::TokenMismatch { .. } => KsonErrorKind::TokenMismatch,
            Self::RegistryDropped => KsonErrorKind::RegistryDropped,
            Self::Read(_) => KsonErrorKind::Read,
            Self::Write(_) | Self::Io(_) | Self::Utf8(_) => KsonErrorKind::Write,
        }
    }
}

///
/// KsonErrorKind
///
/// Stable error-kind taxonomy for runtime failures.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KsonErrorKind {
    MissingField,
    UnexpectedNull,
    InvalidNumber,
    NoAdapter,
    IncompatibleAdapter,
    TokenMismatch,
    RegistryDropped,
    Read,
    Write,
}

impl KsonErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::UnexpectedNull => "unexpected_null",
            Self::InvalidNumber => "invalid_number",
            Self::NoAdapter => "no_adapter",
            Self::IncompatibleAdapter => "incompatible_adapter",
            Self::TokenMismatch => "token_mismatch",
            Self::RegistryDropped => "registry_dropped",
            Self::Read => "read",
            Self::Write => "write",
        }
    }
}

impl fmt::Display for KsonErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
