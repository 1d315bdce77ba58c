use std::panic::Location;

use crate::returned::BoxError;

/// Which stage of a checked call failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallErrorKind {
    /// One or more schema references are not registered.
    ReferenceResolution,
    /// One or more inline schemas are rejected by the engine.
    InvalidSchema,
    /// One or more arguments fail their schema.
    ParameterValidation,
    /// The function produced a ready value for an asynchronous contract, or
    /// a pending value for a synchronous one.
    ResultShape,
    /// The produced value fails the declared result schema.
    ResultValidation,
    /// The wrapped function itself failed.
    Wrapped,
}

/// A failed checked call.
///
/// Displays as the newline-joined problem lines. Each error records the
/// source location of the call that produced it.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CallError {
    kind: CallErrorKind,
    message: String,
    origin: &'static Location<'static>,
    #[source]
    source: Option<BoxError>,
}

impl CallError {
    pub(crate) fn new(
        kind: CallErrorKind,
        lines: Vec<String>,
        origin: &'static Location<'static>,
    ) -> Self {
        Self {
            kind,
            message: lines.join("\n"),
            origin,
            source: None,
        }
    }

    pub(crate) fn wrapped(source: BoxError, origin: &'static Location<'static>) -> Self {
        Self {
            kind: CallErrorKind::Wrapped,
            message: source.to_string(),
            origin,
            source: Some(source),
        }
    }

    pub fn kind(&self) -> CallErrorKind {
        self.kind
    }

    /// The full message; one line per problem.
    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.message.lines()
    }

    /// Where the failing call was made.
    pub fn origin(&self) -> &'static Location<'static> {
        self.origin
    }

    /// Recover the wrapped function's own error.
    pub fn into_wrapped(self) -> Option<BoxError> {
        self.source
    }
}

pub type Result<T> = std::result::Result<T, CallError>;

/// Malformed parameter input given as JSON.
#[derive(Debug, thiserror::Error)]
pub enum ParameterError {
    /// The input was neither an array nor an object.
    #[error("parameters must be an array or an object")]
    NotAList,

    /// An entry was not a `[value, schema]` pair.
    #[error("parameter {0} must be a [value, schema] pair")]
    MalformedEntry(String),

    /// An entry's schema has the wrong JSON kind.
    #[error("parameter {name}: {source}")]
    InvalidSchema {
        name: String,
        #[source]
        source: jss_schema::InvalidSchema,
    },
}
