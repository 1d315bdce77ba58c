use std::future::Future;

use futures_core::future::BoxFuture;
use serde_json::Value;

/// Error type of wrapped functions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A value that settles later. `Ok(None)` means it settled with no value.
pub type PendingValue = BoxFuture<'static, Result<Option<Value>, BoxError>>;

/// What a wrapped function handed back.
pub enum Returned {
    /// A value available now. `None` is "no value", which is distinct from
    /// JSON `null`.
    Ready(Option<Value>),
    /// A value that settles later.
    Pending(PendingValue),
}

impl Returned {
    pub fn value(value: impl Into<Value>) -> Self {
        Self::Ready(Some(value.into()))
    }

    /// No value at all.
    pub fn nothing() -> Self {
        Self::Ready(None)
    }

    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = Result<Option<Value>, BoxError>> + Send + 'static,
    {
        Self::Pending(Box::pin(future))
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }
}

impl From<Value> for Returned {
    fn from(value: Value) -> Self {
        Self::value(value)
    }
}

impl From<()> for Returned {
    fn from(_: ()) -> Self {
        Self::nothing()
    }
}

impl std::fmt::Debug for Returned {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Self::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}
