//! Schema-checked function calls.
//!
//! A [`CallValidator`] wraps a function call with a contract: every
//! argument is checked against its schema before the function runs, and
//! the produced value is checked afterwards. Contracts are either
//! synchronous (the function hands back a ready value) or asynchronous
//! (the function hands back a pending value which is awaited, then checked).
//!
//! Problems are reported together: all unknown schema references in one
//! error, then all invalid arguments in one error, in declaration order.
//! The wrapped function never runs when either check fails.

pub mod call;
pub mod contract;
pub mod error;
pub mod params;
pub mod resolver;
pub mod returned;

pub use call::{CallValidator, Invocation};
pub use contract::{CallContract, CallOptions};
pub use error::{CallError, CallErrorKind, ParameterError, Result};
pub use params::{Parameter, ParameterForm, ParameterSet};
pub use resolver::resolve_references;
pub use returned::{BoxError, PendingValue, Returned};

pub use jss_schema::{ConfigError, RegistryConfig, Schema, SchemaRegistry};
