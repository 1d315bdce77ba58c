//! Schema-checked function calls backed by a registry of named JSON Schemas.
//!
//! ```no_run
//! use jss::{build_validator, ParameterSet, Returned, Schema};
//! use serde_json::json;
//!
//! let validate = build_validator(&json!({ "ns/isEven": { "type": "integer" } }))?;
//! let sum = validate.call(
//!     ParameterSet::named([("a", json!(2), "ns/isEven"), ("b", json!(4), "ns/isEven")]),
//!     Some(Schema::reference("jss/integer")),
//!     || Ok(Returned::value(6)),
//! )?;
//! assert_eq!(sum, Some(json!(6)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Crate Structure
//!
//! - [`schema`]: Schema registry, built-in `jss/` aliases, value checks
//! - [`contract`]: Parameters, contracts, and the call orchestrator

use serde_json::Value;

/// Re-export schema types.
pub mod schema {
    pub use jss_schema::*;
}

/// Re-export contract types.
pub mod contract {
    pub use jss_contract::*;
}

pub use jss_contract::{
    BoxError, CallContract, CallError, CallErrorKind, CallOptions, CallValidator, Invocation,
    ParameterSet, Returned,
};
pub use jss_schema::{ConfigError, RegistryConfig, Schema, SchemaRegistry, RESERVED_PREFIX};

/// Build a validator over `additional` named schemas plus the built-in
/// `jss/` primitive aliases.
pub fn build_validator(additional: &Value) -> Result<CallValidator, ConfigError> {
    CallValidator::build(additional)
}
