//! Named JSON Schema registry and value checks for call contracts.
//!
//! A [`SchemaRegistry`] is built once from a map of named schema
//! definitions (plus the built-in `jss/` primitive aliases) and is
//! read-only afterwards. Values are checked against a [`Schema`], which is
//! either a boolean, an inline definition, or a reference to a registered
//! name. Failures come back as single human-readable lines such as
//! `parameters[0] should be integer`.

pub mod config;
pub mod error;
mod message;
pub mod registry;
pub mod schema;
mod strict;
pub mod validator;

pub use config::RegistryConfig;
pub use error::{ConfigError, InvalidSchema, ResolveError, Result};
pub use registry::{SchemaRegistry, PRIMITIVE_KINDS, RESERVED_PREFIX};
pub use schema::Schema;
pub use validator::{CompiledSchema, ResolvedSchema};
