/// Errors raised while building a [`SchemaRegistry`](crate::SchemaRegistry).
///
/// These only occur at construction time, never during a checked call.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The additional schemas were not supplied as a JSON object.
    #[error("Non plain object passed to \"build_validator\"")]
    NotAMap,

    /// One or more supplied names use the reserved `jss/` prefix.
    #[error(
        "Schemas passed to \"build_validator\" must not have reserved prefix \"jss/\". Invalid schemas: [{}]",
        quote_names(.names)
    )]
    ReservedPrefix { names: Vec<String> },

    /// One or more supplied schemas are neither booleans nor objects.
    #[error(
        "Schemas passed to \"build_validator\" must be booleans or objects. Invalid schemas: [{}]",
        quote_names(.names)
    )]
    InvalidSchemaKind { names: Vec<String> },

    /// The engine rejected a schema as structurally invalid.
    #[error("{message}")]
    SchemaDefinition { name: String, message: String },

    /// Schema files could not be read from disk.
    #[error("failed to load schema: {0}")]
    LoadFailed(String),

    /// A schema file is not valid JSON.
    #[error("schema file is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// A [`Schema`](crate::Schema) that cannot be turned into a checker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// No schema is registered under the referenced name.
    #[error("unknown schema reference \"{0}\"")]
    UnknownReference(String),

    /// The engine rejected an inline definition.
    #[error("{0}")]
    InvalidDefinition(String),
}

/// A JSON value that cannot be used as a [`Schema`](crate::Schema).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schema must be a boolean, an object or a string reference, got {kind}")]
pub struct InvalidSchema {
    pub kind: &'static str,
}

fn quote_names(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("\"{name}\""))
        .collect::<Vec<_>>()
        .join(", ")
}
