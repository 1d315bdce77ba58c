use serde_json::{Map, Value};

use crate::error::InvalidSchema;

/// A schema as written in a call contract.
///
/// References are resolved against a [`SchemaRegistry`](crate::SchemaRegistry)
/// at call time, before any value is checked.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// `true`: every value passes.
    Accept,
    /// `false`: every value fails.
    Reject,
    /// A structured JSON Schema object.
    Definition(Map<String, Value>),
    /// The name of a registered schema.
    Reference(String),
}

impl Schema {
    /// Reference a registered schema by name.
    pub fn reference(name: impl Into<String>) -> Self {
        Self::Reference(name.into())
    }

    /// Interpret a JSON value written in schema position.
    pub fn from_value(value: Value) -> Result<Self, InvalidSchema> {
        match value {
            Value::Bool(true) => Ok(Self::Accept),
            Value::Bool(false) => Ok(Self::Reject),
            Value::Object(map) => Ok(Self::Definition(map)),
            Value::String(name) => Ok(Self::Reference(name)),
            other => Err(InvalidSchema {
                kind: json_kind(&other),
            }),
        }
    }

    /// The referenced name, if this is a reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Self::Reference(name) => Some(name),
            _ => None,
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, Self::Reference(_))
    }

    /// The JSON form of this schema. References become plain strings.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Accept => Value::Bool(true),
            Self::Reject => Value::Bool(false),
            Self::Definition(map) => Value::Object(map.clone()),
            Self::Reference(name) => Value::String(name.clone()),
        }
    }
}

impl From<bool> for Schema {
    fn from(accept: bool) -> Self {
        if accept {
            Self::Accept
        } else {
            Self::Reject
        }
    }
}

impl From<&str> for Schema {
    fn from(name: &str) -> Self {
        Self::reference(name)
    }
}

impl From<String> for Schema {
    fn from(name: String) -> Self {
        Self::Reference(name)
    }
}

impl From<Map<String, Value>> for Schema {
    fn from(map: Map<String, Value>) -> Self {
        Self::Definition(map)
    }
}

impl TryFrom<Value> for Schema {
    type Error = InvalidSchema;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
