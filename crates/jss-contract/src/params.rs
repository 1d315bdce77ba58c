use jss_schema::Schema;
use serde_json::Value;

use crate::error::ParameterError;

/// How the caller named its parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterForm {
    /// Parameters are identified by position: `params[0]`, `params[1]`, ...
    Positional,
    /// Parameters are identified by the caller's names.
    Named,
}

/// One argument of a checked call together with its schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    name: String,
    label: String,
    value: Value,
    schema: Schema,
}

impl Parameter {
    /// The identifier used in reference errors (`params[0]`, `userId`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The label used in value errors (`parameters[0]`, `"userId"`).
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }
}

/// The ordered arguments of one checked call.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSet {
    form: ParameterForm,
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    /// A call without parameters.
    pub fn empty() -> Self {
        Self {
            form: ParameterForm::Positional,
            parameters: Vec::new(),
        }
    }

    /// Parameters identified by position.
    pub fn positional<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (Value, S)>,
        S: Into<Schema>,
    {
        let parameters = items
            .into_iter()
            .enumerate()
            .map(|(index, (value, schema))| Parameter {
                name: format!("params[{index}]"),
                label: format!("parameters[{index}]"),
                value,
                schema: schema.into(),
            })
            .collect();

        Self {
            form: ParameterForm::Positional,
            parameters,
        }
    }

    /// Parameters identified by name, kept in the given order.
    ///
    /// Names behave like object keys: a repeated name replaces the earlier
    /// entry's value and schema but keeps its position.
    pub fn named<I, K, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (K, Value, S)>,
        K: Into<String>,
        S: Into<Schema>,
    {
        let mut parameters: Vec<Parameter> = Vec::new();
        for (name, value, schema) in items {
            let name = name.into();
            let schema = schema.into();
            match parameters.iter_mut().find(|param| param.name == name) {
                Some(existing) => {
                    existing.value = value;
                    existing.schema = schema;
                }
                None => parameters.push(Parameter {
                    label: format!("\"{name}\""),
                    name,
                    value,
                    schema,
                }),
            }
        }

        Self {
            form: ParameterForm::Named,
            parameters,
        }
    }

    /// Read parameters from JSON: an array of `[value, schema]` pairs, or an
    /// object mapping names to `[value, schema]` pairs. Elements past the
    /// pair are ignored.
    pub fn from_value(input: Value) -> Result<Self, ParameterError> {
        match input {
            Value::Array(items) => {
                let pairs = items
                    .into_iter()
                    .enumerate()
                    .map(|(index, item)| split_pair(format!("params[{index}]"), item))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::positional(pairs))
            }
            Value::Object(entries) => {
                let triples = entries
                    .into_iter()
                    .map(|(name, item)| {
                        split_pair(name.clone(), item).map(|(value, schema)| (name, value, schema))
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::named(triples))
            }
            _ => Err(ParameterError::NotAList),
        }
    }

    pub fn form(&self) -> ParameterForm {
        self.form
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.parameters.iter()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::empty()
    }
}

impl<'a> IntoIterator for &'a ParameterSet {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

fn split_pair(name: String, item: Value) -> Result<(Value, Schema), ParameterError> {
    let Value::Array(pair) = item else {
        return Err(ParameterError::MalformedEntry(name));
    };
    let mut pair = pair.into_iter();
    let (Some(value), Some(schema)) = (pair.next(), pair.next()) else {
        return Err(ParameterError::MalformedEntry(name));
    };
    let schema =
        Schema::from_value(schema).map_err(|source| ParameterError::InvalidSchema { name, source })?;
    Ok((value, schema))
}
