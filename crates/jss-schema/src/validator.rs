use std::sync::Arc;

use jsonschema::Validator;
use serde_json::Value;

use crate::config::RegistryConfig;
use crate::message::{describe, describe_absent, FALSE_SCHEMA};
use crate::strict::close_object_schemas;

/// A schema compiled by the validation engine, kept together with the JSON
/// it was compiled from.
pub struct CompiledSchema {
    source: Value,
    validator: Validator,
}

impl CompiledSchema {
    /// Compile `schema` with the engine settings from `config`.
    ///
    /// On failure the engine error is rendered with `label` standing in for
    /// the schema itself.
    pub fn compile(schema: &Value, config: &RegistryConfig, label: &str) -> Result<Self, String> {
        let mut source = schema.clone();
        if config.strict_mode {
            close_object_schemas(&mut source);
        }

        let validator = jsonschema::options()
            .should_validate_formats(config.validate_formats)
            .build(&source)
            .map_err(|err| describe(&err, label, &source))?;

        Ok(Self { source, validator })
    }

    /// The JSON this schema was compiled from, after strict-mode rewriting.
    pub fn source(&self) -> &Value {
        &self.source
    }

    pub fn is_valid(&self, value: &Value) -> bool {
        self.validator.is_valid(value)
    }

    /// Check `value`, returning the first failure rendered against `label`.
    pub fn check(&self, value: &Value, label: &str) -> Option<String> {
        let first = self.validator.iter_errors(value).next()?;
        Some(describe(&first, label, &self.source))
    }

    /// Check a missing value, as produced by a call that returned nothing.
    pub fn check_absent(&self, label: &str) -> Option<String> {
        describe_absent(&self.source, label)
    }
}

/// A schema ready to check values. Registered schemas are shared with the
/// registry; inline definitions are compiled once when resolved.
#[derive(Debug, Clone)]
pub enum ResolvedSchema {
    Accept,
    Reject,
    Compiled(Arc<CompiledSchema>),
}

impl ResolvedSchema {
    pub fn check(&self, value: &Value, label: &str) -> Option<String> {
        match self {
            Self::Accept => None,
            Self::Reject => Some(format!("{label} {FALSE_SCHEMA}")),
            Self::Compiled(compiled) => compiled.check(value, label),
        }
    }

    /// Check a missing value. Only type, `enum`, `const` and `false`
    /// schemas reject it.
    pub fn check_absent(&self, label: &str) -> Option<String> {
        match self {
            Self::Accept => None,
            Self::Reject => Some(format!("{label} {FALSE_SCHEMA}")),
            Self::Compiled(compiled) => compiled.check_absent(label),
        }
    }
}

impl std::fmt::Debug for CompiledSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledSchema")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}
