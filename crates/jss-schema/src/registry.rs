use std::collections::HashMap;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::config::RegistryConfig;
use crate::error::{ConfigError, ResolveError, Result};
use crate::schema::Schema;
use crate::validator::{CompiledSchema, ResolvedSchema};

/// Prefix reserved for the built-in primitive aliases.
pub const RESERVED_PREFIX: &str = "jss/";

/// Primitive kinds registered as `jss/<kind>`.
pub const PRIMITIVE_KINDS: [&str; 7] = [
    "array", "boolean", "integer", "null", "number", "object", "string",
];

const SCHEMA_FILE_SUFFIX: &str = ".schema.json";

/// Name-keyed registry of compiled JSON Schemas.
///
/// Built once, read-only afterwards.
pub struct SchemaRegistry {
    schemas: HashMap<String, Arc<CompiledSchema>>,
    config: RegistryConfig,
}

impl SchemaRegistry {
    /// Build a registry from a JSON object of `name -> schema` entries.
    pub fn build(additional: &Value) -> Result<Self> {
        Self::build_with_config(additional, RegistryConfig::default())
    }

    /// Build a registry with explicit config.
    pub fn build_with_config(additional: &Value, config: RegistryConfig) -> Result<Self> {
        let supplied = additional.as_object().ok_or(ConfigError::NotAMap)?;

        let reserved: Vec<String> = supplied
            .keys()
            .filter(|name| name.starts_with(RESERVED_PREFIX))
            .cloned()
            .collect();
        if !reserved.is_empty() {
            return Err(ConfigError::ReservedPrefix { names: reserved });
        }

        let wrong_kind: Vec<String> = supplied
            .iter()
            .filter(|(_, schema)| !schema.is_boolean() && !schema.is_object())
            .map(|(name, _)| name.clone())
            .collect();
        if !wrong_kind.is_empty() {
            return Err(ConfigError::InvalidSchemaKind { names: wrong_kind });
        }

        let mut registry = Self {
            schemas: HashMap::with_capacity(supplied.len() + PRIMITIVE_KINDS.len()),
            config,
        };
        let builtins = builtin_schemas();
        for (name, schema) in supplied.iter().chain(builtins.iter()) {
            registry.register(name, schema)?;
        }

        debug!(
            supplied = supplied.len(),
            total = registry.schemas.len(),
            strict = registry.config.strict_mode,
            "schema registry built"
        );
        Ok(registry)
    }

    fn register(&mut self, name: &str, schema: &Value) -> Result<()> {
        let compiled = CompiledSchema::compile(schema, &self.config, &format!("\"{name}\""))
            .map_err(|message| ConfigError::SchemaDefinition {
                name: name.to_string(),
                message,
            })?;
        self.schemas.insert(name.to_string(), Arc::new(compiled));
        Ok(())
    }

    /// Load every `*.schema.json` file below a directory.
    ///
    /// The schema name is the file's relative path without the suffix, so
    /// `todo/title.schema.json` registers `todo/title`.
    pub fn from_directory(path: &Path) -> Result<Self> {
        Self::from_directory_with_config(path, RegistryConfig::default())
    }

    /// Load schemas from a directory with explicit config.
    pub fn from_directory_with_config(path: &Path, config: RegistryConfig) -> Result<Self> {
        let mut files = Vec::new();
        collect_schema_files(path, "", &mut files)?;
        files.sort();

        if files.len() > config.max_schemas_from_directory {
            return Err(ConfigError::LoadFailed(format!(
                "schema count exceeds configured max ({}): {}",
                config.max_schemas_from_directory,
                files.len()
            )));
        }

        let mut supplied = Map::new();
        for (name, file_path) in files {
            let content = read_schema_file(&file_path, config.max_schema_file_size)?;
            let schema: Value = serde_json::from_str(&content)?;
            debug!(%name, path = %file_path.display(), "loaded schema file");
            supplied.insert(name, schema);
        }

        Self::build_with_config(&Value::Object(supplied), config)
    }

    /// Check whether a schema is registered under `name`.
    pub fn has(&self, name: &str) -> bool {
        self.schemas.contains_key(name)
    }

    /// Get the compiled schema registered under `name`.
    pub fn get(&self, name: &str) -> Option<&CompiledSchema> {
        self.schemas.get(name).map(Arc::as_ref)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Get registry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Turn `schema` into a checker: look up a reference, or compile an
    /// inline definition with this registry's config.
    pub fn resolve(&self, schema: &Schema) -> std::result::Result<ResolvedSchema, ResolveError> {
        match schema {
            Schema::Accept => Ok(ResolvedSchema::Accept),
            Schema::Reject => Ok(ResolvedSchema::Reject),
            Schema::Reference(name) => self
                .schemas
                .get(name)
                .map(|compiled| ResolvedSchema::Compiled(Arc::clone(compiled)))
                .ok_or_else(|| ResolveError::UnknownReference(name.clone())),
            Schema::Definition(map) => {
                CompiledSchema::compile(&Value::Object(map.clone()), &self.config, "schema")
                    .map(|compiled| ResolvedSchema::Compiled(Arc::new(compiled)))
                    .map_err(ResolveError::InvalidDefinition)
            }
        }
    }

    /// Check `value` against `schema`, rendering a failure against `label`.
    ///
    /// A schema that does not resolve is reported as a failure rather than
    /// a panic.
    pub fn check(&self, schema: &Schema, value: &Value, label: &str) -> Option<String> {
        match self.resolve(schema) {
            Ok(resolved) => resolved.check(value, label),
            Err(ResolveError::UnknownReference(name)) => {
                Some(format!("Unknown schema reference \"{name}\" for {label}"))
            }
            Err(ResolveError::InvalidDefinition(message)) => {
                Some(format!("{label} has an invalid schema: {message}"))
            }
        }
    }
}

impl std::fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("names", &self.names())
            .field("config", &self.config)
            .finish()
    }
}

fn builtin_schemas() -> Map<String, Value> {
    PRIMITIVE_KINDS
        .iter()
        .map(|kind| {
            let mut schema = Map::new();
            schema.insert("type".to_string(), Value::String((*kind).to_string()));
            (format!("{RESERVED_PREFIX}{kind}"), Value::Object(schema))
        })
        .collect()
}

fn collect_schema_files(dir: &Path, prefix: &str, files: &mut Vec<(String, PathBuf)>) -> Result<()> {
    let entries = std::fs::read_dir(dir)
        .map_err(|err| ConfigError::LoadFailed(format!("{}: {err}", dir.display())))?;

    for entry in entries {
        let entry = entry.map_err(|err| ConfigError::LoadFailed(err.to_string()))?;
        let file_name = entry.file_name();
        let file_name = file_name.to_string_lossy();
        let entry_path = entry.path();
        let file_type = std::fs::symlink_metadata(&entry_path)
            .map_err(|err| ConfigError::LoadFailed(err.to_string()))?
            .file_type();
        let stem = file_name.strip_suffix(SCHEMA_FILE_SUFFIX);

        if file_type.is_symlink() {
            if stem.is_some() {
                return Err(ConfigError::LoadFailed(format!(
                    "refusing to load schema symlink: {file_name}"
                )));
            }
            continue;
        }
        if file_type.is_dir() {
            collect_schema_files(&entry_path, &format!("{prefix}{file_name}/"), files)?;
            continue;
        }

        match stem {
            Some(stem) if file_type.is_file() && !stem.is_empty() => {
                files.push((format!("{prefix}{stem}"), entry_path));
            }
            _ => {}
        }
    }

    Ok(())
}

fn read_schema_file(path: &Path, max_bytes: usize) -> Result<String> {
    let path_metadata = std::fs::symlink_metadata(path)
        .map_err(|err| ConfigError::LoadFailed(err.to_string()))?;
    let file = std::fs::File::open(path).map_err(|err| {
        ConfigError::LoadFailed(format!("failed opening schema {}: {err}", path.display()))
    })?;
    let opened_metadata = file
        .metadata()
        .map_err(|err| ConfigError::LoadFailed(err.to_string()))?;

    #[cfg(unix)]
    {
        if !same_file_identity(&path_metadata, &opened_metadata) {
            return Err(ConfigError::LoadFailed(format!(
                "schema file changed during load: {}",
                path.display()
            )));
        }
    }
    #[cfg(not(unix))]
    let _ = path_metadata;

    if opened_metadata.len() > max_bytes as u64 {
        return Err(ConfigError::LoadFailed(format!(
            "schema file too large ({} bytes): {}",
            opened_metadata.len(),
            path.display()
        )));
    }

    let read_limit = u64::try_from(max_bytes.saturating_add(1)).unwrap_or(u64::MAX);
    let mut content = String::new();
    file.take(read_limit)
        .read_to_string(&mut content)
        .map_err(|err| {
            ConfigError::LoadFailed(format!("failed reading schema {}: {err}", path.display()))
        })?;
    if content.len() > max_bytes {
        return Err(ConfigError::LoadFailed(format!(
            "schema file too large while reading: {}",
            path.display()
        )));
    }

    Ok(content)
}

#[cfg(unix)]
fn same_file_identity(
    path_metadata: &std::fs::Metadata,
    opened_metadata: &std::fs::Metadata,
) -> bool {
    use std::os::unix::fs::MetadataExt;
    path_metadata.dev() == opened_metadata.dev() && path_metadata.ino() == opened_metadata.ino()
}
