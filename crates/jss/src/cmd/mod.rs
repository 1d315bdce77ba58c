use clap::{Args, Subcommand};
use std::path::PathBuf;

use jss_schema::{RegistryConfig, SchemaRegistry};

use crate::exit::{config_error, CliResult};
use crate::output::OutputFormat;

pub mod check;
pub mod schemas;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a JSON value against a schema or schema reference.
    Check(CheckArgs),
    /// List the schemas a registry would hold.
    Schemas(SchemasArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Check(args) => check::run(args, format),
        Command::Schemas(args) => schemas::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Registry options shared by commands that build one.
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Directory of `*.schema.json` files to register.
    #[arg(long, value_name = "DIR")]
    pub schemas: Option<PathBuf>,
    /// Reject properties that object schemas do not declare.
    #[arg(long)]
    pub strict: bool,
    /// Do not enforce `format` keywords.
    #[arg(long)]
    pub no_formats: bool,
}

impl RegistryArgs {
    pub fn config(&self) -> RegistryConfig {
        RegistryConfig {
            validate_formats: !self.no_formats,
            strict_mode: self.strict,
            ..RegistryConfig::default()
        }
    }

    pub fn load(&self) -> CliResult<SchemaRegistry> {
        let config = self.config();
        match &self.schemas {
            Some(dir) => SchemaRegistry::from_directory_with_config(dir, config).map_err(|err| {
                config_error(&format!("failed loading schemas from {}", dir.display()), err)
            }),
            None => SchemaRegistry::build_with_config(&serde_json::json!({}), config)
                .map_err(|err| config_error("failed building registry", err)),
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Inline schema (JSON object or boolean) or a registered schema name.
    pub schema: String,
    /// JSON value to check.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// Read the JSON value from a file.
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Name used for the value in error messages.
    #[arg(long, default_value = "value")]
    pub label: String,
    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(Args, Debug)]
pub struct SchemasArgs {
    #[command(flatten)]
    pub registry: RegistryArgs,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build information.
    #[arg(long)]
    pub extended: bool,
}
