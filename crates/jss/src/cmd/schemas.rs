use jss_schema::RESERVED_PREFIX;

use crate::cmd::SchemasArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_schemas, OutputFormat, SchemaEntry, SchemaListing};

pub fn run(args: SchemasArgs, format: OutputFormat) -> CliResult<i32> {
    let registry = args.registry.load()?;
    let schemas: Vec<SchemaEntry> = registry
        .names()
        .into_iter()
        .map(|name| SchemaEntry {
            name: name.to_string(),
            builtin: name.starts_with(RESERVED_PREFIX),
        })
        .collect();

    let listing = SchemaListing {
        count: schemas.len(),
        schemas,
    };
    print_schemas(&listing, format);

    Ok(SUCCESS)
}
