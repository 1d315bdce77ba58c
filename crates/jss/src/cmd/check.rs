use std::fs;

use jss_contract::{CallErrorKind, CallValidator, ParameterSet, Returned};
use jss_schema::Schema;
use serde_json::Value;
use tracing::debug;

use crate::cmd::CheckArgs;
use crate::exit::{call_error, io_error, CliError, CliResult, DATA_INVALID, SUCCESS, USAGE};
use crate::output::{print_check, CheckReport, OutputFormat};

pub fn run(args: CheckArgs, format: OutputFormat) -> CliResult<i32> {
    let schema = parse_schema(&args.schema)?;
    let value = read_value(&args)?;
    let validator = CallValidator::new(args.registry.load()?);
    debug!(schemas = validator.registry().len(), "registry ready");

    let parameters = ParameterSet::named([(args.label.clone(), value, schema)]);
    let errors = match validator.call(parameters, None, || Ok(Returned::nothing())) {
        Ok(_) => Vec::new(),
        Err(err) if err.kind() == CallErrorKind::ParameterValidation => {
            err.lines().map(str::to_string).collect()
        }
        Err(err) => return Err(call_error("check failed", err)),
    };

    let report = CheckReport {
        schema: args.schema,
        valid: errors.is_empty(),
        errors,
    };
    print_check(&report, format);

    Ok(if report.valid { SUCCESS } else { DATA_INVALID })
}

/// Objects and booleans are inline schemas; JSON strings and anything that
/// does not parse as JSON name a registered schema.
fn parse_schema(input: &str) -> CliResult<Schema> {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::String(name)) => Ok(Schema::reference(name)),
        Ok(value) => Schema::from_value(value)
            .map_err(|err| CliError::new(USAGE, format!("invalid schema argument: {err}"))),
        Err(_) => Ok(Schema::reference(input.trim())),
    }
}

fn read_value(args: &CheckArgs) -> CliResult<Value> {
    if let Some(json) = &args.json {
        return serde_json::from_str(json)
            .map_err(|err| CliError::new(USAGE, format!("--json is not valid JSON: {err}")));
    }
    if let Some(path) = &args.file {
        let raw = fs::read_to_string(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err))?;
        return serde_json::from_str(&raw).map_err(|err| {
            CliError::new(
                DATA_INVALID,
                format!("{} is not valid JSON: {err}", path.display()),
            )
        });
    }
    Err(CliError::new(USAGE, "one of --json or --file is required"))
}
