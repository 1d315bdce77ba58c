use std::fmt;
use std::io;

use jss_contract::{CallError, CallErrorKind};
use jss_schema::ConfigError;

// Exit codes; 64 follows sysexits EX_USAGE.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const PERMISSION_DENIED: i32 = 50;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn io_error(context: &str, err: io::Error) -> CliError {
    let code = match err.kind() {
        io::ErrorKind::PermissionDenied => PERMISSION_DENIED,
        io::ErrorKind::NotFound => USAGE,
        _ => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}

pub fn config_error(context: &str, err: ConfigError) -> CliError {
    match err {
        ConfigError::LoadFailed(_) => CliError::new(FAILURE, format!("{context}: {err}")),
        ConfigError::NotAMap
        | ConfigError::ReservedPrefix { .. }
        | ConfigError::InvalidSchemaKind { .. }
        | ConfigError::SchemaDefinition { .. }
        | ConfigError::InvalidJson(_) => CliError::new(DATA_INVALID, format!("{context}: {err}")),
    }
}

/// Map a checked-call failure that is not a plain validation result.
pub fn call_error(context: &str, err: CallError) -> CliError {
    let code = match err.kind() {
        CallErrorKind::ReferenceResolution | CallErrorKind::InvalidSchema => USAGE,
        CallErrorKind::ParameterValidation | CallErrorKind::ResultValidation => DATA_INVALID,
        CallErrorKind::ResultShape | CallErrorKind::Wrapped => INTERNAL,
    };
    CliError::new(code, format!("{context}: {err}"))
}
