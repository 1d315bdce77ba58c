mod cmd;
mod exit;
mod logging;
mod output;

use clap::Parser;

use crate::cmd::Command;
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "jss", version, about = "Check JSON values against named schemas")]
struct Cli {
    /// Output format.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "info", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let format = cli.format.unwrap_or_else(OutputFormat::default_for_stdout);
    match cmd::run(cli.command, format) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_check_with_inline_value() {
        let cli = Cli::try_parse_from(["jss", "check", "jss/integer", "--json", "4"])
            .expect("check args should parse");
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn rejects_conflicting_value_sources() {
        let err = Cli::try_parse_from([
            "jss",
            "check",
            "jss/integer",
            "--json",
            "4",
            "--file",
            "value.json",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn check_requires_a_value_source() {
        let err = Cli::try_parse_from(["jss", "check", "jss/integer"])
            .expect_err("missing value should fail");
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn parses_schemas_with_directory_and_globals() {
        let cli = Cli::try_parse_from([
            "jss",
            "--format",
            "json",
            "--log-level",
            "debug",
            "schemas",
            "--schemas",
            "/tmp/schemas",
            "--strict",
        ])
        .expect("schemas args should parse");

        match cli.command {
            Command::Schemas(args) => {
                assert!(args.registry.strict);
                assert_eq!(
                    args.registry.schemas.as_deref(),
                    Some(std::path::Path::new("/tmp/schemas"))
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(matches!(cli.format, Some(OutputFormat::Json)));
    }
}
