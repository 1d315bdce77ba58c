use jss_schema::PRIMITIVE_KINDS;

use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("jss {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: jss");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target: {}", option_env!("JSS_BUILD_TARGET").unwrap_or("unknown"));
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!("builtin_schemas: {}", PRIMITIVE_KINDS.len());

    Ok(SUCCESS)
}
