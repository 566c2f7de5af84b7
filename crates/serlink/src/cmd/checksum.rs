use std::fs;

use serde::Serialize;
use serlink_frame::fletcher16;

use crate::cmd::{parse_hex, ChecksumArgs};
use crate::exit::{io_error, CliError, CliResult, SUCCESS, USAGE};
use crate::output::OutputFormat;

#[derive(Serialize)]
struct ChecksumOutput {
    check_a: u8,
    check_b: u8,
    hex: String,
    input_len: usize,
}

pub fn run(args: ChecksumArgs, format: OutputFormat) -> CliResult<i32> {
    let data = resolve_input(&args)?;
    let [check_a, check_b] = fletcher16(&data);

    match format {
        OutputFormat::Json => {
            let out = ChecksumOutput {
                check_a,
                check_b,
                hex: format!("{check_a:02x}{check_b:02x}"),
                input_len: data.len(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        _ => println!("{check_a:02x}{check_b:02x}"),
    }

    Ok(SUCCESS)
}

fn resolve_input(args: &ChecksumArgs) -> CliResult<Vec<u8>> {
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path).map_err(|err| {
            io_error(&format!("failed reading {}", path.display()), err)
        });
    }
    Err(CliError::new(USAGE, "provide --hex or --file"))
}
