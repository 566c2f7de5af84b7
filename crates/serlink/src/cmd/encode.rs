use std::fs;

use serlink_frame::write_packet;
use serlink_stream::MemoryStream;
use tracing::info;

use crate::cmd::{parse_hex, EncodeArgs};
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::{print_raw, to_hex, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = resolve_payload(&args)?;

    let mut stream = MemoryStream::new();
    write_packet(&mut stream, args.packet_type, &payload)
        .map_err(|err| frame_error("encode failed", err))?;
    let wire = stream.take_all();

    if let Some(path) = &args.out {
        fs::write(path, &wire).map_err(|err| {
            io_error(&format!("failed writing {}", path.display()), err)
        })?;
        info!(
            bytes = wire.len(),
            path = %path.display(),
            "packet written"
        );
    } else {
        match format {
            OutputFormat::Raw => print_raw(&wire),
            _ => println!("{}", to_hex(&wire)),
        }
    }

    Ok(SUCCESS)
}

fn resolve_payload(args: &EncodeArgs) -> CliResult<Vec<u8>> {
    if let Some(data) = &args.data {
        return Ok(data.as_bytes().to_vec());
    }
    if let Some(hex) = &args.hex {
        return parse_hex(hex);
    }
    if let Some(path) = &args.file {
        return fs::read(path).map_err(|err| {
            io_error(&format!("failed reading {}", path.display()), err)
        });
    }
    Ok(Vec::new())
}
