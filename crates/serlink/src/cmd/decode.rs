use std::fs;
use std::io::Read;
use std::path::Path;

use serlink_frame::{Framer, FramerConfig};
use serlink_stream::MemoryStream;
use tracing::{debug, warn};

use crate::cmd::DecodeArgs;
use crate::exit::{frame_error, io_error, CliResult, SUCCESS};
use crate::output::{print_packet, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    if let Some(device) = args.follow.clone() {
        return follow(&device, &args, format);
    }

    let bytes = read_capture(args.input.as_deref())?;
    let mut stream = MemoryStream::from(bytes);
    let mut framer = framer_for(&args);

    let mut printed = 0usize;
    while framer
        .drain(&mut stream)
        .map_err(|err| frame_error("decode failed", err))?
    {
        if let Some(packet) = framer.packet() {
            print_packet(&packet, printed, format);
            printed += 1;
        }
        if args.count.is_some_and(|count| printed >= count) {
            break;
        }
    }

    debug!(stats = ?framer.stats(), printed, "capture drained");
    if printed == 0 {
        warn!("no complete packets found in capture");
    }
    Ok(SUCCESS)
}

fn framer_for(args: &DecodeArgs) -> Framer {
    match args.capacity {
        Some(buffer_capacity) => Framer::with_config(FramerConfig { buffer_capacity }),
        None => Framer::new(),
    }
}

fn read_capture(input: Option<&Path>) -> CliResult<Vec<u8>> {
    match input {
        Some(path) if path.as_os_str() != "-" => fs::read(path).map_err(|err| {
            io_error(&format!("failed reading {}", path.display()), err)
        }),
        _ => {
            let mut bytes = Vec::new();
            std::io::stdin()
                .read_to_end(&mut bytes)
                .map_err(|err| io_error("failed reading stdin", err))?;
            Ok(bytes)
        }
    }
}

#[cfg(unix)]
fn follow(device: &Path, args: &DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use serlink_stream::FdStream;

    use crate::exit::{stream_error, CliError, INTERNAL};

    let mut stream =
        FdStream::open(device).map_err(|err| stream_error("open failed", err))?;

    let running = Arc::new(AtomicBool::new(true));
    {
        let running = running.clone();
        ctrlc::set_handler(move || {
            running.store(false, Ordering::SeqCst);
        })
        .map_err(|err| {
            CliError::new(INTERNAL, format!("signal handler setup failed: {err}"))
        })?;
    }

    let mut framer = framer_for(args);
    let mut printed = 0usize;

    while running.load(Ordering::SeqCst) {
        let done = framer
            .drain(&mut stream)
            .map_err(|err| frame_error("read failed", err))?;

        if done {
            if let Some(packet) = framer.packet() {
                print_packet(&packet, printed, format);
                printed += 1;
            }
            if args.count.is_some_and(|count| printed >= count) {
                return Ok(SUCCESS);
            }
        } else {
            // Nothing buffered on the device right now.
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    debug!(stats = ?framer.stats(), printed, "follow interrupted");
    Ok(SUCCESS)
}

#[cfg(not(unix))]
fn follow(_device: &Path, _args: &DecodeArgs, _format: OutputFormat) -> CliResult<i32> {
    use crate::exit::{CliError, USAGE};
    Err(CliError::new(USAGE, "--follow is only supported on unix"))
}
