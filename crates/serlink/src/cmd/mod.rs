use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod checksum;
pub mod decode;
pub mod encode;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode one packet to wire bytes.
    Encode(EncodeArgs),
    /// Decode packets from a raw byte capture or a device.
    Decode(DecodeArgs),
    /// Compute the Fletcher-16 checksum of a byte sequence.
    Checksum(ChecksumArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Checksum(args) => checksum::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Packet type (decimal or 0x-prefixed hex).
    #[arg(long = "type", short = 't', value_parser = parse_u16)]
    pub packet_type: u16,
    /// Raw string payload.
    #[arg(long, conflicts_with_all = ["hex", "file"])]
    pub data: Option<String>,
    /// Hex payload.
    #[arg(long, conflicts_with_all = ["data", "file"])]
    pub hex: Option<String>,
    /// Read payload from file.
    #[arg(long, conflicts_with_all = ["data", "hex"])]
    pub file: Option<PathBuf>,
    /// Write wire bytes to a file instead of printing hex.
    #[arg(long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Capture file to read (omit or "-" for stdin).
    #[arg(conflicts_with = "follow")]
    pub input: Option<PathBuf>,
    /// Stop after N packets.
    #[arg(long)]
    pub count: Option<usize>,
    /// Receive buffer capacity in bytes.
    #[arg(long)]
    pub capacity: Option<usize>,
    /// Keep draining this device until interrupted.
    #[arg(long, value_name = "DEVICE")]
    pub follow: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ChecksumArgs {
    /// Hex byte sequence.
    #[arg(long, conflicts_with = "file")]
    pub hex: Option<String>,
    /// Read bytes from file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Parse a u16 given as decimal or `0x`-prefixed hex.
pub(crate) fn parse_u16(input: &str) -> Result<u16, String> {
    let parsed = if let Some(hex) = input.strip_prefix("0x").or_else(|| input.strip_prefix("0X")) {
        u16::from_str_radix(hex, 16)
    } else {
        input.parse()
    };
    parsed.map_err(|_| format!("invalid 16-bit value: {input}"))
}

/// Parse a hex string (whitespace tolerated) into bytes.
pub(crate) fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.len() % 2 != 0 {
        return Err(CliError::new(USAGE, "hex input must have an even number of digits"));
    }
    (0..compact.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&compact[i..i + 2], 16)
                .map_err(|_| CliError::new(USAGE, format!("invalid hex byte: {}", &compact[i..i + 2])))
        })
        .collect()
}
