use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;
use serlink_frame::Packet;

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PacketOutput {
    index: usize,
    packet_type: u16,
    packet_type_hex: String,
    payload_size: usize,
    payload: String,
    payload_hex: String,
}

pub fn print_packet(packet: &Packet<'_>, index: usize, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PacketOutput {
                index,
                packet_type: packet.packet_type,
                packet_type_hex: format!("{:#06x}", packet.packet_type),
                payload_size: packet.payload.len(),
                payload: payload_preview(packet.payload),
                payload_hex: to_hex(packet.payload),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["#", "TYPE", "SIZE", "PAYLOAD"])
                .add_row(vec![
                    index.to_string(),
                    format!("{:#06x}", packet.packet_type),
                    packet.payload.len().to_string(),
                    payload_preview(packet.payload),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "packet {} type={:#06x} size={} payload={}",
                index,
                packet.packet_type,
                packet.payload.len(),
                payload_preview(packet.payload)
            );
        }
        OutputFormat::Raw => {
            print_raw(packet.payload);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

pub fn to_hex(data: &[u8]) -> String {
    let mut hex = String::with_capacity(data.len() * 2);
    for byte in data {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

fn payload_preview(payload: &[u8]) -> String {
    match std::str::from_utf8(payload) {
        Ok(text) if text.chars().all(|c| !c.is_control()) => text.to_string(),
        _ => format!("<binary {} bytes>", payload.len()),
    }
}
