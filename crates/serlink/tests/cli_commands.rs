#![cfg(unix)]

use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

/// type=0x1234, payload=[1,2,3]; checksum 0x4C 0x54.
const REFERENCE_HEX: &str = "aa12340003fffc0102034c54";

fn unique_temp_dir(tag: &str) -> PathBuf {
    let dir = PathBuf::from(format!(
        "/tmp/serlink-cli-{tag}-{}-{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).expect("temp dir should be creatable");
    dir
}

fn serlink(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_serlink"))
        .args(["--log-level", "error"])
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("serlink should run")
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn encode_prints_reference_hex() {
    let output = serlink(&["encode", "--type", "0x1234", "--hex", "010203"]);
    assert!(output.status.success());
    assert_eq!(stdout_text(&output).trim(), REFERENCE_HEX);
}

#[test]
fn encode_to_file_then_decode_round_trips() {
    let dir = unique_temp_dir("roundtrip");
    let wire_path = dir.join("packet.bin");
    let wire_arg = wire_path.to_str().expect("path should be utf-8");

    let output = serlink(&[
        "encode", "--type", "0x1234", "--data", "hey", "--out", wire_arg,
    ]);
    assert!(output.status.success());

    let wire = std::fs::read(&wire_path).expect("wire file should exist");
    assert_eq!(wire[0], 0xAA);
    assert_eq!(wire.len(), 1 + 6 + 3 + 2);

    let output = serlink(&["decode", wire_arg, "--format", "json"]);
    assert!(output.status.success());

    let line = stdout_text(&output);
    let decoded: serde_json::Value =
        serde_json::from_str(line.trim()).expect("decode output should be JSON");
    assert_eq!(decoded["packet_type"], 0x1234);
    assert_eq!(decoded["payload"], "hey");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn decode_skips_noise_and_corrupt_packets() {
    let dir = unique_temp_dir("noise");
    let capture_path = dir.join("capture.bin");

    let mut capture = vec![0x00u8, 0x13, 0x37]; // leading noise
    let mut corrupt = hex_bytes(REFERENCE_HEX);
    corrupt[8] ^= 0x01; // payload corruption
    capture.extend_from_slice(&corrupt);
    capture.extend_from_slice(&hex_bytes(REFERENCE_HEX));
    std::fs::write(&capture_path, &capture).expect("capture should be writable");

    let output = serlink(&[
        "decode",
        capture_path.to_str().expect("path should be utf-8"),
        "--format",
        "json",
    ]);
    assert!(output.status.success());

    let text = stdout_text(&output);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 1, "only the clean packet decodes");

    let decoded: serde_json::Value =
        serde_json::from_str(lines[0]).expect("decode output should be JSON");
    assert_eq!(decoded["payload_hex"], "010203");

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn checksum_matches_reference_trailer() {
    let output = serlink(&["checksum", "--hex", "12340003fffc010203", "--format", "pretty"]);
    assert!(output.status.success());
    assert_eq!(stdout_text(&output).trim(), "4c54");

    let output = serlink(&["checksum", "--hex", "12340003fffc010203", "--format", "json"]);
    let decoded: serde_json::Value =
        serde_json::from_str(stdout_text(&output).trim()).expect("checksum output should be JSON");
    assert_eq!(decoded["hex"], "4c54");
}

#[test]
fn decode_requires_readable_input() {
    let output = serlink(&["decode", "/definitely/not/a/capture.bin"]);
    assert!(!output.status.success());
}

fn hex_bytes(hex: &str) -> Vec<u8> {
    (0..hex.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).expect("valid hex"))
        .collect()
}
