use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "nicsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn write_file(dir: &PathBuf, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).expect("write temp file");
    path
}

const PARAMS: &str = "aa:bb:cc:dd:ee:ff\n10.0.0.1/24\nsrc:5,dst:7\n";

fn ramp_hex() -> String {
    (0u32..32)
        .map(|i| format!("{i:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

#[test]
fn empty_trace_prints_all_report_sections() {
    let dir = unique_temp_dir("empty-trace");
    let params = write_file(&dir, "params.txt", PARAMS);
    let packets = write_file(&dir, "packets.txt", "");

    let output = Command::new(env!("CARGO_BIN_EXE_nic_sim"))
        .arg("--params")
        .arg(&params)
        .arg("--packets")
        .arg(&packets)
        .output()
        .expect("run nic_sim");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let zeros = vec!["00"; 64].join(" ");
    assert_eq!(stdout, format!("LOCAL_DRAM\n5 7: {zeros}\n\nRQ:\n\nTQ:\n"));
}

#[test]
fn payload_packet_lands_in_port_buffer() {
    let dir = unique_temp_dir("local-delivery");
    let params = write_file(&dir, "params.txt", PARAMS);
    let trace = format!("5|7|0|{}\n", ramp_hex());
    let packets = write_file(&dir, "packets.txt", &trace);

    let output = Command::new(env!("CARGO_BIN_EXE_nic_sim"))
        .arg("--params")
        .arg(&params)
        .arg("--packets")
        .arg(&packets)
        .output()
        .expect("run nic_sim");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let zeros = vec!["00"; 32].join(" ");
    assert_eq!(
        stdout,
        format!("LOCAL_DRAM\n5 7: {} {zeros}\n\nRQ:\n\nTQ:\n", ramp_hex())
    );
}

#[test]
fn malformed_lines_are_skipped_not_fatal() {
    let dir = unique_temp_dir("malformed");
    let params = write_file(&dir, "params.txt", PARAMS);
    let trace = format!("garbage line\n5|7|0|{}\n", ramp_hex());
    let packets = write_file(&dir, "packets.txt", &trace);

    let output = Command::new(env!("CARGO_BIN_EXE_nic_sim"))
        .arg("--params")
        .arg(&params)
        .arg("--packets")
        .arg(&packets)
        .output()
        .expect("run nic_sim");
    assert!(output.status.success());

    // The bad line is dropped; the following packet is still delivered.
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert!(stdout.contains(&format!("5 7: {}", ramp_hex())));
}

#[test]
fn missing_params_file_exits_nonzero() {
    let dir = unique_temp_dir("missing-params");
    let packets = write_file(&dir, "packets.txt", "");

    let output = Command::new(env!("CARGO_BIN_EXE_nic_sim"))
        .arg("--params")
        .arg(dir.join("does-not-exist.txt"))
        .arg("--packets")
        .arg(&packets)
        .output()
        .expect("run nic_sim");
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).expect("utf8 stderr");
    assert!(stderr.contains("failed to read"));
}

#[test]
fn results_json_mirrors_the_text_report() {
    let dir = unique_temp_dir("results-json");
    let params = write_file(&dir, "params.txt", PARAMS);
    let trace = format!("5|7|0|{}\n", ramp_hex());
    let packets = write_file(&dir, "packets.txt", &trace);
    let json_path = dir.join("results.json");

    let output = Command::new(env!("CARGO_BIN_EXE_nic_sim"))
        .arg("--params")
        .arg(&params)
        .arg("--packets")
        .arg(&packets)
        .arg("--results-json")
        .arg(&json_path)
        .output()
        .expect("run nic_sim");
    assert!(output.status.success());

    let raw = fs::read_to_string(&json_path).expect("read results json");
    let value: Value = serde_json::from_str(&raw).expect("parse results json");
    assert_eq!(value["ports"][0]["src_port"], Value::from(5));
    assert!(
        value["ports"][0]["buffer"]
            .as_str()
            .expect("buffer string")
            .starts_with("00 01 02")
    );
}
