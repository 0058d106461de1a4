#![cfg(feature = "cli")]

use std::path::PathBuf;
use std::process::{Command, Output};

fn unique_temp_path(tag: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "sensorfeat-cli-{tag}-{}-{}.{ext}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time should be after epoch")
            .as_nanos()
    ))
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sensorfeat"))
        .args(["--log-level", "error", "--format", "json"])
        .args(args)
        .output()
        .expect("sensorfeat should run")
}

fn stdout_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).expect("stdout should be json")
}

#[test]
fn percent_command_bytes() {
    let output = run(&["command", "percent", "--device", "0x05"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["bytes"], "050200");
    assert_eq!(json["command"], "percent");
}

#[test]
fn status_command_bytes() {
    let output = run(&["status", "0xff"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["bytes"], "ff0000");
}

#[test]
fn raw_format_emits_frame_bytes() {
    let output = Command::new(env!("CARGO_BIN_EXE_sensorfeat"))
        .args(["--format", "raw", "command", "ramp", "--device", "5"])
        .output()
        .expect("sensorfeat should run");
    assert!(output.status.success());
    assert_eq!(output.stdout, vec![0x05, 0x01, 0x00]);
}

#[test]
fn write_appends_frames_to_file() {
    let path = unique_temp_path("write", "bin");
    let path_arg = path.to_string_lossy().to_string();

    assert!(run(&["command", "step", "--device", "7", "--write", &path_arg])
        .status
        .success());
    assert!(run(&["status", "1", "--write", &path_arg]).status.success());

    let bytes = std::fs::read(&path).expect("frames should be written");
    assert_eq!(bytes, vec![0x07, 0x00, 0x00, 0x01, 0x00, 0x00]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn decode_current_source_is_status_only() {
    let output = run(&["decode", "--hex", "", "--timestamp", "12"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["feature"], "Current Source");
    assert_eq!(json["consumed"], 0);
    assert_eq!(json["timestamp"], 12);
    assert!(json["values"][0]["value"].is_null());
}

#[test]
fn decode_with_layout_file() {
    let layout = unique_temp_path("layout", "json");
    std::fs::write(
        &layout,
        r#"{ "name": "Env", "fields": [
            { "name": "pressure", "unit": "mBar", "type": "int32", "min": 0, "max": 200000 },
            { "name": "temperature", "unit": "C", "type": "int16", "min": -400, "max": 1200 }
        ] }"#,
    )
    .expect("layout should be writable");
    let layout_arg = layout.to_string_lossy().to_string();

    let output = run(&["decode", "--layout", &layout_arg, "--hex", "a0 86 01 00 fa 00 ee"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["consumed"], 6);
    assert_eq!(json["values"][0]["value"], 100000.0);
    assert_eq!(json["values"][1]["value"], 250.0);

    let output = run(&["decode", "--layout", &layout_arg, "--hex", "a0 86 01"]);
    assert_eq!(output.status.code(), Some(60));

    let _ = std::fs::remove_file(&layout);
}

#[test]
fn inspect_reports_triple() {
    let output = run(&["inspect", "--hex", "05 01 00"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["selector"], 5);
    assert_eq!(json["command"], "ramp");
    assert_eq!(json["sub_parameter"], 0);

    let output = run(&["inspect", "--hex", "05"]);
    assert_eq!(output.status.code(), Some(60));
}

#[test]
fn bad_hex_is_usage_error() {
    let output = run(&["decode", "--hex", "zz"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn fields_lists_current_source_metadata() {
    let output = run(&["fields"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["frame_width"], 0);
    assert_eq!(json["fields"][0]["name"], "milli-Ampere");
    assert_eq!(json["fields"][0]["unit"], "mA");
    assert_eq!(json["fields"][0]["max"], 4095.0);
}

#[test]
fn written_flag_tracks_write_option() {
    let output = run(&["status", "2"]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["written"], false);

    let path = unique_temp_path("written", "bin");
    let path_arg = path.to_string_lossy().to_string();
    let output = run(&["status", "2", "--write", &path_arg]);
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["written"], true);
    let _ = std::fs::remove_file(&path);

    let output = run(&["inspect", "--hex", "02 00 00"]);
    assert!(stdout_json(&output)["written"].is_null());
}

#[test]
fn raw_format_lists_fields_as_csv() {
    let output = Command::new(env!("CARGO_BIN_EXE_sensorfeat"))
        .args(["--format", "raw", "fields"])
        .output()
        .expect("sensorfeat should run");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "milli-Ampere,mA,uint16,0,4095\n"
    );
}

#[test]
fn extended_version_as_json() {
    let output = run(&["version", "--extended"]);
    assert!(output.status.success());
    let json = stdout_json(&output);
    assert_eq!(json["name"], "sensorfeat");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
