use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;

/// The binary with a per-user config directory that holds no config file.
fn cartslip() -> Command {
    let mut cmd = Command::cargo_bin("cartslip").unwrap();
    cmd.env("XDG_CONFIG_HOME", std::env::temp_dir().join("cartslip-tests-empty"));
    cmd
}

/// A one-page fragment dump: header row, two items and a totals row.
fn invoice_json(provider: &str) -> Value {
    let mut fragments = vec![
        json!({"content": provider, "x": 10.0, "y": 800.0}),
        json!({"content": "1", "x": 10.0, "y": 700.0}),
        json!({"content": "Description", "x": 30.0, "y": 700.0}),
        json!({"content": "2", "x": 150.0, "y": 700.0}),
        json!({"content": "Qty", "x": 200.0, "y": 700.0}),
    ];
    let items = [("Amul Taaza Milk 500g", "1"), ("Fortune Oil (1l) Pouch", "2")];
    let mut y = 680.0;
    for (i, (name, qty)) in items.iter().enumerate() {
        fragments.push(json!({"content": (i + 1).to_string(), "x": 10.0, "y": y}));
        fragments.push(json!({"content": name, "x": 30.0, "y": y}));
        fragments.push(json!({"content": qty, "x": 200.0, "y": y}));
        y -= 20.0;
    }
    fragments.push(json!({"content": "Total", "x": 30.0, "y": y}));

    json!({"pages": [{"number": 1, "fragments": fragments}]})
}

fn write_json(dir: &Path, name: &str, value: &Value) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

#[test]
fn test_process_json_fragments() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "invoice.json", &invoice_json("Zepto"));

    let output = cartslip().arg("process").arg(&input).output().unwrap();
    assert!(output.status.success());

    let result: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        result,
        json!({
            "provider": "zepto",
            "items": [
                {"name": "Amul Taaza Milk", "count": 1.0, "unit_value": 500.0, "unit": "g"},
                {"name": "Fortune Oil Pouch", "count": 2.0, "unit_value": 1000.0, "unit": "ml"}
            ]
        })
    );
}

#[test]
fn test_process_csv_to_file() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "invoice.json", &invoice_json("blinkit"));
    let out = dir.path().join("items.csv");

    cartslip()
        .args(["process", "--format", "csv", "-o"])
        .arg(&out)
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("2 items written"));

    let csv = fs::read_to_string(&out).unwrap();
    assert!(csv.starts_with("name,count,unit_value,unit,provider\n"));
    assert!(csv.contains("Amul Taaza Milk,1,500,g,blinkit\n"));
}

#[test]
fn test_process_fail_on_empty() {
    let dir = TempDir::new().unwrap();
    let empty = json!({"pages": [{"number": 1, "fragments": [{"content": "Thank you", "x": 10.0, "y": 10.0}]}]});
    let input = write_json(dir.path(), "empty.json", &empty);

    cartslip()
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"items\":[]"));

    cartslip()
        .args(["process", "--fail-on-empty"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No items found"));
}

#[test]
fn test_process_rejects_bad_input() {
    let dir = TempDir::new().unwrap();

    cartslip()
        .arg("process")
        .arg(dir.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));

    let txt = dir.path().join("invoice.txt");
    fs::write(&txt, "hello").unwrap();
    cartslip()
        .arg("process")
        .arg(&txt)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));

    let pdf = dir.path().join("broken.pdf");
    fs::write(&pdf, "not a pdf").unwrap();
    cartslip()
        .arg("process")
        .arg(&pdf)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to parse PDF"));
}

#[test]
fn test_rows_shows_columns() {
    let dir = TempDir::new().unwrap();
    let input = write_json(dir.path(), "invoice.json", &invoice_json("Zepto"));

    cartslip()
        .arg("rows")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 (5 rows)"))
        .stdout(predicate::str::contains("columns: name_x=30.00 qty_x=200.00"));
}

#[test]
fn test_name_command() {
    cartslip()
        .args(["name", "OrganicSetCurd500g"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:  Organic Set Curd"))
        .stdout(predicate::str::contains("Value: 500"))
        .stdout(predicate::str::contains("Unit:  g"))
        .stdout(predicate::str::contains("Tier:  inline"));
}

#[test]
fn test_batch_with_summary() {
    let dir = TempDir::new().unwrap();
    let inputs = dir.path().join("in");
    let outputs = dir.path().join("out");
    fs::create_dir_all(&inputs).unwrap();

    write_json(&inputs, "a.json", &invoice_json("Zepto"));
    write_json(&inputs, "b.json", &invoice_json("instamart"));
    fs::write(inputs.join("c.json"), "{ not json").unwrap();

    let pattern = format!("{}/*.json", inputs.display());

    cartslip()
        .args(["batch", pattern.as_str(), "--summary", "--continue-on-error", "-j", "2", "--output-dir"])
        .arg(&outputs)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 3 files"));

    let a: Value = serde_json::from_str(&fs::read_to_string(outputs.join("a.json")).unwrap()).unwrap();
    assert_eq!(a["provider"], "zepto");
    assert!(!outputs.join("c.json").exists());

    let summary = fs::read_to_string(outputs.join("summary.csv")).unwrap();
    let lines: Vec<&str> = summary.lines().collect();
    assert_eq!(lines[0], "filename,status,provider,items,processing_time_ms,error");
    assert!(lines[1].starts_with("a.json,success,zepto,2,"));
    assert!(lines[2].starts_with("b.json,success,swiggy,2,"));
    assert!(lines[3].starts_with("c.json,error,,,"));
}

#[test]
fn test_batch_stops_on_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.json"), "{ broken").unwrap();
    let pattern = format!("{}/*.json", dir.path().display());

    cartslip()
        .args(["batch", pattern.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Processing failed"));
}

#[test]
fn test_config_roundtrip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("cartslip.json");
    let config_arg = config.to_str().unwrap();

    cartslip()
        .args(["-c", config_arg, "config", "init"])
        .assert()
        .success();
    assert!(config.exists());

    cartslip()
        .args(["-c", config_arg, "config", "set", "pdf.max_pages", "2"])
        .assert()
        .success();

    cartslip()
        .args(["-c", config_arg, "config", "get", "pdf.max_pages"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2"));

    cartslip()
        .args(["-c", config_arg, "config", "set", "pdf.max_pages", "many"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid value for pdf.max_pages"));

    cartslip()
        .args(["-c", config_arg, "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[cfg(target_os = "linux")]
#[test]
fn test_default_config_location_is_used() {
    let dir = TempDir::new().unwrap();
    let config_home = dir.path().join("config");
    let input = write_json(dir.path(), "invoice.json", &invoice_json("Zepto"));

    cartslip()
        .env("XDG_CONFIG_HOME", &config_home)
        .args(["config", "set", "output.pretty_json", "true"])
        .assert()
        .success();
    assert!(config_home.join("cartslip").join("config.json").exists());

    cartslip()
        .env("XDG_CONFIG_HOME", &config_home)
        .arg("process")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("{\n  \"provider\": \"zepto\""));
}

#[test]
fn test_invalid_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.json");
    fs::write(&config, "{ nope").unwrap();
    let input = write_json(dir.path(), "invoice.json", &invoice_json("Zepto"));

    cartslip()
        .args(["-c", config.to_str().unwrap(), "process"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("configuration error"));
}
