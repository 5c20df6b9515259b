use std::fs;
use std::path::Path;
use std::process::Command;
use std::process::Output;

use tempfile::tempdir;

const BINARIES: [&str; 2] = [
    env!("CARGO_BIN_EXE_coinchart"),
    env!("CARGO_BIN_EXE_coinchart-advanced"),
];

fn run_in(dir: &Path, bin: &str, args: &[&str]) -> Output {
    Command::new(bin)
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn entries(dir: &Path) -> usize {
    fs::read_dir(dir).unwrap().count()
}

#[test]
fn test_no_arguments_prints_usage() {
    let dir = tempdir().unwrap();
    for bin in BINARIES {
        let output = run_in(dir.path(), bin, &[]);
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage:"), "stderr: {stderr}");
        assert!(stderr.contains("<input_csv_file>"), "stderr: {stderr}");
    }
    assert_eq!(entries(dir.path()), 0);
}

#[test]
fn test_two_arguments_prints_usage() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.csv"), "snapped_at,price,total_volume,market_cap\n").unwrap();
    for bin in BINARIES {
        let output = run_in(dir.path(), bin, &["a.csv", "b.csv"]);
        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("Usage:"));
    }
    assert_eq!(entries(dir.path()), 1);
}

#[test]
fn test_help_exits_successfully() {
    let dir = tempdir().unwrap();
    let output = run_in(dir.path(), BINARIES[0], &["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("input_csv_file"));
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().unwrap();
    for bin in BINARIES {
        let output = run_in(dir.path(), bin, &["missing.csv"]);
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("Error: File 'missing.csv' not found."),
            "stderr: {stderr}"
        );
    }
    assert_eq!(entries(dir.path()), 0);
}

#[test]
fn test_missing_column_fails_without_output() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("prices.csv"),
        "snapped_at,price,total_volume\n2024-01-01 00:00:00 UTC,1,2\n",
    )
    .unwrap();

    for bin in BINARIES {
        let output = run_in(dir.path(), bin, &["prices.csv"]);
        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(
            stderr.contains("missing required column 'market_cap'"),
            "stderr: {stderr}"
        );
    }
    assert_eq!(entries(dir.path()), 1);
}

#[test]
fn test_header_only_input_is_rejected() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join("empty.csv"),
        "snapped_at,price,total_volume,market_cap\n",
    )
    .unwrap();

    let output = run_in(dir.path(), BINARIES[1], &["empty.csv"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no observations"));
    assert!(!dir.path().join("empty_advanced_chart.png").exists());
}

/// Width and height from the PNG IHDR chunk.
fn png_size(bytes: &[u8]) -> (u32, u32) {
    assert_eq!(&bytes[1..4], b"PNG");
    let width = u32::from_be_bytes(bytes[16..20].try_into().unwrap());
    let height = u32::from_be_bytes(bytes[20..24].try_into().unwrap());
    (width, height)
}

#[test]
fn test_renders_chart_next_to_input() {
    let dir = tempdir().unwrap();
    let mut csv = String::from("snapped_at,price,total_volume,market_cap\n");
    for day in 1..=28 {
        let price = 100.0 + (day % 7) as f64 * 3.5;
        let market_cap = if day == 10 { 0.0 } else { price * 1_000.0 };
        csv.push_str(&format!(
            "2024-02-{day:02} 00:00:00 UTC,{price},{},{market_cap}\n",
            price * 40.0
        ));
    }
    fs::write(dir.path().join("in.csv"), csv).unwrap();

    let cases = [
        (BINARIES[0], "Chart", "in_chart.png", (3600, 1800)),
        (BINARIES[1], "Advanced chart", "in_advanced_chart.png", (4500, 6000)),
    ];
    for (bin, name, file, size) in cases {
        let output = run_in(dir.path(), bin, &["in.csv"]);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(output.status.code(), Some(0), "stderr: {stderr}");
        assert_eq!(
            String::from_utf8_lossy(&output.stdout).trim(),
            format!("{name} saved as {file}")
        );

        let png = fs::read(dir.path().join(file)).unwrap();
        assert_eq!(png_size(&png), size);
    }
    assert_eq!(entries(dir.path()), 3);
}
