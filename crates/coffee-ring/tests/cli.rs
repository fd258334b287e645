#![cfg(feature = "cli")]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;

fn write_disk_png(dir: &Path, name: &str) -> PathBuf {
    let mut img = image::RgbImage::from_pixel(160, 120, image::Rgb([235, 235, 235]));
    for y in 0..120i64 {
        for x in 0..160i64 {
            let (dx, dy) = (x - 80, y - 60);
            if dx * dx + dy * dy <= 30 * 30 {
                img.put_pixel(x as u32, y as u32, image::Rgb([110, 70, 30]));
            }
        }
    }
    let path = dir.join(name);
    img.save(&path).expect("write test image");
    path
}

fn coffee_ring() -> Command {
    Command::cargo_bin("coffee-ring").expect("binary built")
}

#[test]
fn default_config_is_valid_json() {
    let out = coffee_ring()
        .arg("default-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"radius_scale\": 1.2"))
        .get_output()
        .stdout
        .clone();
    let value: serde_json::Value = serde_json::from_slice(&out).expect("json");
    assert_eq!(value["center"]["method"], "color_threshold");
    assert_eq!(value["center"]["tolerance"], 20);
}

#[test]
fn analyze_writes_all_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_disk_png(dir.path(), "drop_01.png");
    let out_dir = dir.path().join("out");

    coffee_ring()
        .args(["analyze", image.to_str().unwrap(), "--out-dir"])
        .arg(&out_dir)
        .args(["--log-level", "warn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("center (80, 60)"));

    for name in [
        "drop_01_RadialProfile.csv",
        "drop_01_circle.csv",
        "drop_01_RadialProfile.json",
        "drop_01_RadialProfile.png",
        "drop_01_overlay.png",
        "drop_01_channels.png",
        "drop_01_crop.png",
    ] {
        assert!(out_dir.join(name).is_file(), "missing {name}");
    }

    let csv = fs::read_to_string(out_dir.join("drop_01_RadialProfile.csv")).unwrap();
    assert!(csv.starts_with(
        "radius,R_gray_values,R_stddev,G_gray_values,G_stddev,B_gray_values,B_stddev,samples"
    ));
}

#[test]
fn flags_override_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_disk_png(dir.path(), "drop.png");
    let config = dir.path().join("params.json");
    fs::write(&config, r#"{"radius": 12}"#).unwrap();

    coffee_ring()
        .args(["analyze", image.to_str().unwrap()])
        .arg("--config")
        .arg(&config)
        .arg("--out-dir")
        .arg(dir.path())
        .args(["--three-point", "50,60", "110,60", "80,90", "--radius", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("center (80, 60) radius 20 px (located 30 px)"));

    let circle = fs::read_to_string(dir.path().join("drop_circle.csv")).unwrap();
    assert_eq!(circle.lines().nth(1).unwrap().split(',').nth(2), Some("20"));
}

#[test]
fn collinear_points_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_disk_png(dir.path(), "drop.png");

    coffee_ring()
        .args(["analyze", image.to_str().unwrap(), "--out-dir"])
        .arg(dir.path())
        .args(["--three-point", "0,0", "1,1", "2,2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CollinearPoints"));
}

#[test]
fn malformed_point_is_a_usage_error() {
    coffee_ring()
        .args(["analyze", "missing.png", "--seed", "12"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected two comma-separated integers"));
}
