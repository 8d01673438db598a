//! Integration tests for scattercrate-io
//!
//! These tests go through real files on disk to check that the file based
//! entry points behave like the in-memory parser.

use scattercrate_io::*;
use scattercrate_core::Point3f;
use std::fs;
use std::path::PathBuf;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("scattercrate_io_{}_{}", std::process::id(), name))
}

#[test]
fn test_file_matches_in_memory_parse() {
    let content = "# generated\n1.0,2.0,3.0\n4,5\n6.0, 7.0, 8.0\n-1,-2,-3,extra\n";
    let path = temp_path("matches.txt");
    fs::write(&path, content).unwrap();

    let from_file = ScatterTextReader::read_path(&path);
    let from_text = ScatterTextReader::parse_str(content);

    assert_eq!(from_file.cloud, from_text.cloud);
    assert_eq!(from_file.warnings.len(), from_text.warnings.len());
    assert_eq!(from_file.cloud.points, vec![
        Point3f::new(1.0, 2.0, 3.0),
        Point3f::new(6.0, 7.0, 8.0),
        Point3f::new(-1.0, -2.0, -3.0),
    ]);
    assert_eq!(from_file.rejected_lines(), 1);

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_empty_file() {
    let path = temp_path("empty.txt");
    fs::write(&path, "").unwrap();

    let report = ScatterTextReader::read_path(&path);
    assert!(report.cloud.is_empty());
    assert!(report.warnings.is_empty());

    fs::remove_file(&path).unwrap();
}

#[test]
fn test_unopenable_source_is_not_an_error() {
    let path = temp_path("missing.txt");
    let _ = fs::remove_file(&path);

    let cloud = load_point_cloud(&path);
    assert!(cloud.is_empty());

    let report = ScatterTextReader::read_path(&path);
    match &report.warnings[..] {
        [IoError::SourceUnavailable { path: reported, .. }] => {
            assert!(reported.ends_with("missing.txt"));
        }
        other => panic!("unexpected warnings: {other:?}"),
    }
}

#[test]
fn test_directory_is_unavailable_or_unreadable() {
    // Opening a directory succeeds on some platforms and fails on others;
    // either way no points come out and something is reported.
    let report = ScatterTextReader::read_path(std::env::temp_dir());
    assert!(report.cloud.is_empty());
    assert_eq!(report.warnings.len(), 1);
}

#[test]
fn test_parse_point_cloud_convenience() {
    let cloud = parse_point_cloud("0.5,0.25,0.125\n#skip\n");
    assert_eq!(cloud.len(), 1);
    approx::assert_relative_eq!(cloud[0].z, 0.125);
}
