//! Directory-level behavior of `HashDatabase::load`.

use hscan::db::HashDatabase;
use std::fs;
use tempfile::TempDir;

const DIGEST_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
const DIGEST_B: &str = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
const DIGEST_C: &str = "cccccccccccccccccccccccccccccccccccccccc";
const DIGEST_D: &str = "dddddddddddddddddddddddddddddddddddddddd";

#[test]
fn test_load_counts_unique_digests_after_truncation() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    // 4 unique digests, 1 duplicate-by-truncation, plus blank noise.
    let list = format!("{DIGEST_A}\n{DIGEST_B}\n{DIGEST_C}\n{DIGEST_D}\n{DIGEST_D}ff00\n\n   \n");
    fs::write(dir.path().join("list.txt"), list).expect("Failed to write list");

    let db = HashDatabase::load(dir.path()).expect("Failed to load database");

    assert_eq!(db.sources(), &["list.txt".to_string()]);
    assert_eq!(db.len(), 4);
    for digest in [DIGEST_A, DIGEST_B, DIGEST_C, DIGEST_D] {
        assert_eq!(db.lookup(digest), Some(0), "missing digest {digest}");
    }
}

#[test]
fn test_load_normalizes_uppercase_lines() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join("upper.txt"),
        format!("  {}  \n", DIGEST_A.to_uppercase()),
    )
    .expect("Failed to write list");

    let db = HashDatabase::load(dir.path()).expect("Failed to load database");

    assert_eq!(db.lookup(DIGEST_A), Some(0));
}

#[test]
fn test_later_list_wins_duplicate_digest() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    // Loaded in file-name order: a.txt gets index 0, b.txt index 1.
    fs::write(dir.path().join("a.txt"), format!("{DIGEST_A}\n{DIGEST_B}\n"))
        .expect("Failed to write a.txt");
    fs::write(dir.path().join("b.txt"), format!("{DIGEST_A}\n")).expect("Failed to write b.txt");

    let db = HashDatabase::load(dir.path()).expect("Failed to load database");

    assert_eq!(db.sources(), &["a.txt".to_string(), "b.txt".to_string()]);
    assert_eq!(db.lookup(DIGEST_A), Some(1));
    assert_eq!(db.source_name(1), "b.txt");
    assert_eq!(db.lookup(DIGEST_B), Some(0));
}

#[test]
fn test_load_skips_subdirs_and_non_text_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    fs::write(dir.path().join("list.txt"), format!("{DIGEST_A}\n")).expect("Failed to write list");
    fs::write(dir.path().join("blob.bin"), [0x00u8, 0xff, 0x00, 0x01, 0x02])
        .expect("Failed to write blob");
    let sub = dir.path().join("nested");
    fs::create_dir(&sub).expect("Failed to create subdir");
    fs::write(sub.join("ignored.txt"), format!("{DIGEST_B}\n")).expect("Failed to write nested");

    let db = HashDatabase::load(dir.path()).expect("Failed to load database");

    assert_eq!(db.sources(), &["list.txt".to_string()]);
    assert_eq!(db.len(), 1);
    assert_eq!(db.lookup(DIGEST_B), None);
}

#[test]
fn test_empty_directory_reports_no_usable_files() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    let db = HashDatabase::load(dir.path()).expect("Failed to load database");

    assert!(db.is_empty());
    assert_eq!(db.len(), 0);
}

#[test]
fn test_missing_directory_is_an_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");

    assert!(HashDatabase::load(&dir.path().join("nope")).is_err());
}
