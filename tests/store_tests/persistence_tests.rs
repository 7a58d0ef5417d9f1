//! Tests for Store load/save
//!
//! These tests verify:
//! - Parsing files into the store
//! - Exact serialized output
//! - Save/load round trips
//! - Long lines beyond the read chunk
//! - Missing and unwritable paths
//! - Merging into a non-empty store

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use kvconf::{ConfError, Config, LoadStats, Store};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_file(name: &str, contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    fs::write(&path, contents).unwrap();
    (temp_dir, path)
}

fn pairs(store: &Store) -> Vec<(String, String)> {
    store
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn saved(store: &Store) -> String {
    let mut out = Vec::new();
    store.save_to(&mut out).unwrap();
    String::from_utf8(out).unwrap()
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_load_parses_key_value_lines() {
    let (_temp, path) = setup_temp_file(
        "settings.txt",
        "foo  bar  = abc def =   ghi   \n  bar =   54321 \nbaz =  123.1\n",
    );

    let mut store = Store::new();
    store.load(&path).unwrap();

    assert_eq!(store.get_string("foo  bar", "ERROR"), "abc def =   ghi");
    assert_eq!(store.get_int("bar", 9999), 54321);
    assert_eq!(store.get_float("baz", 9999.0), 123.1);
}

#[test]
fn test_load_reports_stats() {
    let input = "a = 1\n\nnot an entry\nb = 2\n";
    let mut store = Store::new();

    let stats = store.load_from(Cursor::new(input)).unwrap();

    assert_eq!(
        stats,
        LoadStats {
            lines_read: 4,
            entries_applied: 2,
            lines_skipped: 2,
        }
    );
}

#[test]
fn test_load_skips_lines_without_delimiter() {
    let input = "# header\n\nfoo = 1\ngarbage\nbar = 2\n";
    let mut store = Store::new();
    store.load_from(Cursor::new(input)).unwrap();

    assert_eq!(
        pairs(&store),
        vec![
            ("foo".to_string(), "1".to_string()),
            ("bar".to_string(), "2".to_string()),
        ]
    );
}

#[test]
fn test_repeated_key_first_position_last_value() {
    let input = "a = 1\nb = 2\na = 3\nc = 4\n";
    let mut store = Store::new();
    store.load_from(Cursor::new(input)).unwrap();

    let entries: Vec<(&str, &str)> = store.iter().collect();
    assert_eq!(entries, vec![("a", "3"), ("b", "2"), ("c", "4")]);
}

#[test]
fn test_load_merges_into_existing_store() {
    let mut store = Store::new();
    store.set_string("kept", "yes").unwrap();
    store.set_string("shared", "old").unwrap();

    store
        .load_from(Cursor::new("shared = new\nadded = 1\n"))
        .unwrap();

    let entries: Vec<(&str, &str)> = store.iter().collect();
    assert_eq!(
        entries,
        vec![("kept", "yes"), ("shared", "new"), ("added", "1")]
    );
}

#[test]
fn test_load_crlf_file() {
    let mut store = Store::new();
    store
        .load_from(Cursor::new("a = 1\r\nb = two words\r\n"))
        .unwrap();

    assert_eq!(store.get_string("a", ""), "1");
    assert_eq!(store.get_string("b", ""), "two words");
}

#[test]
fn test_load_final_line_without_newline() {
    let mut store = Store::new();
    store.load_from(Cursor::new("a = 1\nb = 2")).unwrap();
    assert_eq!(store.get_string("b", ""), "2");
}

#[test]
fn test_load_skips_invalid_utf8_lines() {
    let mut data = b"good = 1\n".to_vec();
    data.extend_from_slice(&[0xff, b' ', b'=', b' ', 0xfe, b'\n']);
    data.extend_from_slice(b"also = 2\n");

    let mut store = Store::new();
    let stats = store.load_from(Cursor::new(data)).unwrap();

    assert_eq!(stats.lines_skipped, 1);
    assert_eq!(store.len(), 2);
    assert_eq!(store.get_string("also", ""), "2");
}

#[test]
fn test_load_skips_oversized_entries() {
    let config = Config::builder().max_key_len(4).max_value_len(4).build();
    let mut store = Store::with_config(config);

    let stats = store
        .load_from(Cursor::new("ok = 1\ntoolong = 2\nv = 12345\nfine = 3\n"))
        .unwrap();

    assert_eq!(stats.entries_applied, 2);
    assert_eq!(stats.lines_skipped, 2);
    let keys: Vec<&str> = store.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["ok", "fine"]);
}

#[test]
fn test_load_long_line_beyond_chunk() {
    let long_value = "0123456789".repeat(1_000);
    let contents = format!("before = 1\nlong = {}\nafter = 2\n", long_value);
    let (_temp, path) = setup_temp_file("long.txt", &contents);

    let config = Config::builder().chunk_size(64).build();
    let mut store = Store::with_config(config);
    store.load(&path).unwrap();

    assert_eq!(store.get_string("long", ""), long_value);
    assert_eq!(store.get_int("before", 0), 1);
    assert_eq!(store.get_int("after", 0), 2);
}

#[test]
fn test_load_long_line_with_default_chunk() {
    let long_key = "k".repeat(3_000);
    let long_value = "v".repeat(5_000);
    let contents = format!("{} = {}\n", long_key, long_value);

    let mut store = Store::new();
    store.load_from(Cursor::new(contents)).unwrap();

    assert_eq!(store.get_string(&long_key, ""), long_value);
}

#[test]
fn test_load_nonexistent_path_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = Store::new();

    let result = store.load(temp_dir.path().join("missing.txt"));

    assert!(matches!(result, Err(ConfError::Io(_))));
    assert!(store.is_empty());
}

#[test]
fn test_load_nonexistent_path_keeps_existing_entries() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = Store::new();
    store.set_string("a", "1").unwrap();

    assert!(store.load(temp_dir.path().join("missing.txt")).is_err());
    assert_eq!(pairs(&store), vec![("a".to_string(), "1".to_string())]);
}

#[test]
fn test_load_empty_file() {
    let (_temp, path) = setup_temp_file("empty.txt", "");
    let mut store = Store::new();

    let stats = store.load(&path).unwrap();
    assert_eq!(stats, LoadStats::default());
    assert!(store.is_empty());
}

// =============================================================================
// Save Tests
// =============================================================================

#[test]
fn test_save_exact_output() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.txt");

    let mut store = Store::new();
    store.set_string("foo", "abc def ghi").unwrap();
    store.set_string("bar", "54321").unwrap();
    store.set_string("baz", "123.1").unwrap();
    store.save(&path).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "foo = abc def ghi\nbar = 54321\nbaz = 123.1\n"
    );
}

#[test]
fn test_save_empty_store_writes_empty_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out.txt");

    Store::new().save(&path).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}

#[test]
fn test_save_truncates_existing_file() {
    let (_temp, path) = setup_temp_file("out.txt", "old = content\nmore = lines\nand = more\n");

    let mut store = Store::new();
    store.set_string("new", "1").unwrap();
    store.save(&path).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "new = 1\n");
}

#[test]
fn test_save_after_remove_and_update() {
    let mut store = Store::new();
    store.set_string("a", "1").unwrap();
    store.set_string("b", "2").unwrap();
    store.set_string("c", "3").unwrap();
    store.remove("b");
    store.set_string("a", "one").unwrap();

    assert_eq!(saved(&store), "a = one\nc = 3\n");
}

#[test]
fn test_save_to_unwritable_destination_fails() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = Store::new();
    store.set_string("a", "1").unwrap();

    let missing_dir = temp_dir.path().join("no_such_dir").join("out.txt");
    assert!(matches!(store.save(&missing_dir), Err(ConfError::Io(_))));

    // A directory cannot be opened as a file
    assert!(matches!(store.save(temp_dir.path()), Err(ConfError::Io(_))));
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_save_load_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("round.txt");

    let mut original = Store::new();
    original.set_string("name", "kvconf demo").unwrap();
    original.set_int("retries", -3).unwrap();
    original.set_float("ratio", 0.75).unwrap();
    original.set_string("expr", "a = b = c").unwrap();
    original.set_string("empty", "").unwrap();
    original.save(&path).unwrap();

    let mut loaded = Store::new();
    loaded.load(&path).unwrap();

    assert_eq!(pairs(&loaded), pairs(&original));
    assert_eq!(loaded.get_int("retries", 0), -3);
    assert_eq!(loaded.get_float("ratio", 0.0), 0.75);
}

#[test]
fn test_round_trip_many_entries() {
    let mut original = Store::new();
    for i in 0..250 {
        original
            .set_string(&format!("key.{:03}", i), &format!("value {}", i * 7))
            .unwrap();
    }
    for i in (0..250).step_by(5) {
        original.remove(&format!("key.{:03}", i));
    }

    let mut loaded = Store::new();
    loaded.load_from(Cursor::new(saved(&original))).unwrap();

    assert_eq!(loaded.len(), 200);
    assert_eq!(pairs(&loaded), pairs(&original));
}

#[test]
fn test_round_trip_loses_surrounding_whitespace() {
    let mut original = Store::new();
    original.set_string("k", "  padded  ").unwrap();

    let mut loaded = Store::new();
    loaded.load_from(Cursor::new(saved(&original))).unwrap();

    assert_eq!(loaded.get_string("k", ""), "padded");
}
