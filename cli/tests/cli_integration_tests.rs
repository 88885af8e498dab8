//! End-to-end tests driving the compiled binary.
//!
//! Each test seeds a throwaway catalog directory, runs the CLI against
//! it, and inspects the files and streams it leaves behind.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde_json::{json, Value};
use tempfile::TempDir;

fn run(data_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_curio"))
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

/// Seeded data dir with one record per collection, plus an empty
/// incoming dir next to it.
fn seed_catalog(root: &Path) -> (PathBuf, PathBuf) {
    let data_dir = root.join("data");
    let incoming_dir = root.join("incoming");
    fs::create_dir_all(&data_dir).unwrap();
    fs::create_dir_all(&incoming_dir).unwrap();

    fs::write(
        data_dir.join("collections.json"),
        r#"[{"id": "c-1", "name": "Favorites"}]"#,
    )
    .unwrap();
    fs::write(
        data_dir.join("media-index.json"),
        r#"[{"id": "m-1", "title": "Dust"}]"#,
    )
    .unwrap();

    (data_dir, incoming_dir)
}

fn snapshot_dirs(data_dir: &Path) -> Vec<PathBuf> {
    match fs::read_dir(data_dir.join("local_backups")) {
        Ok(entries) => entries.map(|e| e.unwrap().path()).collect(),
        Err(_) => Vec::new(),
    }
}

fn load_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn preview_prints_the_diff_as_json_and_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let (data_dir, incoming_dir) = seed_catalog(temp.path());
    fs::write(
        incoming_dir.join("collections.json"),
        r#"[{"id": "c-1", "name": "Renamed"}, {"id": "c-2"}]"#,
    )
    .unwrap();
    fs::write(incoming_dir.join("media-index.json"), "[]").unwrap();

    let output = run(&data_dir, &["preview", incoming_dir.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "preview should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Stdout is pure JSON; any diagnostics go to stderr.
    let stdout = String::from_utf8_lossy(&output.stdout);
    let diff: Value = serde_json::from_str(&stdout).expect("stdout should be valid JSON");

    assert_eq!(diff["collections"]["added"], json!([{"id": "c-2"}]));
    assert_eq!(
        diff["collections"]["updated"],
        json!([{
            "before": {"id": "c-1", "name": "Favorites"},
            "after": {"id": "c-1", "name": "Renamed"},
        }])
    );
    assert_eq!(diff["media"]["removed"], json!([{"id": "m-1", "title": "Dust"}]));

    // Read-only: no snapshot, files untouched.
    assert!(snapshot_dirs(&data_dir).is_empty());
    assert_eq!(
        fs::read_to_string(data_dir.join("collections.json")).unwrap(),
        r#"[{"id": "c-1", "name": "Favorites"}]"#
    );
}

#[test]
fn overwrite_replaces_state_and_keeps_a_snapshot() {
    let temp = TempDir::new().unwrap();
    let (data_dir, incoming_dir) = seed_catalog(temp.path());
    fs::write(
        incoming_dir.join("collections.json"),
        r#"[{"id": "c-9", "name": "Fresh"}]"#,
    )
    .unwrap();
    fs::write(incoming_dir.join("media-index.json"), "[]").unwrap();

    let output = run(&data_dir, &["overwrite", incoming_dir.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "overwrite should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // The authoritative files now hold the incoming state.
    assert_eq!(
        load_json(&data_dir.join("collections.json")),
        json!([{"id": "c-9", "name": "Fresh"}])
    );
    assert_eq!(load_json(&data_dir.join("media-index.json")), json!([]));

    // The prior state survives, byte for byte, in the snapshot.
    let snapshots = snapshot_dirs(&data_dir);
    assert_eq!(snapshots.len(), 1);
    assert_eq!(
        fs::read_to_string(snapshots[0].join("collections.json")).unwrap(),
        r#"[{"id": "c-1", "name": "Favorites"}]"#
    );
    assert_eq!(
        fs::read_to_string(snapshots[0].join("media-index.json")).unwrap(),
        r#"[{"id": "m-1", "title": "Dust"}]"#
    );

    // The rebuild hook announced both phases on stderr.
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("rebuilding search index"), "stderr: {stderr}");
    assert!(stderr.contains("rebuilding text index"), "stderr: {stderr}");
}

#[test]
fn merge_archives_conflicts_and_logs_them() {
    let temp = TempDir::new().unwrap();
    let (data_dir, incoming_dir) = seed_catalog(temp.path());
    fs::write(
        incoming_dir.join("collections.json"),
        r#"[{"id": "c-1", "name": "Renamed"}, {"id": "c-2"}]"#,
    )
    .unwrap();
    fs::write(incoming_dir.join("media-index.json"), "[]").unwrap();

    let output = run(&data_dir, &["merge", incoming_dir.to_str().unwrap()]);
    assert!(
        output.status.success(),
        "merge should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    // Incoming won on the conflicting id; the union kept everything else.
    assert_eq!(
        load_json(&data_dir.join("collections.json")),
        json!([{"id": "c-1", "name": "Renamed"}, {"id": "c-2"}])
    );
    assert_eq!(
        load_json(&data_dir.join("media-index.json")),
        json!([{"id": "m-1", "title": "Dust"}])
    );

    // The superseded version landed under the snapshot's conflicts dir.
    let snapshots = snapshot_dirs(&data_dir);
    assert_eq!(snapshots.len(), 1);
    let artifact = snapshots[0]
        .join("conflicts")
        .join("collections_c-1_conflictCopy.json");
    assert_eq!(
        load_json(&artifact),
        json!({"id": "c-1", "name": "Favorites"})
    );

    // One log line: "<stamp> collections:c-1 -> <artifact>".
    let log = fs::read_to_string(data_dir.join("merge.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 1);
    let (stamp, rest) = lines[0].split_once(' ').unwrap();
    chrono::DateTime::parse_from_rfc3339(stamp).expect("log stamp should be RFC 3339");
    assert!(stamp.ends_with('Z'));
    assert!(rest.starts_with("collections:c-1 -> "));
    assert!(rest.ends_with("collections_c-1_conflictCopy.json"));
}

#[test]
fn merge_without_conflicts_writes_no_log() {
    let temp = TempDir::new().unwrap();
    let (data_dir, incoming_dir) = seed_catalog(temp.path());
    fs::write(incoming_dir.join("collections.json"), r#"[{"id": "c-2"}]"#).unwrap();
    fs::write(incoming_dir.join("media-index.json"), "[]").unwrap();

    let output = run(&data_dir, &["merge", incoming_dir.to_str().unwrap()]);
    assert!(output.status.success());

    assert!(!data_dir.join("merge.log").exists());
    assert_eq!(
        load_json(&data_dir.join("collections.json")),
        json!([{"id": "c-1", "name": "Favorites"}, {"id": "c-2"}])
    );
}

#[test]
fn merge_log_accumulates_across_runs() {
    let temp = TempDir::new().unwrap();
    let (data_dir, incoming_dir) = seed_catalog(temp.path());
    fs::write(incoming_dir.join("media-index.json"), "[]").unwrap();

    for name in ["First", "Second"] {
        fs::write(
            incoming_dir.join("collections.json"),
            format!(r#"[{{"id": "c-1", "name": "{name}"}}]"#),
        )
        .unwrap();
        let output = run(&data_dir, &["merge", incoming_dir.to_str().unwrap()]);
        assert!(output.status.success());
    }

    let log = fs::read_to_string(data_dir.join("merge.log")).unwrap();
    assert_eq!(log.lines().count(), 2);
    // Each run leaves its own snapshot.
    assert_eq!(snapshot_dirs(&data_dir).len(), 2);
}

#[test]
fn incoming_dir_defaults_to_the_data_dir() {
    let temp = TempDir::new().unwrap();
    let (data_dir, _incoming_dir) = seed_catalog(temp.path());

    // Merging the catalog with itself: identical records, no conflicts.
    let output = run(&data_dir, &["merge"]);
    assert!(
        output.status.success(),
        "self-merge should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert!(!data_dir.join("merge.log").exists());
    assert_eq!(
        load_json(&data_dir.join("collections.json")),
        json!([{"id": "c-1", "name": "Favorites"}])
    );
    assert_eq!(snapshot_dirs(&data_dir).len(), 1);
}

#[test]
fn invalid_incoming_exits_one_and_mutates_nothing() {
    let temp = TempDir::new().unwrap();
    let (data_dir, incoming_dir) = seed_catalog(temp.path());
    fs::write(
        incoming_dir.join("collections.json"),
        r#"[{"id": "ok"}, {"name": "no id"}]"#,
    )
    .unwrap();
    fs::write(incoming_dir.join("media-index.json"), "[]").unwrap();

    let output = run(&data_dir, &["overwrite", incoming_dir.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: record 1 in 'collections' has no id field"),
        "stderr: {stderr}"
    );

    // The gate held: no snapshot, no writes.
    assert!(snapshot_dirs(&data_dir).is_empty());
    assert_eq!(
        fs::read_to_string(data_dir.join("collections.json")).unwrap(),
        r#"[{"id": "c-1", "name": "Favorites"}]"#
    );
}

#[test]
fn malformed_incoming_file_names_the_path() {
    let temp = TempDir::new().unwrap();
    let (data_dir, incoming_dir) = seed_catalog(temp.path());
    fs::write(incoming_dir.join("collections.json"), "{ not json").unwrap();

    let output = run(&data_dir, &["merge", incoming_dir.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error: malformed catalog file"), "stderr: {stderr}");
    assert!(stderr.contains("collections.json"), "stderr: {stderr}");
    assert!(snapshot_dirs(&data_dir).is_empty());
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_curio"))
        .output()
        .expect("Failed to execute CLI");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "stderr: {stderr}");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_curio"))
        .arg("frobnicate")
        .output()
        .expect("Failed to execute CLI");

    assert_eq!(output.status.code(), Some(2));
    assert!(!String::from_utf8_lossy(&output.stderr).is_empty());
}

#[test]
fn missing_data_dir_previews_as_empty() {
    let temp = TempDir::new().unwrap();
    let data_dir = temp.path().join("data");
    let incoming_dir = temp.path().join("incoming");
    fs::create_dir_all(&incoming_dir).unwrap();
    fs::write(incoming_dir.join("collections.json"), r#"[{"id": "c-1"}]"#).unwrap();

    let output = run(&data_dir, &["preview", incoming_dir.to_str().unwrap()]);
    assert!(output.status.success());

    let diff: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(diff["collections"]["added"], json!([{"id": "c-1"}]));
    assert_eq!(diff["media"]["added"], json!([]));
}
