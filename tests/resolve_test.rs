//! Integration tests for batch-file resolution and the output layout.

use ripforged::entry::{resolve_all, Role};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_batch(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("batch.yml");
    fs::write(&path, yaml).unwrap();
    path
}

fn touch(dir: &Path, name: &str) {
    fs::write(dir.join(name), b"fake media").unwrap();
}

#[test]
fn scenario_single_feature_with_edition() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "movie.mkv");
    let config = write_batch(
        dir.path(),
        r#"
movie.mkv:
  title: 28 Days Later
  edition: Widescreen DVD
"#,
    );

    let entries = resolve_all(&config).unwrap();
    assert_eq!(entries.len(), 1);

    let feature = &entries[0];
    assert_eq!(
        feature.output_filename(),
        "28 Days Later {edition-\"Widescreen DVD\"}.mkv"
    );
    assert_eq!(
        feature.output_directory(dir.path()),
        dir.path().join("output")
    );
}

#[test]
fn scenario_feature_with_trailer_extra() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "movie.mkv");
    touch(dir.path(), "trailer.mkv");
    let config = write_batch(
        dir.path(),
        r#"
movie.mkv:
  title: 28 Days Later
  edition: Widescreen DVD
  extras:
    trailer.mkv:
      type: trailer
"#,
    );

    let entries = resolve_all(&config).unwrap();
    assert_eq!(entries.len(), 2);

    let feature = &entries[0];
    assert_eq!(
        feature.output_directory(dir.path()),
        dir.path().join("output/28 Days Later")
    );

    let extra = &entries[1];
    assert!(extra.is_extra());
    assert_eq!(
        extra.output_directory(dir.path()),
        dir.path().join("output/28 Days Later/Trailers")
    );
    assert_eq!(extra.display_title(), "28 Days Later - trailer");
}

#[test]
fn missing_feature_source_dropped_with_its_extras() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "movie.mkv");
    touch(dir.path(), "ghost-trailer.mkv");
    let config = write_batch(
        dir.path(),
        r#"
ghost.mkv:
  title: Never Ripped
  extras:
    ghost-trailer.mkv:
      type: trailer
movie.mkv:
  title: Present
"#,
    );

    let entries = resolve_all(&config).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].title(), "Present");
}

#[test]
fn missing_extra_dropped_and_feature_lays_flat() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "movie.mkv");
    let config = write_batch(
        dir.path(),
        r#"
movie.mkv:
  title: 28 Days Later
  extras:
    ghost-trailer.mkv:
      type: trailer
"#,
    );

    let entries = resolve_all(&config).unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].role(), &Role::Feature { has_extras: false });
    assert_eq!(
        entries[0].output_directory(dir.path()),
        dir.path().join("output")
    );
}

#[test]
fn entries_flattened_in_declaration_order() {
    let dir = TempDir::new().unwrap();
    for name in ["b.mkv", "b-extra.mkv", "a.mkv"] {
        touch(dir.path(), name);
    }
    let config = write_batch(
        dir.path(),
        r#"
b.mkv:
  extras:
    b-extra.mkv:
      type: interview
a.mkv: {}
"#,
    );

    let entries = resolve_all(&config).unwrap();
    let titles: Vec<&str> = entries.iter().map(|entry| entry.title()).collect();
    assert_eq!(titles, ["b", "b-extra", "a"]);
}

#[test]
fn nested_extras_are_ignored() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "movie.mkv");
    touch(dir.path(), "trailer.mkv");
    touch(dir.path(), "deeper.mkv");
    let config = write_batch(
        dir.path(),
        r#"
movie.mkv:
  extras:
    trailer.mkv:
      type: trailer
      extras:
        deeper.mkv:
          type: bts
"#,
    );

    let entries = resolve_all(&config).unwrap();
    assert_eq!(entries.len(), 2);
    assert!(!entries.iter().any(|entry| entry.title() == "deeper"));
}

#[test]
fn extra_title_derived_from_filename() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "movie.mkv");
    touch(dir.path(), "making-of.mkv");
    let config = write_batch(
        dir.path(),
        r#"
movie.mkv:
  title: 28 Days Later
  extras:
    making-of.mkv:
      type: bts
"#,
    );

    let entries = resolve_all(&config).unwrap();
    let extra = &entries[1];
    assert_eq!(extra.title(), "making-of");
    assert_eq!(
        extra.output_directory(dir.path()),
        dir.path().join("output/28 Days Later/Behind The Scenes")
    );
}

#[test]
fn malformed_config_is_a_descriptive_error() {
    let dir = TempDir::new().unwrap();
    touch(dir.path(), "movie.mkv");
    let config = write_batch(dir.path(), "movie.mkv:\n  audio: not-a-list\n");

    let err = resolve_all(&config).unwrap_err();
    assert!(
        format!("{:#}", err).contains("Failed to parse config file"),
        "unexpected error: {:#}",
        err
    );
}
