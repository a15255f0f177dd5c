//! Integration tests for filesystem frame loading.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;

use vigil_adapters::FsFrameSource;
use vigil_core::FrameSource;

/// Writes a small solid-gray PNG frame.
fn write_frame(path: &Path, width: u32, height: u32) {
    let img = image::GrayImage::from_fn(width, height, |_, _| image::Luma([128u8]));
    img.save(path).expect("save frame");
}

#[test]
fn test_load_single_frame() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("frame_000.png");
    write_frame(&path, 8, 8);

    let source = FsFrameSource::new(vec![path], false);
    let frames: Vec<_> = source.frames().collect();

    assert_eq!(frames.len(), 1);
    let frame = frames.into_iter().next().unwrap().expect("should load PNG");
    assert_eq!(frame.width, 8);
    assert_eq!(frame.height, 8);
    assert!(frame.source.ends_with("frame_000.png"));
}

#[test]
fn test_directory_replays_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["frame_002.png", "frame_000.png", "frame_001.png"] {
        write_frame(&dir.path().join(name), 4, 4);
    }

    let source = FsFrameSource::new(vec![dir.path().to_path_buf()], false);
    let sources: Vec<_> = source
        .frames()
        .map(|f| f.expect("should load").source)
        .collect();

    assert_eq!(sources.len(), 3);
    assert!(sources[0].ends_with("frame_000.png"));
    assert!(sources[1].ends_with("frame_001.png"));
    assert!(sources[2].ends_with("frame_002.png"));
}

#[test]
fn test_recursion_flag() {
    let dir = tempfile::tempdir().unwrap();
    let sub = dir.path().join("session2");
    fs::create_dir(&sub).unwrap();
    write_frame(&dir.path().join("top.png"), 4, 4);
    write_frame(&sub.join("nested.png"), 4, 4);

    let flat = FsFrameSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(flat.count_hint(), Some(1));

    let recursive = FsFrameSource::new(vec![dir.path().to_path_buf()], true);
    assert_eq!(recursive.count_hint(), Some(2));
}

#[test]
fn test_unsupported_files_are_ignored_in_directories() {
    let dir = tempfile::tempdir().unwrap();
    write_frame(&dir.path().join("frame.png"), 4, 4);
    fs::write(dir.path().join("trace.jsonl"), "{}\n").unwrap();

    let source = FsFrameSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(1));
}

#[test]
fn test_corrupt_frame_is_a_per_item_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    fs::write(&path, b"not a png").unwrap();

    let source = FsFrameSource::new(vec![path], false);
    let frames: Vec<_> = source.frames().collect();

    assert_eq!(frames.len(), 1);
    assert!(frames[0].is_err());
}

#[test]
fn test_missing_path_yields_no_frames() {
    let source = FsFrameSource::new(vec!["/nonexistent/frames".into()], false);
    assert_eq!(source.count_hint(), Some(0));
    assert_eq!(source.frames().count(), 0);
}
