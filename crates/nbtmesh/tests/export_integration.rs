//! Integration tests for nbtmesh
//!
//! Tests the full pipeline: scene dump -> export -> inspect compressed output

use nbtmesh::codec::decompress;
use nbtmesh::{ExportError, ExportOptions, InMemoryScene, export_scene};
use tempfile::tempdir;

const SCENE_JSON: &str = r#"{
    "objects": [
        { "name": "Camera", "kind": "other" },
        {
            "name": "Cube",
            "mesh": {
                "name": "CubeMesh",
                "vertices": [
                    { "position": [-1, -1, 0], "normal": [0, 0, 1] },
                    { "position": [ 1, -1, 0], "normal": [0, 0, 1] },
                    { "position": [ 1,  1, 0], "normal": [0, 0, 1] },
                    { "position": [-1,  1, 0], "normal": [0, 0, 1] }
                ],
                "faces": [
                    { "vertices": [0, 1, 2, 3], "smooth": false, "normal": [0, 0, 1] }
                ],
                "materials": [
                    { "name": "Grey", "diffuse": [0.5, 0.5, 0.5], "specular": [1, 1, 1], "shininess": 12 }
                ],
                "properties": [ ["AnimStart:Spin", 1], ["AnimStop:Spin", 4] ]
            }
        }
    ]
}"#;

/// Expected start of the uncompressed stream: root compound header, then the
/// `Meshes` compound header.
fn expected_prefix() -> Vec<u8> {
    let mut prefix = vec![10, 0, 5];
    prefix.extend_from_slice(b"Scene");
    prefix.extend_from_slice(&[10, 0, 6]);
    prefix.extend_from_slice(b"Meshes");
    prefix
}

#[test]
fn test_export_json_scene() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("cube.nbtmesh");

    let mut scene: InMemoryScene = serde_json::from_str(SCENE_JSON).expect("Invalid scene JSON");
    let summary = export_scene(&mut scene, &path, &ExportOptions::new()).expect("Export failed");

    assert_eq!(summary.meshes, 1);
    assert_eq!(summary.skipped_objects, 1);
    assert_eq!(summary.materials, 1);
    assert_eq!(summary.actions, 1);
    assert_eq!(summary.frames, 3);

    let data = std::fs::read(&path).expect("Failed to read output");
    assert_eq!(&data[0..2], &[0x1f, 0x8b], "output should be gzip");

    let raw = decompress(&data).expect("Failed to decompress");
    assert!(raw.starts_with(&expected_prefix()));
    assert_eq!(raw.last(), Some(&0), "root compound must be terminated");

    // mesh and material names appear as length-prefixed strings
    let contains = |needle: &[u8]| raw.windows(needle.len()).any(|w| w == needle);
    assert!(contains(b"\x00\x08CubeMesh"));
    assert!(contains(b"\x00\x04Grey"));
    assert!(contains(b"\x00\x04Spin"));
}

#[test]
fn test_uncompressed_level_still_gzip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("cube.nbtmesh");

    let mut scene: InMemoryScene = serde_json::from_str(SCENE_JSON).expect("Invalid scene JSON");
    export_scene(&mut scene, &path, &ExportOptions::new().compression_level(0))
        .expect("Export failed");

    let data = std::fs::read(&path).expect("Failed to read output");
    let raw = decompress(&data).expect("Failed to decompress");
    assert!(raw.starts_with(&expected_prefix()));
}

#[test]
fn test_unwritable_path_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("no-such-dir").join("cube.nbtmesh");

    let mut scene: InMemoryScene = serde_json::from_str(SCENE_JSON).expect("Invalid scene JSON");
    let result = export_scene(&mut scene, &path, &ExportOptions::new());
    assert!(matches!(result, Err(ExportError::Encode(_))));
}
