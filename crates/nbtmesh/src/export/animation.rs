//! Baking of per-frame vertex animation.
//!
//! Actions are declared on the mesh through custom properties:
//! `AnimStart:<name>` and `AnimStop:<name>` hold the first frame and the
//! exclusive end frame of the action `<name>`.

use rustc_hash::FxHashMap;

use crate::error::ExportError;
use crate::export::geometry::{convert_coords, flatten_vertices};
use crate::limits::{ANIM_START_PREFIX, ANIM_STOP_PREFIX, MAX_PREALLOCATED_FRAMES};
use crate::scene::{MeshData, SceneHost, SceneObject};

/// Frame range of one action: `start..stop`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionBounds {
    pub name: String,
    pub start: i32,
    pub stop: i32,
}

impl ActionBounds {
    pub fn frame_count(&self) -> usize {
        (i64::from(self.stop) - i64::from(self.start)).max(0) as usize
    }
}

/// Vertex and normal arrays of one frame, in the exported axis convention.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameSnapshot {
    pub vertices: Vec<f32>,
    /// Vertex normals followed by one normal per flat face.
    pub normals: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BakedAction {
    pub name: String,
    pub frames: Vec<FrameSnapshot>,
}

/// Reads action bounds from custom mesh properties, in first-seen order.
///
/// Property values are truncated to whole frames. An action with only one
/// bound, or one that stops before it starts, is an error.
pub fn collect_action_bounds(
    mesh: &str,
    properties: &[(String, f64)],
) -> Result<Vec<ActionBounds>, ExportError> {
    let mut found: Vec<(String, Option<i32>, Option<i32>)> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for (key, value) in properties {
        let (name, is_start) = if let Some(name) = key.strip_prefix(ANIM_START_PREFIX) {
            (name, true)
        } else if let Some(name) = key.strip_prefix(ANIM_STOP_PREFIX) {
            (name, false)
        } else {
            continue;
        };

        let slot = *index.entry(name.to_string()).or_insert_with(|| {
            found.push((name.to_string(), None, None));
            found.len() - 1
        });
        let frame = *value as i32;
        if is_start {
            found[slot].1 = Some(frame);
        } else {
            found[slot].2 = Some(frame);
        }
    }

    found
        .into_iter()
        .map(|(name, start, stop)| match (start, stop) {
            (Some(start), Some(stop)) if start > stop => Err(ExportError::InvalidActionRange {
                mesh: mesh.to_string(),
                action: name,
                start,
                stop,
            }),
            (Some(start), Some(stop)) => Ok(ActionBounds { name, start, stop }),
            (None, _) => Err(ExportError::IncompleteActionBounds {
                mesh: mesh.to_string(),
                action: name,
                missing: "start",
            }),
            (_, None) => Err(ExportError::IncompleteActionBounds {
                mesh: mesh.to_string(),
                action: name,
                missing: "stop",
            }),
        })
        .collect()
}

/// Extracts one frame from an evaluated mesh.
///
/// `flat_faces` lists the flat faces in the order the static pass appended
/// their normals, so frame normal indices line up with the static ones.
pub fn extract_frame(
    mesh_name: &str,
    frame: i32,
    mesh: &MeshData,
    static_vertex_count: usize,
    flat_faces: &[usize],
) -> Result<FrameSnapshot, ExportError> {
    if mesh.vertices.len() != static_vertex_count {
        return Err(ExportError::FrameTopologyChanged {
            mesh: mesh_name.to_string(),
            frame,
            what: "vertices",
            expected: static_vertex_count,
            actual: mesh.vertices.len(),
        });
    }

    let (vertices, mut normals) = flatten_vertices(&mesh.vertices);
    normals.reserve(flat_faces.len() * 3);
    for &face_index in flat_faces {
        let face = mesh
            .faces
            .get(face_index)
            .ok_or_else(|| ExportError::FrameTopologyChanged {
                mesh: mesh_name.to_string(),
                frame,
                what: "faces",
                expected: face_index + 1,
                actual: mesh.faces.len(),
            })?;
        normals.extend(convert_coords(face.normal));
    }

    Ok(FrameSnapshot { vertices, normals })
}

/// Bakes every frame of `bounds`.
///
/// Each frame's snapshot is released as soon as its data has been copied,
/// before the next frame is evaluated.
pub fn bake_action<H: SceneHost>(
    host: &mut H,
    object: &SceneObject,
    mesh_name: &str,
    static_vertex_count: usize,
    bounds: &ActionBounds,
    flat_faces: &[usize],
) -> Result<BakedAction, ExportError> {
    let mut frames = Vec::with_capacity(bounds.frame_count().min(MAX_PREALLOCATED_FRAMES));
    for frame in bounds.start..bounds.stop {
        let snapshot = host.evaluate_mesh_at(object, frame)?;
        let extracted = extract_frame(
            mesh_name,
            frame,
            snapshot.as_ref(),
            static_vertex_count,
            flat_faces,
        );
        drop(snapshot);
        frames.push(extracted?);
    }

    tracing::debug!(
        "Baked action {:?} of {:?}: frames {}..{}",
        bounds.name,
        mesh_name,
        bounds.start,
        bounds.stop
    );

    Ok(BakedAction {
        name: bounds.name.clone(),
        frames,
    })
}
