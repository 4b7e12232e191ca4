//! A scene host backed by plain data, typically a JSON dump of a host scene.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::scene::{MeshData, ObjectKind, SceneHost, SceneObject, Vertex};

/// Per-frame override of an object's deforming data.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameDump {
    /// Replaces every vertex of the static mesh.
    pub vertices: Vec<Vertex>,
    /// Replaces face normals by face index; empty keeps the static normals.
    #[serde(default)]
    pub face_normals: Vec<[f32; 3]>,
}

/// One object of a dumped scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDump {
    pub name: String,
    #[serde(default)]
    pub kind: ObjectKind,
    /// Evaluated mesh at the current frame. Required for mesh objects.
    #[serde(default)]
    pub mesh: Option<MeshData>,
    /// Sampled frames. Frames without an entry evaluate to the static mesh.
    #[serde(default)]
    pub frames: BTreeMap<i32, FrameDump>,
}

impl ObjectDump {
    /// A mesh object without animation samples.
    pub fn mesh(name: impl Into<String>, mesh: MeshData) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Mesh,
            mesh: Some(mesh),
            frames: BTreeMap::new(),
        }
    }

    /// A non-mesh object.
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ObjectKind::Other,
            mesh: None,
            frames: BTreeMap::new(),
        }
    }

    /// Adds a frame sample.
    pub fn with_frame(mut self, frame: i32, sample: FrameDump) -> Self {
        self.frames.insert(frame, sample);
        self
    }
}

/// In-memory [`SceneHost`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InMemoryScene {
    pub objects: Vec<ObjectDump>,
}

impl InMemoryScene {
    pub fn new(objects: Vec<ObjectDump>) -> Self {
        Self { objects }
    }

    fn find(&self, object: &SceneObject) -> Result<&ObjectDump, HostError> {
        self.objects
            .iter()
            .find(|o| o.name == object.name)
            .ok_or_else(|| HostError::new(&object.name, "no such object"))
    }

    fn static_mesh<'a>(&self, dump: &'a ObjectDump) -> Result<&'a MeshData, HostError> {
        match (dump.kind, &dump.mesh) {
            (ObjectKind::Mesh, Some(mesh)) => Ok(mesh),
            (ObjectKind::Mesh, None) => Err(HostError::new(&dump.name, "mesh object has no mesh data")),
            (ObjectKind::Other, _) => Err(HostError::new(&dump.name, "object is not a mesh")),
        }
    }
}

impl SceneHost for InMemoryScene {
    type Mesh = MeshData;

    fn objects(&self) -> Vec<SceneObject> {
        self.objects
            .iter()
            .map(|o| SceneObject {
                name: o.name.clone(),
                kind: o.kind,
            })
            .collect()
    }

    fn evaluate_mesh(&mut self, object: &SceneObject) -> Result<MeshData, HostError> {
        let dump = self.find(object)?;
        self.static_mesh(dump).cloned()
    }

    fn evaluate_mesh_at(&mut self, object: &SceneObject, frame: i32) -> Result<MeshData, HostError> {
        let dump = self.find(object)?;
        let mut mesh = self.static_mesh(dump)?.clone();
        let Some(sample) = dump.frames.get(&frame) else {
            return Ok(mesh);
        };

        if sample.vertices.len() != mesh.vertices.len() {
            return Err(HostError::new(
                &dump.name,
                format!(
                    "frame {frame} has {} vertices, mesh has {}",
                    sample.vertices.len(),
                    mesh.vertices.len()
                ),
            ));
        }
        mesh.vertices.clone_from(&sample.vertices);

        if !sample.face_normals.is_empty() {
            if sample.face_normals.len() != mesh.faces.len() {
                return Err(HostError::new(
                    &dump.name,
                    format!(
                        "frame {frame} has {} face normals, mesh has {} faces",
                        sample.face_normals.len(),
                        mesh.faces.len()
                    ),
                ));
            }
            for (face, normal) in mesh.faces.iter_mut().zip(&sample.face_normals) {
                face.normal = *normal;
            }
        }
        Ok(mesh)
    }
}
