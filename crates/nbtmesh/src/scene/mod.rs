//! Interfaces to the authoring host that owns the scene.
//!
//! The exporter never touches host state directly. It asks a [`SceneHost`]
//! for the objects to export and for evaluated mesh snapshots, either at the
//! current frame or at an explicit frame. A snapshot is owned by the caller;
//! dropping it releases whatever the host allocated for it.

pub mod memory;

use std::path::PathBuf;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::error::HostError;

pub use memory::{InMemoryScene, ObjectDump};

/// A mesh vertex in host coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// A polygon of the evaluated mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Face {
    /// Vertex indices, 3 (triangle) or 4 (quad).
    pub vertices: Vec<u32>,
    /// Smooth faces share vertex normals; flat faces use `normal`.
    #[serde(default)]
    pub smooth: bool,
    /// Index into [`MeshData::materials`].
    #[serde(default)]
    pub material_index: usize,
    /// Face normal in host coordinates.
    pub normal: [f32; 3],
}

/// An image bound to faces through a UV layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Image {
    /// Host datablock name; identifies the image.
    pub name: String,
    /// Resolved file path of the image.
    pub filepath: PathBuf,
}

/// Per-face data of a UV layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceUv {
    /// One (u, v) pair per face corner.
    pub uv: Vec<[f32; 2]>,
    #[serde(default)]
    pub image: Option<Image>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UvLayer {
    pub name: String,
    /// Indexed like [`MeshData::faces`].
    pub faces: Vec<FaceUv>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub name: String,
    pub diffuse: [f32; 3],
    pub specular: [f32; 3],
    /// Specular hardness.
    pub shininess: f32,
}

lazy_static! {
    static ref FALLBACK_MATERIAL: Material = Material {
        name: "Material".to_string(),
        diffuse: [0.8, 0.8, 0.8],
        specular: [1.0, 1.0, 1.0],
        shininess: 50.0,
    };
}

impl Material {
    /// Host default material, used for meshes without material slots.
    pub fn fallback() -> &'static Material {
        &FALLBACK_MATERIAL
    }
}

/// An evaluated mesh (modifiers applied).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MeshData {
    /// Mesh datablock identifier.
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
    #[serde(default)]
    pub uv_layers: Vec<UvLayer>,
    /// Material slots.
    #[serde(default)]
    pub materials: Vec<Material>,
    /// Custom numeric properties, in host order.
    #[serde(default)]
    pub properties: Vec<(String, f64)>,
}

impl MeshData {
    /// The authoritative UV layer: the first one.
    pub fn uv_layer(&self) -> Option<&UvLayer> {
        self.uv_layers.first()
    }
}

impl AsRef<MeshData> for MeshData {
    fn as_ref(&self) -> &MeshData {
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    #[default]
    Mesh,
    /// Cameras, lights, empties and anything else without renderable geometry.
    Other,
}

/// An object as enumerated by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneObject {
    pub name: String,
    pub kind: ObjectKind,
}

/// The host environment the exporter reads from.
pub trait SceneHost {
    /// Evaluated mesh snapshot. Dropping it releases the host allocation.
    type Mesh: AsRef<MeshData>;

    /// All objects, in host enumeration order.
    fn objects(&self) -> Vec<SceneObject>;

    /// Evaluates a mesh object at the current frame.
    fn evaluate_mesh(&mut self, object: &SceneObject) -> Result<Self::Mesh, HostError>;

    /// Evaluates a mesh object at `frame`.
    fn evaluate_mesh_at(
        &mut self,
        object: &SceneObject,
        frame: i32,
    ) -> Result<Self::Mesh, HostError>;
}
