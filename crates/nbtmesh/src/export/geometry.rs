//! Flattening of mesh geometry into the exported arrays.
//!
//! Positions and normals are stored as flat `x, y, z` float triples in the
//! target axis convention, texture coordinates as flat `u, v` pairs. Faces are
//! triangulated and turned into index lists per triangle group.

use crate::error::ExportError;
use crate::scene::{Face, FaceUv, Vertex};

/// Maps a host vector to the exported axis convention: `(x, y, z) -> (x, z, -y)`.
#[inline]
pub fn convert_coords(v: [f32; 3]) -> [f32; 3] {
    [v[0], v[2], -v[1]]
}

/// Corner triples of the triangles a face is split into.
///
/// Quads are cut along the 0-2 diagonal. Corners shared by both halves are
/// emitted twice, including their texture coordinates.
pub fn triangulate(corner_count: usize) -> Option<&'static [[usize; 3]]> {
    const TRIANGLE: &[[usize; 3]] = &[[0, 1, 2]];
    const QUAD: &[[usize; 3]] = &[[0, 1, 2], [2, 3, 0]];
    match corner_count {
        3 => Some(TRIANGLE),
        4 => Some(QUAD),
        _ => None,
    }
}

/// Index lists of one triangle group, parallel per triangle corner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupIndices {
    pub vertices: Vec<i32>,
    pub normals: Vec<i32>,
    /// Present only when the mesh has a UV layer.
    pub tex_coords: Option<Vec<i32>>,
}

impl GroupIndices {
    pub fn new(with_tex_coords: bool) -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            tex_coords: with_tex_coords.then(Vec::new),
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }
}

/// Mesh-level flat arrays, grown while faces are pushed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometryAccumulator {
    pub positions: Vec<f32>,
    pub normals: Vec<f32>,
    pub tex_coords: Vec<f32>,
    /// Flat faces in the order their extra normal was appended.
    flat_faces: Vec<usize>,
}

impl GeometryAccumulator {
    /// Starts from the per-vertex positions and normals, in vertex order.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let (positions, normals) = flatten_vertices(vertices);
        Self {
            positions,
            normals,
            tex_coords: Vec::new(),
            flat_faces: Vec::new(),
        }
    }

    /// Number of entries (triples) in the normal array.
    pub fn normal_count(&self) -> usize {
        self.normals.len() / 3
    }

    pub fn flat_faces(&self) -> &[usize] {
        &self.flat_faces
    }

    /// Triangulates one face into `out`.
    ///
    /// Smooth corners reference their own vertex normal. A flat face appends
    /// its face normal once and every corner references that entry. With a UV
    /// layer each emitted corner appends a fresh (u, v) pair.
    pub fn push_face(
        &mut self,
        mesh: &str,
        face_index: usize,
        face: &Face,
        uv: Option<&FaceUv>,
        out: &mut GroupIndices,
    ) -> Result<(), ExportError> {
        let corners = face.vertices.len();
        let triangles = triangulate(corners).ok_or_else(|| ExportError::UnsupportedFace {
            mesh: mesh.to_string(),
            face: face_index,
            corners,
        })?;
        let uv = match (uv, out.tex_coords.is_some()) {
            (Some(uv), true) if uv.uv.len() >= corners => Some(uv),
            (_, true) => {
                return Err(ExportError::MissingFaceUv {
                    mesh: mesh.to_string(),
                    face: face_index,
                });
            }
            (_, false) => None,
        };

        let flat_normal = if face.smooth {
            None
        } else {
            self.normals.extend(convert_coords(face.normal));
            self.flat_faces.push(face_index);
            Some(self.normal_count() as i32 - 1)
        };

        for triangle in triangles {
            for &corner in triangle {
                let vertex = face.vertices[corner] as i32;
                out.vertices.push(vertex);
                out.normals.push(flat_normal.unwrap_or(vertex));

                if let (Some(uv), Some(indices)) = (uv, out.tex_coords.as_mut()) {
                    self.tex_coords.extend(uv.uv[corner]);
                    indices.push((self.tex_coords.len() / 2) as i32 - 1);
                }
            }
        }
        Ok(())
    }
}

/// Flattens vertex positions and normals, remapping axes.
pub fn flatten_vertices(vertices: &[Vertex]) -> (Vec<f32>, Vec<f32>) {
    let mut positions = Vec::with_capacity(vertices.len() * 3);
    let mut normals = Vec::with_capacity(vertices.len() * 3);
    for v in vertices {
        positions.extend(convert_coords(v.position));
        normals.extend(convert_coords(v.normal));
    }
    (positions, normals)
}
