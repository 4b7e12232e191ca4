//! Scene export: host scene in, compressed tag tree out.
//!
//! The pipeline per mesh object:
//! 1. evaluate the mesh through the [`SceneHost`]
//! 2. flatten vertices and normals ([`geometry`])
//! 3. group faces by material and texture and triangulate them ([`grouping`])
//! 4. bake declared actions frame by frame ([`animation`])
//!
//! The finished tree is validated, encoded and written in one go.

pub mod animation;
pub mod geometry;
pub mod grouping;

use std::path::Path;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::codec::{EncodeOptions, write_root};
use crate::error::ExportError;
use crate::limits::{
    ACTIONS, DEFAULT_COMPRESSION_LEVEL, DIFFUSE, FRAMES, MATERIALS, MESHES, ROOT_NAME, SHININESS,
    SPECULAR, TEXTURE, TEXTURE_COORDINATES, TRIANGLE_GROUPS, VERTEX_NORMALS, VERTICES,
};
use crate::model::{Compound, CompoundBuilder, List};
use crate::scene::{Image, Material, MeshData, ObjectKind, SceneHost, SceneObject};
use crate::validate::validate_tree;

use self::animation::{ActionBounds, BakedAction, bake_action, collect_action_bounds};
use self::geometry::{GeometryAccumulator, GroupIndices};
use self::grouping::{group_faces, group_name, merge_by_name, relative_texture_path};

/// Export options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// gzip level, 0 (store) to 9 (best).
    pub compression_level: u32,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl ExportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    fn encode_options(&self) -> EncodeOptions {
        EncodeOptions::new().compression_level(self.compression_level)
    }
}

/// What an export produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    pub meshes: usize,
    pub skipped_objects: usize,
    pub triangle_groups: usize,
    pub materials: usize,
    pub actions: usize,
    pub frames: usize,
    /// Compressed size; zero until the file is written.
    pub bytes_written: usize,
}

/// Exports every mesh object of `host` to `path`.
///
/// Any error aborts the export; the output file is only created once the
/// complete tree has been built and encoded.
pub fn export_scene<H: SceneHost>(
    host: &mut H,
    path: &Path,
    options: &ExportOptions,
) -> Result<ExportSummary, ExportError> {
    let output_dir = output_dir(path);
    let (root, mut summary) = build_scene_tree(host, &output_dir)?;

    validate_tree(&root)?;
    summary.bytes_written = write_root(path, ROOT_NAME, &root, options.encode_options())?;

    tracing::info!(
        "Exported {} meshes, {} materials, {} actions ({} frames) to {:?} ({} bytes)",
        summary.meshes,
        summary.materials,
        summary.actions,
        summary.frames,
        path,
        summary.bytes_written
    );
    Ok(summary)
}

/// Absolute directory of the output file; texture paths are made relative to it.
fn output_dir(path: &Path) -> std::path::PathBuf {
    let dir = path.parent().unwrap_or_else(|| Path::new(""));
    std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf())
}

/// Builds the root compound (`Meshes`, `Materials`) without writing it.
pub fn build_scene_tree<H: SceneHost>(
    host: &mut H,
    output_dir: &Path,
) -> Result<(Compound, ExportSummary), ExportError> {
    let mut summary = ExportSummary::default();
    let mut meshes = Compound::new();
    let mut materials = MaterialTable::default();
    let mut sources: FxHashMap<String, NameSource> = FxHashMap::default();

    for object in host.objects() {
        if object.kind != ObjectKind::Mesh {
            tracing::debug!("Skipping non-mesh object {:?}", object.name);
            summary.skipped_objects += 1;
            continue;
        }

        match export_mesh(host, &object, output_dir, &mut materials, &sources)? {
            Some(exported) => {
                sources.insert(exported.name.clone(), exported.source);
                summary.meshes += 1;
                summary.triangle_groups += exported.triangle_groups;
                summary.actions += exported.actions;
                summary.frames += exported.frames;
                meshes.insert(exported.name, exported.compound)?;
            }
            None => summary.skipped_objects += 1,
        }
    }

    summary.materials = materials.len();
    let mut root = Compound::new();
    root.insert(MESHES, meshes)?;
    root.insert(MATERIALS, materials.into_compound())?;
    Ok((root, summary))
}

/// Where the exported name of a mesh came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NameSource {
    /// The mesh datablock identifier; equal names mean shared mesh data.
    MeshData,
    /// The object name, used when the mesh has no identifier.
    Object,
}

struct ExportedMesh {
    name: String,
    source: NameSource,
    compound: Compound,
    triangle_groups: usize,
    actions: usize,
    frames: usize,
}

/// Static part of a mesh, detached from the host snapshot it came from.
struct StaticMesh {
    name: String,
    compound: Compound,
    triangle_groups: usize,
    vertex_count: usize,
    flat_faces: Vec<usize>,
    actions: Vec<ActionBounds>,
}

fn export_mesh<H: SceneHost>(
    host: &mut H,
    object: &SceneObject,
    output_dir: &Path,
    materials: &mut MaterialTable,
    exported: &FxHashMap<String, NameSource>,
) -> Result<Option<ExportedMesh>, ExportError> {
    let snapshot = host.evaluate_mesh(object)?;
    let mesh = snapshot.as_ref();
    let (name, source) = if mesh.name.is_empty() {
        (object.name.clone(), NameSource::Object)
    } else {
        (mesh.name.clone(), NameSource::MeshData)
    };
    match exported.get(&name) {
        Some(NameSource::MeshData) if source == NameSource::MeshData => {
            tracing::warn!(
                "Object {:?} shares mesh {:?} with an exported object, skipping",
                object.name,
                name
            );
            return Ok(None);
        }
        Some(_) => {
            return Err(ExportError::MeshNameCollision {
                object: object.name.clone(),
                name,
            });
        }
        None => {}
    }

    let static_mesh = build_static_mesh(name, mesh, output_dir, materials)?;
    drop(snapshot);

    let StaticMesh {
        name,
        mut compound,
        triangle_groups,
        vertex_count,
        flat_faces,
        actions,
    } = static_mesh;

    let mut frames = 0;
    if !actions.is_empty() {
        let mut baked = Vec::with_capacity(actions.len());
        for bounds in &actions {
            let action = bake_action(host, object, &name, vertex_count, bounds, &flat_faces)?;
            frames += action.frames.len();
            baked.push(action);
        }
        compound.insert(ACTIONS, actions_compound(baked)?)?;
    }

    tracing::info!(
        "Mesh {:?}: {} vertices, {} triangle groups, {} actions",
        name,
        vertex_count,
        triangle_groups,
        actions.len()
    );

    Ok(Some(ExportedMesh {
        name,
        source,
        compound,
        triangle_groups,
        actions: actions.len(),
        frames,
    }))
}

fn build_static_mesh(
    name: String,
    mesh: &MeshData,
    output_dir: &Path,
    materials: &mut MaterialTable,
) -> Result<StaticMesh, ExportError> {
    let actions = collect_action_bounds(&name, &mesh.properties)?;
    let uv_layer = mesh.uv_layer();
    let mut geometry = GeometryAccumulator::from_vertices(&mesh.vertices);
    let mut triangle_groups = Compound::new();

    let groups = merge_by_name(group_faces(mesh), |group| -> Result<String, ExportError> {
        let material = resolve_material(&name, mesh, group.material_index, group.faces[0])?;
        Ok(group_name(material, group.image, output_dir))
    })?;

    for (group_name, group) in groups {
        let material = resolve_material(&name, mesh, group.material_index, group.faces[0])?;

        let mut indices = GroupIndices::new(uv_layer.is_some());
        for &face_index in &group.faces {
            let uv = uv_layer.and_then(|layer| layer.faces.get(face_index));
            geometry.push_face(&name, face_index, &mesh.faces[face_index], uv, &mut indices)?;
        }
        tracing::debug!(
            "Mesh {:?} group {:?}: {} faces, {} triangles",
            name,
            group_name,
            group.faces.len(),
            indices.triangle_count()
        );

        materials.add(&group_name, material, group.image, output_dir)?;
        triangle_groups.insert(group_name, group_compound(indices)?)?;
    }

    let triangle_group_count = triangle_groups.len();
    let flat_faces = geometry.flat_faces().to_vec();
    let GeometryAccumulator {
        positions,
        normals,
        tex_coords,
        ..
    } = geometry;

    let compound = CompoundBuilder::new()
        .float_list(VERTICES, positions)
        .float_list(VERTEX_NORMALS, normals)
        .float_list(TEXTURE_COORDINATES, tex_coords)
        .tag(TRIANGLE_GROUPS, triangle_groups)
        .build()?;

    Ok(StaticMesh {
        name,
        compound,
        triangle_groups: triangle_group_count,
        vertex_count: mesh.vertices.len(),
        flat_faces,
        actions,
    })
}

/// Material of a slot. Meshes without any slot use [`Material::fallback`].
fn resolve_material<'a>(
    mesh_name: &str,
    mesh: &'a MeshData,
    index: usize,
    face: usize,
) -> Result<&'a Material, ExportError> {
    if mesh.materials.is_empty() {
        return Ok(Material::fallback());
    }
    mesh.materials
        .get(index)
        .ok_or_else(|| ExportError::MaterialOutOfRange {
            mesh: mesh_name.to_string(),
            face,
            index,
            count: mesh.materials.len(),
        })
}

fn group_compound(indices: GroupIndices) -> Result<Compound, ExportError> {
    let GroupIndices {
        vertices,
        normals,
        tex_coords,
    } = indices;
    let mut builder = CompoundBuilder::new()
        .int_list(VERTICES, vertices)
        .int_list(VERTEX_NORMALS, normals);
    if let Some(tex_coords) = tex_coords {
        builder = builder.int_list(TEXTURE_COORDINATES, tex_coords);
    }
    Ok(builder.build()?)
}

fn actions_compound(actions: Vec<BakedAction>) -> Result<Compound, ExportError> {
    let mut compound = Compound::new();
    for action in actions {
        let frames = action
            .frames
            .into_iter()
            .map(|frame| {
                CompoundBuilder::new()
                    .float_list(VERTICES, frame.vertices)
                    .float_list(VERTEX_NORMALS, frame.normals)
                    .build()
            })
            .collect::<Result<Vec<_>, _>>()?;
        let action_compound = CompoundBuilder::new()
            .tag(FRAMES, List::compounds(frames))
            .build()?;
        compound.insert(action.name, action_compound)?;
    }
    Ok(compound)
}

/// Materials referenced by exported groups, unique by output name, first seen first.
#[derive(Default)]
struct MaterialTable {
    names: FxHashSet<String>,
    compound: Compound,
}

impl MaterialTable {
    fn add(
        &mut self,
        name: &str,
        material: &Material,
        image: Option<&Image>,
        output_dir: &Path,
    ) -> Result<(), ExportError> {
        if !self.names.insert(name.to_string()) {
            return Ok(());
        }
        let mut builder = CompoundBuilder::new()
            .float_list(DIFFUSE, material.diffuse)
            .float_list(SPECULAR, material.specular)
            .float(SHININESS, material.shininess);
        if let Some(image) = image {
            builder = builder.string(TEXTURE, relative_texture_path(&image.filepath, output_dir));
        }
        self.compound.insert(name, builder.build()?)?;
        Ok(())
    }

    fn len(&self) -> usize {
        self.compound.len()
    }

    fn into_compound(self) -> Compound {
        self.compound
    }
}
