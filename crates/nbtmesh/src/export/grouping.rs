//! Partitioning of faces into triangle groups keyed by material and texture.

use std::path::{Component, Path};

use rustc_hash::FxHashMap;

use crate::scene::{Image, Material, MeshData};

/// Faces sharing one (material, texture image) key.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceGroup<'a> {
    pub material_index: usize,
    pub image: Option<&'a Image>,
    /// Face indices in mesh order.
    pub faces: Vec<usize>,
}

/// Groups faces by (material index, bound image), in first-seen key order.
///
/// The image comes from the first UV layer; faces without a UV layer or
/// without a bound image fall in the untextured group of their material.
pub fn group_faces(mesh: &MeshData) -> Vec<FaceGroup<'_>> {
    let uv_layer = mesh.uv_layer();
    let mut groups: Vec<FaceGroup<'_>> = Vec::new();
    let mut index: FxHashMap<(usize, Option<&str>), usize> = FxHashMap::default();

    for (face_index, face) in mesh.faces.iter().enumerate() {
        let image = uv_layer
            .and_then(|layer| layer.faces.get(face_index))
            .and_then(|uv| uv.image.as_ref());
        let key = (face.material_index, image.map(|i| i.name.as_str()));

        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(FaceGroup {
                material_index: face.material_index,
                image,
                faces: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].faces.push(face_index);
    }

    groups
}

/// Merges groups that resolve to the same output name, keeping first-seen order.
///
/// Distinct keys can share a name, e.g. one material in two slots or two image
/// datablocks of the same file. A merged group keeps the material index and
/// image of its first member; its faces are back in mesh order.
pub fn merge_by_name<'a, E>(
    groups: Vec<FaceGroup<'a>>,
    mut name_of: impl FnMut(&FaceGroup<'a>) -> Result<String, E>,
) -> Result<Vec<(String, FaceGroup<'a>)>, E> {
    let mut merged: Vec<(String, FaceGroup<'a>)> = Vec::with_capacity(groups.len());
    let mut index: FxHashMap<String, usize> = FxHashMap::default();
    let mut unsorted = false;

    for group in groups {
        let name = name_of(&group)?;
        match index.get(&name) {
            Some(&slot) => {
                merged[slot].1.faces.extend(group.faces);
                unsorted = true;
            }
            None => {
                index.insert(name.clone(), merged.len());
                merged.push((name, group));
            }
        }
    }

    if unsorted {
        for (_, group) in &mut merged {
            group.faces.sort_unstable();
        }
    }
    Ok(merged)
}

/// Name of a triangle group and of its material entry:
/// the material name, plus ` (<texture path>)` when a texture is bound.
pub fn group_name(material: &Material, image: Option<&Image>, output_dir: &Path) -> String {
    match image {
        Some(image) => format!(
            "{} ({})",
            material.name,
            relative_texture_path(&image.filepath, output_dir)
        ),
        None => material.name.clone(),
    }
}

/// Path of `texture` relative to `base_dir`, with `/` separators.
///
/// Relative inputs are kept as they are. Paths that share no root with
/// `base_dir` (another drive) stay absolute.
pub fn relative_texture_path(texture: &Path, base_dir: &Path) -> String {
    let texture_parts: Vec<Component<'_>> = texture
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if texture.is_relative() {
        return join_slash(&texture_parts);
    }

    let base_parts: Vec<Component<'_>> = base_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let common = texture_parts
        .iter()
        .zip(&base_parts)
        .take_while(|(a, b)| a == b)
        .count();
    if common == 0 {
        return join_slash(&texture_parts);
    }

    let mut parts: Vec<String> = base_parts[common..].iter().map(|_| "..".to_string()).collect();
    parts.extend(
        texture_parts[common..]
            .iter()
            .map(|c| c.as_os_str().to_string_lossy().into_owned()),
    );
    parts.join("/")
}

fn join_slash(parts: &[Component<'_>]) -> String {
    let mut out = String::new();
    for part in parts {
        match part {
            Component::RootDir => out.push('/'),
            Component::Prefix(p) => out.push_str(&p.as_os_str().to_string_lossy()),
            other => {
                if !out.is_empty() && !out.ends_with('/') {
                    out.push('/');
                }
                out.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{Face, FaceUv, UvLayer};
    use std::path::PathBuf;

    fn face(material_index: usize) -> Face {
        Face {
            vertices: vec![0, 1, 2],
            smooth: true,
            material_index,
            normal: [0.0, 0.0, 1.0],
        }
    }

    fn image(name: &str) -> Image {
        Image {
            name: name.to_string(),
            filepath: PathBuf::from(format!("/project/textures/{name}.png")),
        }
    }

    fn uv(image: Option<Image>) -> FaceUv {
        FaceUv {
            uv: vec![[0.0, 0.0]; 3],
            image,
        }
    }

    fn material(name: &str) -> Material {
        Material {
            name: name.to_string(),
            diffuse: [0.8; 3],
            specular: [1.0; 3],
            shininess: 50.0,
        }
    }

    #[test]
    fn test_group_without_uvs() {
        let mesh = MeshData {
            faces: vec![face(0), face(1), face(0)],
            ..Default::default()
        };
        let groups = group_faces(&mesh);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].material_index, 0);
        assert_eq!(groups[0].faces, [0, 2]);
        assert_eq!(groups[1].faces, [1]);
        assert!(groups.iter().all(|g| g.image.is_none()));
    }

    #[test]
    fn test_same_material_and_texture_share_group() {
        let mesh = MeshData {
            faces: vec![face(0), face(0), face(0)],
            uv_layers: vec![UvLayer {
                name: "UVMap".to_string(),
                faces: vec![uv(Some(image("wood"))), uv(None), uv(Some(image("wood")))],
            }],
            ..Default::default()
        };
        let groups = group_faces(&mesh);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].image.map(|i| i.name.as_str()), Some("wood"));
        assert_eq!(groups[0].faces, [0, 2]);
        assert_eq!(groups[1].image, None);
        assert_eq!(groups[1].faces, [1]);
    }

    #[test]
    fn test_first_uv_layer_is_authoritative() {
        let mesh = MeshData {
            faces: vec![face(0), face(0)],
            uv_layers: vec![
                UvLayer {
                    name: "first".to_string(),
                    faces: vec![uv(Some(image("a"))), uv(Some(image("a")))],
                },
                UvLayer {
                    name: "second".to_string(),
                    faces: vec![uv(Some(image("a"))), uv(Some(image("b")))],
                },
            ],
            ..Default::default()
        };
        assert_eq!(group_faces(&mesh).len(), 1);
    }

    #[test]
    fn test_first_seen_order() {
        let mesh = MeshData {
            faces: vec![face(2), face(0), face(2), face(1)],
            ..Default::default()
        };
        let order: Vec<usize> = group_faces(&mesh).iter().map(|g| g.material_index).collect();
        assert_eq!(order, [2, 0, 1]);
    }

    #[test]
    fn test_merge_by_name() {
        let mesh = MeshData {
            faces: vec![face(0), face(1), face(0), face(1), face(2)],
            ..Default::default()
        };
        // slots 0 and 1 hold the same material
        let names = ["Red", "Red", "Blue"];
        let merged = merge_by_name(group_faces(&mesh), |g| {
            Ok::<_, ()>(names[g.material_index].to_string())
        })
        .unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].0, "Red");
        assert_eq!(merged[0].1.material_index, 0);
        assert_eq!(merged[0].1.faces, [0, 1, 2, 3]);
        assert_eq!(merged[1].0, "Blue");
        assert_eq!(merged[1].1.faces, [4]);
    }

    #[test]
    fn test_merge_by_name_propagates_error() {
        let mesh = MeshData {
            faces: vec![face(0), face(1)],
            ..Default::default()
        };
        let result = merge_by_name(group_faces(&mesh), |g| {
            if g.material_index == 1 { Err(g.material_index) } else { Ok("A".to_string()) }
        });
        assert_eq!(result.map(|m| m.len()), Err(1));
    }

    #[test]
    fn test_group_name() {
        let out = Path::new("/project/export");
        assert_eq!(group_name(&material("Wood"), None, out), "Wood");
        assert_eq!(
            group_name(&material("Wood"), Some(&image("oak")), out),
            "Wood (../textures/oak.png)"
        );
    }

    #[test]
    fn test_relative_texture_path() {
        assert_eq!(
            relative_texture_path(Path::new("/a/b/tex.png"), Path::new("/a/b")),
            "tex.png"
        );
        assert_eq!(
            relative_texture_path(Path::new("/a/b/img/tex.png"), Path::new("/a/b")),
            "img/tex.png"
        );
        assert_eq!(
            relative_texture_path(Path::new("/a/tex.png"), Path::new("/a/b/c")),
            "../../tex.png"
        );
        assert_eq!(
            relative_texture_path(Path::new("./img/tex.png"), Path::new("/a")),
            "img/tex.png"
        );
    }
}
