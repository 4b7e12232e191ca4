//! NBTMesh: scene export to a compressed named-binary-tag tree.
//!
//! This crate converts the meshes, materials and vertex animation of a 3D
//! scene into a single gzip-compressed file of typed, named tags.
//!
//! # Overview
//!
//! The output is a self-describing tree:
//! - **Tags**: typed scalars, strings, byte arrays, homogeneous lists and
//!   compounds of named children
//! - **Big-endian**: every scalar has a fixed width and byte order
//! - **One file**: the whole tree is wrapped in a gzip stream
//!
//! # Quick Start
//!
//! ```rust
//! use nbtmesh::scene::{Face, InMemoryScene, Material, MeshData, ObjectDump, Vertex};
//! use nbtmesh::build_scene_tree;
//! use std::path::Path;
//!
//! let vertex = |x, y| Vertex { position: [x, y, 0.0], normal: [0.0, 0.0, 1.0] };
//! let mesh = MeshData {
//!     name: "Triangle".to_string(),
//!     vertices: vec![vertex(0.0, 0.0), vertex(1.0, 0.0), vertex(0.0, 1.0)],
//!     faces: vec![Face { vertices: vec![0, 1, 2], smooth: true, material_index: 0, normal: [0.0, 0.0, 1.0] }],
//!     materials: vec![Material { name: "Red".to_string(), diffuse: [1.0, 0.0, 0.0], specular: [1.0; 3], shininess: 50.0 }],
//!     ..Default::default()
//! };
//!
//! let mut scene = InMemoryScene::new(vec![ObjectDump::mesh("Triangle", mesh)]);
//! let (root, summary) = build_scene_tree(&mut scene, Path::new("/tmp")).unwrap();
//!
//! assert_eq!(summary.meshes, 1);
//! assert!(root.get_compound("Meshes").unwrap().contains("Triangle"));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Tag tree types and builders
//! - [`codec`]: Binary encoding and the gzip container
//! - [`validate`]: Structural validation of trees
//! - [`scene`]: Interfaces to the authoring host
//! - [`export`]: Geometry, grouping, animation baking and assembly
//! - [`error`]: Error types
//! - [`limits`]: Format constants

pub mod codec;
pub mod error;
pub mod export;
pub mod limits;
pub mod model;
pub mod scene;
pub mod validate;

// Re-export commonly used types at crate root
pub use codec::{EncodeOptions, encode_root, encode_root_compressed, write_root};
pub use error::{EncodeError, ExportError, HostError, TagError};
pub use export::{ExportOptions, ExportSummary, build_scene_tree, export_scene};
pub use model::{Compound, CompoundBuilder, List, Tag, TagType};
pub use scene::{InMemoryScene, SceneHost};
pub use validate::validate_tree;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
