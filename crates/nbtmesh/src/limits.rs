//! Format constants and encoding limits.

/// Name of the root compound of every exported file.
pub const ROOT_NAME: &str = "Scene";

/// Custom mesh property prefix marking the first frame of an action.
pub const ANIM_START_PREFIX: &str = "AnimStart:";

/// Custom mesh property prefix marking the end (exclusive) of an action.
pub const ANIM_STOP_PREFIX: &str = "AnimStop:";

/// Maximum encoded byte length of a string or tag name (u16 length prefix).
pub const MAX_STRING_LEN: usize = u16::MAX as usize;

/// Maximum element count of a list or byte array (signed 32-bit count).
pub const MAX_LIST_LEN: usize = i32::MAX as usize;

/// Upper bound on frames reserved up front when baking an action.
pub const MAX_PREALLOCATED_FRAMES: usize = 1024;

/// Default gzip level (best compression).
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 9;

// Well-known child names of the exported tree.
pub const MESHES: &str = "Meshes";
pub const MATERIALS: &str = "Materials";
pub const VERTICES: &str = "Vertices";
pub const VERTEX_NORMALS: &str = "Vertex normals";
pub const TEXTURE_COORDINATES: &str = "Texture coordinates";
pub const TRIANGLE_GROUPS: &str = "Triangle groups";
pub const ACTIONS: &str = "Actions";
pub const FRAMES: &str = "Frames";
pub const DIFFUSE: &str = "Diffuse";
pub const SPECULAR: &str = "Specular";
pub const SHININESS: &str = "Shininess";
pub const TEXTURE: &str = "Texture";
