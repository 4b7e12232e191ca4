//! Binary encoding for NBTMesh.
//!
//! Tag payloads are big-endian and self-describing; the whole stream is
//! wrapped in a gzip container when written to disk.

pub mod file;
pub mod primitives;
pub mod tag;

pub use file::{EncodeOptions, compress, decompress, encode_root_compressed, write_root};
pub use primitives::Writer;
pub use tag::{encode_named, encode_root, encode_tag};
