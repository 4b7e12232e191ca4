//! Whole-file encoding: named root, gzip container, output sink.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::codec::tag::encode_root;
use crate::error::EncodeError;
use crate::limits::DEFAULT_COMPRESSION_LEVEL;
use crate::model::Compound;

/// Encoding options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// gzip level, 0 (store) to 9 (best).
    pub compression_level: u32,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

impl EncodeOptions {
    /// Creates default encoding options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the gzip level (clamped to 9).
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }
}

/// Wraps raw bytes in a gzip stream.
pub fn compress(data: &[u8], level: u32) -> Result<Vec<u8>, EncodeError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level.min(9)));
    encoder
        .write_all(data)
        .map_err(EncodeError::CompressionFailed)?;
    encoder.finish().map_err(EncodeError::CompressionFailed)
}

/// Unwraps a gzip stream.
pub fn decompress(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder.read_to_end(&mut out)?;
    Ok(out)
}

/// Encodes a named root compound and compresses it.
pub fn encode_root_compressed(
    name: &str,
    root: &Compound,
    options: EncodeOptions,
) -> Result<Vec<u8>, EncodeError> {
    let uncompressed = encode_root(name, root)?;
    compress(&uncompressed, options.compression_level)
}

/// Encodes the tree fully in memory, then writes the compressed file.
///
/// Nothing is created at `path` unless encoding succeeded. Returns the number
/// of bytes written.
pub fn write_root(
    path: &Path,
    name: &str,
    root: &Compound,
    options: EncodeOptions,
) -> Result<usize, EncodeError> {
    let bytes = encode_root_compressed(name, root, options)?;

    let io_err = |source: std::io::Error| EncodeError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_err)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(&bytes).map_err(io_err)?;
    writer.flush().map_err(io_err)?;

    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::tag::decode_root;
    use crate::model::CompoundBuilder;

    fn sample() -> Compound {
        CompoundBuilder::new()
            .compound("Meshes", |m| m)
            .compound("Materials", |m| m)
            .build()
            .unwrap()
    }

    #[test]
    fn test_compressed_roundtrip() {
        let root = sample();
        let compressed = encode_root_compressed("Scene", &root, EncodeOptions::new()).unwrap();
        // gzip magic
        assert_eq!(&compressed[0..2], &[0x1f, 0x8b]);

        let raw = decompress(&compressed).unwrap();
        assert_eq!(raw, encode_root("Scene", &root).unwrap());
        let (name, decoded) = decode_root(&raw).unwrap();
        assert_eq!(name, "Scene");
        assert_eq!(decoded, root);
    }

    #[test]
    fn test_store_level() {
        let options = EncodeOptions::new().compression_level(0);
        let compressed = encode_root_compressed("Scene", &sample(), options).unwrap();
        assert_eq!(decompress(&compressed).unwrap(), encode_root("Scene", &sample()).unwrap());
    }

    #[test]
    fn test_level_is_clamped() {
        assert_eq!(EncodeOptions::new().compression_level(42).compression_level, 9);
    }

    #[test]
    fn test_write_root_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.nbtmesh");
        let written = write_root(&path, "Scene", &sample(), EncodeOptions::new()).unwrap();

        let data = std::fs::read(&path).unwrap();
        assert_eq!(data.len(), written);
        let (_, decoded) = decode_root(&decompress(&data).unwrap()).unwrap();
        assert_eq!(decoded, sample());
    }

    #[test]
    fn test_write_root_bad_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("scene.nbtmesh");
        let result = write_root(&path, "Scene", &sample(), EncodeOptions::new());
        assert!(matches!(result, Err(EncodeError::Io { .. })));
    }

    #[test]
    fn test_encode_failure_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.nbtmesh");
        let mut root = Compound::new();
        root.insert("x".repeat(70_000), crate::model::Tag::Int(1)).unwrap();

        assert!(write_root(&path, "Scene", &root, EncodeOptions::new()).is_err());
        assert!(!path.exists());
    }
}
