//! Error types for tag construction, encoding and scene export.

use std::path::PathBuf;

use thiserror::Error;

use crate::model::TagType;

/// Contract violation while building a tag tree.
///
/// These are programmer errors: the exporter never produces them for a
/// well-formed host scene, and they are never coerced into valid output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("list of {expected} cannot hold a {found} element")]
    ListTypeMismatch { expected: TagType, found: TagType },

    #[error("duplicate tag name {name:?} in compound")]
    DuplicateName { name: String },

    #[error("unknown tag type id {id}")]
    UnknownTagType { id: u8 },
}

/// Error during binary encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{field} length {len} exceeds maximum {max}")]
    LengthExceedsLimit {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error(transparent)]
    Tag(#[from] TagError),

    #[error("gzip compression failed: {0}")]
    CompressionFailed(std::io::Error),

    #[error("failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error raised by a scene host while evaluating objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("host failed to evaluate {object:?}: {message}")]
pub struct HostError {
    pub object: String,
    pub message: String,
}

impl HostError {
    pub fn new(object: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            message: message.into(),
        }
    }
}

/// Error that aborts a whole scene export.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Host(#[from] HostError),

    #[error(transparent)]
    Tag(#[from] TagError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("mesh {mesh:?} face {face} has {corners} corners (expected 3 or 4)")]
    UnsupportedFace {
        mesh: String,
        face: usize,
        corners: usize,
    },

    #[error("mesh {mesh:?} face {face} has no entry in the UV layer")]
    MissingFaceUv { mesh: String, face: usize },

    #[error("mesh {mesh:?} face {face} references material slot {index} (mesh has {count})")]
    MaterialOutOfRange {
        mesh: String,
        face: usize,
        index: usize,
        count: usize,
    },

    #[error("mesh {mesh:?} action {action:?} is missing its {missing} bound")]
    IncompleteActionBounds {
        mesh: String,
        action: String,
        missing: &'static str,
    },

    #[error("mesh {mesh:?} action {action:?} starts at {start} after it stops at {stop}")]
    InvalidActionRange {
        mesh: String,
        action: String,
        start: i32,
        stop: i32,
    },

    #[error("object {object:?} exports mesh {name:?}, a name already taken by a different mesh")]
    MeshNameCollision { object: String, name: String },

    #[error("mesh {mesh:?} frame {frame} has {actual} {what}, static mesh has {expected}")]
    FrameTopologyChanged {
        mesh: String,
        frame: i32,
        what: &'static str,
        expected: usize,
        actual: usize,
    },
}
