//! Data model types for NBTMesh.
//!
//! This module contains the tag tree the exporter builds:
//! - Tag types and values
//! - Homogeneous lists and named compounds
//! - Builders (ergonomic construction)

pub mod builder;
pub mod tag;

pub use builder::CompoundBuilder;
pub use tag::{Compound, List, Tag, TagType};
