//! Builder API for ergonomic compound construction.
//!
//! # Example
//!
//! ```rust
//! use nbtmesh::model::builder::CompoundBuilder;
//!
//! let material = CompoundBuilder::new()
//!     .float_list("Diffuse", [0.8, 0.8, 0.8])
//!     .float_list("Specular", [1.0, 1.0, 1.0])
//!     .float("Shininess", 50.0)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(material.len(), 3);
//! ```

use crate::error::TagError;
use crate::model::{Compound, List, Tag};

/// Builder for a [`Compound`].
///
/// The first failing insertion is remembered and reported by [`build`](Self::build);
/// later insertions are ignored once an error occurred.
#[derive(Debug, Clone, Default)]
pub struct CompoundBuilder {
    compound: Compound,
    error: Option<TagError>,
}

impl CompoundBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds any tag under `name`.
    pub fn tag(mut self, name: impl Into<String>, tag: impl Into<Tag>) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.compound.insert(name, tag) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Adds a `List<Float>`.
    pub fn float_list(self, name: impl Into<String>, values: impl IntoIterator<Item = f32>) -> Self {
        self.tag(name, List::floats(values))
    }

    /// Adds a `List<Int>`.
    pub fn int_list(self, name: impl Into<String>, values: impl IntoIterator<Item = i32>) -> Self {
        self.tag(name, List::ints(values))
    }

    /// Adds a `List<Compound>`.
    pub fn compound_list(
        self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = Compound>,
    ) -> Self {
        self.tag(name, List::compounds(values))
    }

    pub fn float(self, name: impl Into<String>, value: f32) -> Self {
        self.tag(name, Tag::Float(value))
    }

    pub fn int(self, name: impl Into<String>, value: i32) -> Self {
        self.tag(name, Tag::Int(value))
    }

    pub fn string(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tag(name, Tag::String(value.into()))
    }

    /// Adds a nested compound built by `f`.
    pub fn compound<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: FnOnce(CompoundBuilder) -> CompoundBuilder,
    {
        match f(CompoundBuilder::new()).build() {
            Ok(child) => self.tag(name, child),
            Err(e) => self.fail(e),
        }
    }

    fn fail(mut self, error: TagError) -> Self {
        self.error.get_or_insert(error);
        self
    }

    /// Finishes the compound, or returns the first construction error.
    pub fn build(self) -> Result<Compound, TagError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.compound),
        }
    }
}
