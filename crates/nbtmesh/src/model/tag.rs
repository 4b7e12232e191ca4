//! Tag tree types.
//!
//! A [`Tag`] is one typed node of the tree. Names live on the parent
//! [`Compound`], so list elements are naturally unnamed.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::TagError;

/// Wire type ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagType {
    End = 0,
    Byte = 1,
    Short = 2,
    Int = 3,
    Long = 4,
    Float = 5,
    Double = 6,
    ByteArray = 7,
    String = 8,
    List = 9,
    Compound = 10,
}

impl TagType {
    /// Creates a TagType from its wire representation.
    pub fn from_u8(v: u8) -> Option<TagType> {
        match v {
            0 => Some(TagType::End),
            1 => Some(TagType::Byte),
            2 => Some(TagType::Short),
            3 => Some(TagType::Int),
            4 => Some(TagType::Long),
            5 => Some(TagType::Float),
            6 => Some(TagType::Double),
            7 => Some(TagType::ByteArray),
            8 => Some(TagType::String),
            9 => Some(TagType::List),
            10 => Some(TagType::Compound),
            _ => None,
        }
    }

    /// Like [`TagType::from_u8`], but unknown ids are a contract error.
    pub fn try_from_u8(v: u8) -> Result<TagType, TagError> {
        TagType::from_u8(v).ok_or(TagError::UnknownTagType { id: v })
    }

    /// Conventional `TAG_*` name, used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TagType::End => "TAG_End",
            TagType::Byte => "TAG_Byte",
            TagType::Short => "TAG_Short",
            TagType::Int => "TAG_Int",
            TagType::Long => "TAG_Long",
            TagType::Float => "TAG_Float",
            TagType::Double => "TAG_Double",
            TagType::ByteArray => "TAG_Byte_Array",
            TagType::String => "TAG_String",
            TagType::List => "TAG_List",
            TagType::Compound => "TAG_Compound",
        }
    }
}

impl fmt::Display for TagType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single value of the tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Tag {
    /// Sentinel; only ever written as a compound terminator.
    End,
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(List),
    Compound(Compound),
}

impl Tag {
    /// Returns the wire type of this tag.
    pub fn tag_type(&self) -> TagType {
        match self {
            Tag::End => TagType::End,
            Tag::Byte(_) => TagType::Byte,
            Tag::Short(_) => TagType::Short,
            Tag::Int(_) => TagType::Int,
            Tag::Long(_) => TagType::Long,
            Tag::Float(_) => TagType::Float,
            Tag::Double(_) => TagType::Double,
            Tag::ByteArray(_) => TagType::ByteArray,
            Tag::String(_) => TagType::String,
            Tag::List(_) => TagType::List,
            Tag::Compound(_) => TagType::Compound,
        }
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Tag::Compound(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Tag::List(l) => Some(l),
            _ => None,
        }
    }
}

impl From<List> for Tag {
    fn from(list: List) -> Self {
        Tag::List(list)
    }
}

impl From<Compound> for Tag {
    fn from(compound: Compound) -> Self {
        Tag::Compound(compound)
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Tag::String(s)
    }
}

impl From<&str> for Tag {
    fn from(s: &str) -> Self {
        Tag::String(s.to_string())
    }
}

impl From<f32> for Tag {
    fn from(v: f32) -> Self {
        Tag::Float(v)
    }
}

impl From<i32> for Tag {
    fn from(v: i32) -> Self {
        Tag::Int(v)
    }
}

/// Homogeneous ordered sequence of unnamed tags.
///
/// The element type is declared up front, so an empty list still encodes
/// a meaningful type byte.
#[derive(Debug, Clone, PartialEq)]
pub struct List {
    element_type: TagType,
    items: Vec<Tag>,
}

impl List {
    /// Creates an empty list of the given element type.
    pub fn new(element_type: TagType) -> Self {
        Self {
            element_type,
            items: Vec::new(),
        }
    }

    /// Creates a float list.
    pub fn floats(values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            element_type: TagType::Float,
            items: values.into_iter().map(Tag::Float).collect(),
        }
    }

    /// Creates an int list.
    pub fn ints(values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            element_type: TagType::Int,
            items: values.into_iter().map(Tag::Int).collect(),
        }
    }

    /// Creates a list of compounds.
    pub fn compounds(values: impl IntoIterator<Item = Compound>) -> Self {
        Self {
            element_type: TagType::Compound,
            items: values.into_iter().map(Tag::Compound).collect(),
        }
    }

    /// Appends an element, rejecting anything that is not of the declared type.
    pub fn push(&mut self, tag: Tag) -> Result<(), TagError> {
        let found = tag.tag_type();
        if found != self.element_type || found == TagType::End {
            return Err(TagError::ListTypeMismatch {
                expected: self.element_type,
                found,
            });
        }
        self.items.push(tag);
        Ok(())
    }

    pub fn element_type(&self) -> TagType {
        self.element_type
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Tag> {
        self.items.get(index)
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Named children in insertion order. Names are unique within one compound.
#[derive(Debug, Clone, Default)]
pub struct Compound {
    entries: Vec<(String, Tag)>,
    /// Name -> position in `entries`.
    index: FxHashMap<String, usize>,
}

impl PartialEq for Compound {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a named child at the end.
    pub fn insert(&mut self, name: impl Into<String>, tag: impl Into<Tag>) -> Result<(), TagError> {
        let name = name.into();
        if self.contains(&name) {
            return Err(TagError::DuplicateName { name });
        }
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, tag.into()));
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    pub fn get_compound(&self, name: &str) -> Option<&Compound> {
        self.get(name).and_then(Tag::as_compound)
    }

    pub fn get_list(&self, name: &str) -> Option<&List> {
        self.get(name).and_then(Tag::as_list)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates children in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Tag)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_type_roundtrip() {
        for id in 0u8..=10 {
            let ty = TagType::from_u8(id).unwrap();
            assert_eq!(ty as u8, id);
        }
        assert_eq!(TagType::from_u8(11), None);
        assert_eq!(
            TagType::try_from_u8(200),
            Err(TagError::UnknownTagType { id: 200 })
        );
    }

    #[test]
    fn test_list_rejects_mismatched_element() {
        let mut list = List::new(TagType::Float);
        list.push(Tag::Float(1.0)).unwrap();
        let err = list.push(Tag::Int(1)).unwrap_err();
        assert_eq!(
            err,
            TagError::ListTypeMismatch {
                expected: TagType::Float,
                found: TagType::Int
            }
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_list_rejects_end() {
        let mut list = List::new(TagType::End);
        assert!(list.push(Tag::End).is_err());
    }

    #[test]
    fn test_empty_list_keeps_declared_type() {
        let list = List::floats(Vec::new());
        assert!(list.is_empty());
        assert_eq!(list.element_type(), TagType::Float);
    }

    #[test]
    fn test_compound_rejects_duplicate_names() {
        let mut c = Compound::new();
        c.insert("Vertices", List::floats([1.0])).unwrap();
        let err = c.insert("Vertices", List::floats([2.0])).unwrap_err();
        assert_eq!(
            err,
            TagError::DuplicateName {
                name: "Vertices".to_string()
            }
        );
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_compound_lookup_many_names() {
        let mut c = Compound::new();
        for i in 0..1000 {
            c.insert(format!("mesh{i}"), Tag::Int(i)).unwrap();
        }
        assert_eq!(c.len(), 1000);
        assert_eq!(c.get("mesh0"), Some(&Tag::Int(0)));
        assert_eq!(c.get("mesh999"), Some(&Tag::Int(999)));
        assert!(c.insert("mesh500", Tag::Int(0)).is_err());
        assert!(!c.contains("mesh1000"));
    }

    #[test]
    fn test_compound_preserves_insertion_order() {
        let mut c = Compound::new();
        c.insert("b", Tag::Int(1)).unwrap();
        c.insert("a", Tag::Int(2)).unwrap();
        c.insert("c", Tag::Int(3)).unwrap();
        assert_eq!(c.names().collect::<Vec<_>>(), ["b", "a", "c"]);
        assert_eq!(c.get("a"), Some(&Tag::Int(2)));
    }
}
