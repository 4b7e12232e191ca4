//! Structural validation of tag trees.
//!
//! Encoding checks the same limits while writing; validating up front lets
//! the exporter reject a tree before the output file is touched.

use crate::error::{EncodeError, TagError};
use crate::limits::{MAX_LIST_LEN, MAX_STRING_LEN};
use crate::model::{Compound, List, Tag};

/// Validates a whole tree.
///
/// Checks:
/// - every list element matches the list's declared type
/// - names and strings fit a u16 length prefix
/// - lists and byte arrays fit an i32 count
pub fn validate_tree(root: &Compound) -> Result<(), EncodeError> {
    validate_compound(root)
}

fn validate_compound(compound: &Compound) -> Result<(), EncodeError> {
    for (name, child) in compound.iter() {
        check_string(name, "tag name")?;
        validate_tag(child)?;
    }
    Ok(())
}

fn validate_list(list: &List) -> Result<(), EncodeError> {
    check_count(list.len(), "list")?;
    for item in list {
        if item.tag_type() != list.element_type() {
            return Err(TagError::ListTypeMismatch {
                expected: list.element_type(),
                found: item.tag_type(),
            }
            .into());
        }
        validate_tag(item)?;
    }
    Ok(())
}

fn validate_tag(tag: &Tag) -> Result<(), EncodeError> {
    match tag {
        Tag::String(s) => check_string(s, "string"),
        Tag::ByteArray(bytes) => check_count(bytes.len(), "byte array"),
        Tag::List(list) => validate_list(list),
        Tag::Compound(compound) => validate_compound(compound),
        Tag::End
        | Tag::Byte(_)
        | Tag::Short(_)
        | Tag::Int(_)
        | Tag::Long(_)
        | Tag::Float(_)
        | Tag::Double(_) => Ok(()),
    }
}

fn check_string(s: &str, field: &'static str) -> Result<(), EncodeError> {
    if s.len() > MAX_STRING_LEN {
        return Err(EncodeError::LengthExceedsLimit {
            field,
            len: s.len(),
            max: MAX_STRING_LEN,
        });
    }
    Ok(())
}

fn check_count(count: usize, field: &'static str) -> Result<(), EncodeError> {
    if count > MAX_LIST_LEN {
        return Err(EncodeError::LengthExceedsLimit {
            field,
            len: count,
            max: MAX_LIST_LEN,
        });
    }
    Ok(())
}
