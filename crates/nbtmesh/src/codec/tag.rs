//! Tag encoding.
//!
//! Layout of each payload:
//! - scalars: fixed-width big-endian
//! - String: u16 byte length + bytes
//! - ByteArray: i32 length + bytes
//! - List: element type byte + i32 count + unnamed payloads
//! - Compound: (type byte + name + payload)* + End byte

use crate::codec::primitives::Writer;
use crate::error::{EncodeError, TagError};
use crate::model::{Compound, List, Tag, TagType};

// =============================================================================
// ENCODING
// =============================================================================

/// Encodes the unnamed payload of a tag.
pub fn encode_tag(writer: &mut Writer, tag: &Tag) -> Result<(), EncodeError> {
    match tag {
        Tag::End => {}
        Tag::Byte(v) => writer.write_i8(*v),
        Tag::Short(v) => writer.write_i16(*v),
        Tag::Int(v) => writer.write_i32(*v),
        Tag::Long(v) => writer.write_i64(*v),
        Tag::Float(v) => writer.write_f32(*v),
        Tag::Double(v) => writer.write_f64(*v),
        Tag::ByteArray(bytes) => writer.write_byte_array(bytes)?,
        Tag::String(s) => writer.write_string(s, "string")?,
        Tag::List(list) => encode_list(writer, list)?,
        Tag::Compound(compound) => encode_compound(writer, compound)?,
    }
    Ok(())
}

/// Encodes a compound entry: type byte, name, payload.
pub fn encode_named(writer: &mut Writer, name: &str, tag: &Tag) -> Result<(), EncodeError> {
    writer.write_byte(tag.tag_type() as u8);
    writer.write_string(name, "tag name")?;
    encode_tag(writer, tag)
}

fn encode_list(writer: &mut Writer, list: &List) -> Result<(), EncodeError> {
    let element_type = list.element_type();
    writer.write_byte(element_type as u8);
    writer.write_count(list.len(), "list")?;
    for item in list {
        // List::push already enforces this; re-checked so a bad tree never reaches the file.
        if item.tag_type() != element_type {
            return Err(TagError::ListTypeMismatch {
                expected: element_type,
                found: item.tag_type(),
            }
            .into());
        }
        encode_tag(writer, item)?;
    }
    Ok(())
}

fn encode_compound(writer: &mut Writer, compound: &Compound) -> Result<(), EncodeError> {
    for (name, child) in compound.iter() {
        encode_named(writer, name, child)?;
    }
    writer.write_byte(TagType::End as u8);
    Ok(())
}

/// Encodes a named root compound (uncompressed).
pub fn encode_root(name: &str, root: &Compound) -> Result<Vec<u8>, EncodeError> {
    let mut writer = Writer::with_capacity(1024);
    writer.write_byte(TagType::Compound as u8);
    writer.write_string(name, "root name")?;
    encode_compound(&mut writer, root)?;
    Ok(writer.into_bytes())
}

// =============================================================================
// DECODING (reference decoder for tests)
// =============================================================================

#[cfg(test)]
pub(crate) fn decode_root(data: &[u8]) -> Result<(String, Compound), String> {
    use crate::codec::primitives::Reader;

    let mut reader = Reader::new(data);
    let ty = reader.read_byte()?;
    if ty != TagType::Compound as u8 {
        return Err(format!("root must be a compound, found type {ty}"));
    }
    let name = reader.read_string()?;
    let root = match decode_payload(&mut reader, TagType::Compound)? {
        Tag::Compound(c) => c,
        _ => unreachable!(),
    };
    if !reader.is_empty() {
        return Err("trailing bytes after root".to_string());
    }
    Ok((name, root))
}

#[cfg(test)]
fn decode_payload(
    reader: &mut crate::codec::primitives::Reader<'_>,
    ty: TagType,
) -> Result<Tag, String> {
    Ok(match ty {
        TagType::End => Tag::End,
        TagType::Byte => Tag::Byte(reader.read_i8()?),
        TagType::Short => Tag::Short(reader.read_i16()?),
        TagType::Int => Tag::Int(reader.read_i32()?),
        TagType::Long => Tag::Long(reader.read_i64()?),
        TagType::Float => Tag::Float(reader.read_f32()?),
        TagType::Double => Tag::Double(reader.read_f64()?),
        TagType::ByteArray => {
            let len = reader.read_i32()? as usize;
            Tag::ByteArray(reader.read_bytes(len)?.to_vec())
        }
        TagType::String => Tag::String(reader.read_string()?),
        TagType::List => {
            let element_type =
                TagType::try_from_u8(reader.read_byte()?).map_err(|e| e.to_string())?;
            let count = reader.read_i32()?;
            let mut list = List::new(element_type);
            for _ in 0..count {
                let item = decode_payload(reader, element_type)?;
                list.push(item).map_err(|e| e.to_string())?;
            }
            Tag::List(list)
        }
        TagType::Compound => {
            let mut compound = Compound::new();
            loop {
                let child_type =
                    TagType::try_from_u8(reader.read_byte()?).map_err(|e| e.to_string())?;
                if child_type == TagType::End {
                    break;
                }
                let name = reader.read_string()?;
                let child = decode_payload(reader, child_type)?;
                compound.insert(name, child).map_err(|e| e.to_string())?;
            }
            Tag::Compound(compound)
        }
    })
}
