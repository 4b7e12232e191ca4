//! Primitive encoding for the NBTMesh binary format.
//!
//! All multi-byte scalars are big-endian with a fixed width.

use crate::error::EncodeError;
use crate::limits::{MAX_LIST_LEN, MAX_STRING_LEN};

// =============================================================================
// ENCODING
// =============================================================================

/// Writer for encoding binary data.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates a new writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Creates a new writer with capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Returns the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Returns a reference to the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if no bytes have been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Writes a single unsigned byte (type ids, terminators).
    #[inline]
    pub fn write_byte(&mut self, byte: u8) {
        self.buf.push(byte);
    }

    /// Writes raw bytes.
    #[inline]
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    #[inline]
    pub fn write_i8(&mut self, value: i8) {
        self.buf.push(value as u8);
    }

    #[inline]
    pub fn write_i16(&mut self, value: i16) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    #[inline]
    pub fn write_f64(&mut self, value: f64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Writes a u16 byte-length prefixed UTF-8 string (no terminator).
    pub fn write_string(&mut self, s: &str, field: &'static str) -> Result<(), EncodeError> {
        let len = s.len();
        if len > MAX_STRING_LEN {
            return Err(EncodeError::LengthExceedsLimit {
                field,
                len,
                max: MAX_STRING_LEN,
            });
        }
        self.buf.extend_from_slice(&(len as u16).to_be_bytes());
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }

    /// Writes a signed 32-bit element count for lists and byte arrays.
    pub fn write_count(&mut self, count: usize, field: &'static str) -> Result<(), EncodeError> {
        if count > MAX_LIST_LEN {
            return Err(EncodeError::LengthExceedsLimit {
                field,
                len: count,
                max: MAX_LIST_LEN,
            });
        }
        self.write_i32(count as i32);
        Ok(())
    }

    /// Writes an i32 length-prefixed byte array.
    pub fn write_byte_array(&mut self, bytes: &[u8]) -> Result<(), EncodeError> {
        self.write_count(bytes.len(), "byte array")?;
        self.buf.extend_from_slice(bytes);
        Ok(())
    }
}

// =============================================================================
// DECODING (reference reader for tests)
// =============================================================================

#[cfg(test)]
pub(crate) use reader::Reader;

#[cfg(test)]
mod reader {
    /// Bounds-checked big-endian reader over a byte slice.
    #[derive(Debug, Clone)]
    pub(crate) struct Reader<'a> {
        data: &'a [u8],
        pos: usize,
    }

    impl<'a> Reader<'a> {
        pub fn new(data: &'a [u8]) -> Self {
            Self { data, pos: 0 }
        }

        pub fn is_empty(&self) -> bool {
            self.pos >= self.data.len()
        }

        pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], String> {
            if self.pos + n > self.data.len() {
                return Err(format!("unexpected end of input at {}", self.pos));
            }
            let bytes = &self.data[self.pos..self.pos + n];
            self.pos += n;
            Ok(bytes)
        }

        fn read_array<const N: usize>(&mut self) -> Result<[u8; N], String> {
            let mut out = [0u8; N];
            out.copy_from_slice(self.read_bytes(N)?);
            Ok(out)
        }

        pub fn read_byte(&mut self) -> Result<u8, String> {
            Ok(self.read_array::<1>()?[0])
        }

        pub fn read_i8(&mut self) -> Result<i8, String> {
            Ok(self.read_byte()? as i8)
        }

        pub fn read_i16(&mut self) -> Result<i16, String> {
            Ok(i16::from_be_bytes(self.read_array()?))
        }

        pub fn read_u16(&mut self) -> Result<u16, String> {
            Ok(u16::from_be_bytes(self.read_array()?))
        }

        pub fn read_i32(&mut self) -> Result<i32, String> {
            Ok(i32::from_be_bytes(self.read_array()?))
        }

        pub fn read_i64(&mut self) -> Result<i64, String> {
            Ok(i64::from_be_bytes(self.read_array()?))
        }

        pub fn read_f32(&mut self) -> Result<f32, String> {
            Ok(f32::from_be_bytes(self.read_array()?))
        }

        pub fn read_f64(&mut self) -> Result<f64, String> {
            Ok(f64::from_be_bytes(self.read_array()?))
        }

        pub fn read_string(&mut self) -> Result<String, String> {
            let len = self.read_u16()? as usize;
            let bytes = self.read_bytes(len)?;
            String::from_utf8(bytes.to_vec()).map_err(|e| e.to_string())
        }
    }
}
