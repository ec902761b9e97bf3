// SMS-SUBMIT codec plumbing - errors and bounds-checked buffer access
//
// Every encoder in this crate writes into caller-owned memory through a
// `PduWriter`, so running past the end of an output buffer is reported as
// `CodecError::BufferTooSmall` instead of being an indexing panic. The read
// helpers mirror that on the decode side with `CodecError::Incomplete`.

use bytes::{Buf, Bytes, BytesMut};
use std::io::Cursor;
use thiserror::Error;

/// Codec errors with enough context to report which input was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("Invalid digit {byte:#04x} at position {position}: addresses must be '0'-'9'")]
    InvalidDigit { position: usize, byte: u8 },

    #[error("Invalid character {byte:#04x} at position {position}: not a 7-bit code point")]
    InvalidCharacter { position: usize, byte: u8 },

    #[error("Message too long: {length} characters (max {max})")]
    MessageTooLong { length: usize, max: usize },

    #[error("Address too long: {length} digits (max {max})")]
    AddressTooLong { length: usize, max: usize },

    #[error("Destination address is empty")]
    EmptyDestination,

    #[error("Buffer too small: {required} bytes required, {available} available")]
    BufferTooSmall { required: usize, available: usize },

    #[error("Incomplete PDU: need more data")]
    Incomplete,

    #[error("Trailing data: {0} bytes after the end of the PDU")]
    TrailingData(usize),

    #[error("Invalid semi-octet padding nibble: {0:#x}")]
    InvalidPadding(u8),

    #[error("Invalid type-of-address: {0:#04x}")]
    InvalidTypeOfAddress(u8),

    #[error("Unexpected value for '{field}': expected {expected:#04x}, got {actual:#04x}")]
    UnexpectedValue {
        field: &'static str,
        expected: u8,
        actual: u8,
    },
}

/// Trait for types that can be encoded into a caller supplied buffer
pub trait Encodable {
    /// Exact number of bytes `encode` writes
    fn encoded_len(&self) -> usize;

    /// Encode into `out`, returning the number of bytes written
    fn encode(&self, out: &mut [u8]) -> Result<usize, CodecError>;

    /// Encode into a freshly allocated buffer
    fn to_bytes(&self) -> Result<Bytes, CodecError> {
        let mut buf = BytesMut::zeroed(self.encoded_len());
        let written = self.encode(&mut buf)?;
        buf.truncate(written);
        Ok(buf.freeze())
    }
}

/// Trait for types that can be decoded from bytes
pub trait Decodable: Sized {
    fn decode(buf: &mut Cursor<&[u8]>) -> Result<Self, CodecError>;
}

/// Append-only writer over a caller supplied output buffer.
///
/// Nothing is ever written past `capacity()`: an append that does not fit
/// fails with `BufferTooSmall` and leaves the position unchanged.
#[derive(Debug)]
pub struct PduWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> PduWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Number of bytes written so far
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn remaining(&self) -> usize {
        self.capacity() - self.pos
    }

    /// Reserve `len` bytes at the current position, failing if they do not fit
    fn reserve(&mut self, len: usize) -> Result<&mut [u8], CodecError> {
        if len > self.remaining() {
            return Err(CodecError::BufferTooSmall {
                required: self.pos + len,
                available: self.capacity(),
            });
        }
        Ok(&mut self.buf[self.pos..self.pos + len])
    }

    pub fn put_u8(&mut self, value: u8) -> Result<(), CodecError> {
        self.reserve(1)?[0] = value;
        self.pos += 1;
        Ok(())
    }

    pub fn put_slice(&mut self, src: &[u8]) -> Result<(), CodecError> {
        self.reserve(src.len())?.copy_from_slice(src);
        self.pos += src.len();
        Ok(())
    }

    /// Let a sub-encoder fill exactly `len` bytes in place.
    ///
    /// The encoder must report `len` bytes written; the writer only advances
    /// once it has succeeded.
    pub fn put_with<F>(&mut self, len: usize, encode: F) -> Result<(), CodecError>
    where
        F: FnOnce(&mut [u8]) -> Result<usize, CodecError>,
    {
        let written = encode(self.reserve(len)?)?;
        debug_assert_eq!(written, len);
        self.pos += written;
        Ok(())
    }

    /// The bytes written so far
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }
}

/// Decode a single byte
pub fn decode_u8(buf: &mut Cursor<&[u8]>) -> Result<u8, CodecError> {
    if buf.remaining() < 1 {
        return Err(CodecError::Incomplete);
    }
    Ok(buf.get_u8())
}

/// Borrow the next `len` bytes and advance past them
pub fn decode_slice<'a>(buf: &mut Cursor<&'a [u8]>, len: usize) -> Result<&'a [u8], CodecError> {
    if buf.remaining() < len {
        return Err(CodecError::Incomplete);
    }
    let start = buf.position() as usize;
    let inner: &'a [u8] = *buf.get_ref();
    buf.advance(len);
    Ok(&inner[start..start + len])
}

/// Decode a byte that must carry a fixed value
pub fn expect_u8(
    buf: &mut Cursor<&[u8]>,
    field: &'static str,
    expected: u8,
) -> Result<(), CodecError> {
    let actual = decode_u8(buf)?;
    if actual != expected {
        return Err(CodecError::UnexpectedValue {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_appends_in_order() {
        let mut out = [0u8; 4];
        let mut writer = PduWriter::new(&mut out);
        writer.put_u8(0x11).unwrap();
        writer.put_slice(&[0x22, 0x33]).unwrap();

        assert_eq!(writer.position(), 3);
        assert_eq!(writer.capacity(), 4);
        assert_eq!(writer.remaining(), 1);
        assert_eq!(writer.written(), &[0x11, 0x22, 0x33]);
    }

    #[test]
    fn test_writer_rejects_overflow_without_advancing() {
        let mut out = [0u8; 2];
        let mut writer = PduWriter::new(&mut out);
        writer.put_u8(0xAA).unwrap();

        let result = writer.put_slice(&[1, 2]);
        assert_eq!(
            result,
            Err(CodecError::BufferTooSmall {
                required: 3,
                available: 2
            })
        );
        assert_eq!(writer.position(), 1);

        writer.put_u8(0xBB).unwrap();
        assert!(matches!(
            writer.put_u8(0xCC),
            Err(CodecError::BufferTooSmall { .. })
        ));
        assert_eq!(out, [0xAA, 0xBB]);
    }

    #[test]
    fn test_writer_put_with_propagates_encoder_errors() {
        let mut out = [0u8; 4];
        let mut writer = PduWriter::new(&mut out);

        let result = writer.put_with(2, |_| {
            Err(CodecError::InvalidDigit {
                position: 0,
                byte: b'x',
            })
        });
        assert!(matches!(result, Err(CodecError::InvalidDigit { .. })));
        assert_eq!(writer.position(), 0);

        writer
            .put_with(2, |buf| {
                buf.copy_from_slice(&[7, 8]);
                Ok(2)
            })
            .unwrap();
        assert_eq!(writer.written(), &[7, 8]);
    }

    #[test]
    fn test_decode_helpers_report_incomplete() {
        let data: &[u8] = &[0x01, 0x02, 0x03];
        let mut cursor = Cursor::new(data);

        assert_eq!(decode_u8(&mut cursor).unwrap(), 0x01);
        assert_eq!(decode_slice(&mut cursor, 2).unwrap(), &[0x02, 0x03]);
        assert_eq!(decode_u8(&mut cursor), Err(CodecError::Incomplete));
        assert_eq!(decode_slice(&mut cursor, 1), Err(CodecError::Incomplete));
    }

    #[test]
    fn test_expect_u8_reports_field() {
        let data: &[u8] = &[0x12];
        let mut cursor = Cursor::new(data);

        let err = expect_u8(&mut cursor, "pdu_type", 0x11).unwrap_err();
        assert_eq!(
            err,
            CodecError::UnexpectedValue {
                field: "pdu_type",
                expected: 0x11,
                actual: 0x12
            }
        );
    }
}
