//! Strict binary protocol.
//!
//! # Wire Format
//! ```text
//! message   := i32 (0x8001_0000 | kind) string(name) i32(seq_id) struct
//! struct    := { u8(kind) i16(id) value } u8(0)
//! list/set  := u8(element_kind) i32(size) value*
//! map       := u8(key_kind) u8(value_kind) i32(size) (key value)*
//! string    := i32(len) utf8
//! ```
//! All integers are big-endian. Doubles are IEEE-754 bit patterns.

use crate::error::{Error, ProtocolErrorKind, Result};
use crate::protocol::{InputProtocol, OutputProtocol};
use crate::wire::{FieldHeader, ListHeader, MapHeader, MessageHeader, MessageKind, SetHeader, WireKind};
use bytes::{Buf, BufMut, Bytes, BytesMut};

/// Version word carried in the top half of a strict message header.
pub const VERSION_1: u32 = 0x8001_0000;
const VERSION_MASK: u32 = 0xffff_0000;

/// Binary encoder writing into a growable buffer.
#[derive(Debug, Default)]
pub struct BinaryOutput {
    buf: BytesMut,
}

impl BinaryOutput {
    /// Creates an empty encoder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an encoder with a preallocated buffer.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Returns the number of bytes written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns true if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Removes and returns everything written so far.
    pub fn take(&mut self) -> Bytes {
        self.buf.split().freeze()
    }

    /// Consumes the encoder and returns its bytes.
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.buf.freeze()
    }

    fn put_size(&mut self, size: u32, what: &str) -> Result<()> {
        let size = i32::try_from(size).map_err(|_| {
            Error::protocol(
                ProtocolErrorKind::InvalidData,
                format!("{what} size {size} exceeds i32"),
            )
        })?;
        self.buf.put_i32(size);
        Ok(())
    }
}

impl OutputProtocol for BinaryOutput {
    fn write_message_begin(&mut self, header: &MessageHeader) -> Result<()> {
        self.buf
            .put_u32(VERSION_1 | u32::from(header.kind.as_u8()));
        self.write_string(&header.name)?;
        self.buf.put_i32(header.seq_id);
        Ok(())
    }

    fn write_message_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_struct_begin(&mut self, _name: &str) -> Result<()> {
        Ok(())
    }

    fn write_struct_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_field_begin(&mut self, header: &FieldHeader) -> Result<()> {
        self.buf.put_u8(header.kind.as_u8());
        self.buf.put_i16(header.id);
        Ok(())
    }

    fn write_field_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_field_stop(&mut self) -> Result<()> {
        self.buf.put_u8(WireKind::Stop.as_u8());
        Ok(())
    }

    fn write_list_begin(&mut self, header: &ListHeader) -> Result<()> {
        self.buf.put_u8(header.element_kind.as_u8());
        self.put_size(header.size, "list")
    }

    fn write_list_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_set_begin(&mut self, header: &SetHeader) -> Result<()> {
        self.buf.put_u8(header.element_kind.as_u8());
        self.put_size(header.size, "set")
    }

    fn write_set_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_map_begin(&mut self, header: &MapHeader) -> Result<()> {
        self.buf.put_u8(header.key_kind.as_u8());
        self.buf.put_u8(header.value_kind.as_u8());
        self.put_size(header.size, "map")
    }

    fn write_map_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_bool(&mut self, value: bool) -> Result<()> {
        self.buf.put_u8(u8::from(value));
        Ok(())
    }

    fn write_byte(&mut self, value: i8) -> Result<()> {
        self.buf.put_i8(value);
        Ok(())
    }

    fn write_i16(&mut self, value: i16) -> Result<()> {
        self.buf.put_i16(value);
        Ok(())
    }

    fn write_i32(&mut self, value: i32) -> Result<()> {
        self.buf.put_i32(value);
        Ok(())
    }

    fn write_i64(&mut self, value: i64) -> Result<()> {
        self.buf.put_i64(value);
        Ok(())
    }

    fn write_double(&mut self, value: f64) -> Result<()> {
        self.buf.put_f64(value);
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        let len = u32::try_from(value.len()).map_err(|_| {
            Error::protocol(ProtocolErrorKind::InvalidData, "string longer than i32::MAX")
        })?;
        self.put_size(len, "string")?;
        self.buf.put_slice(value.as_bytes());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Binary decoder reading from an immutable byte buffer.
#[derive(Debug, Clone, Default)]
pub struct BinaryInput {
    buf: Bytes,
}

impl BinaryInput {
    /// Creates a decoder over the given bytes.
    #[must_use]
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { buf: data.into() }
    }

    /// Returns the number of unread bytes.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    fn need(&self, len: usize) -> Result<()> {
        if self.buf.remaining() < len {
            return Err(Error::protocol(
                ProtocolErrorKind::UnexpectedEof,
                format!("need {len} bytes, {} remaining", self.buf.remaining()),
            ));
        }
        Ok(())
    }

    fn get_kind(&mut self) -> Result<WireKind> {
        self.need(1)?;
        let tag = self.buf.get_u8();
        WireKind::from_u8(tag).ok_or_else(|| {
            Error::protocol(ProtocolErrorKind::InvalidData, format!("unknown wire kind {tag}"))
        })
    }

    fn get_size(&mut self, what: &str) -> Result<u32> {
        self.need(4)?;
        let size = self.buf.get_i32();
        u32::try_from(size).map_err(|_| {
            Error::protocol(
                ProtocolErrorKind::NegativeSize,
                format!("{what} size {size} is negative"),
            )
        })
    }
}

impl InputProtocol for BinaryInput {
    fn read_message_begin(&mut self) -> Result<MessageHeader> {
        self.need(4)?;
        let word = self.buf.get_u32();
        if word & VERSION_MASK != VERSION_1 {
            return Err(Error::protocol(
                ProtocolErrorKind::BadVersion,
                format!("bad message version word {word:#010x}"),
            ));
        }
        let tag = (word & 0xff) as u8;
        let kind = MessageKind::from_u8(tag).ok_or_else(|| {
            Error::protocol(ProtocolErrorKind::InvalidData, format!("unknown message kind {tag}"))
        })?;
        let name = self.read_string()?;
        let seq_id = self.read_i32()?;
        Ok(MessageHeader::new(name, kind, seq_id))
    }

    fn read_message_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_struct_begin(&mut self) -> Result<String> {
        Ok(String::new())
    }

    fn read_struct_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_field_begin(&mut self) -> Result<FieldHeader> {
        let kind = self.get_kind()?;
        if kind == WireKind::Stop {
            return Ok(FieldHeader::stop());
        }
        let id = self.read_i16()?;
        Ok(FieldHeader::new("", kind, id))
    }

    fn read_field_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_list_begin(&mut self) -> Result<ListHeader> {
        let element_kind = self.get_kind()?;
        let size = self.get_size("list")?;
        Ok(ListHeader::new(element_kind, size))
    }

    fn read_list_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_set_begin(&mut self) -> Result<SetHeader> {
        let element_kind = self.get_kind()?;
        let size = self.get_size("set")?;
        Ok(SetHeader::new(element_kind, size))
    }

    fn read_set_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_map_begin(&mut self) -> Result<MapHeader> {
        let key_kind = self.get_kind()?;
        let value_kind = self.get_kind()?;
        let size = self.get_size("map")?;
        Ok(MapHeader::new(key_kind, value_kind, size))
    }

    fn read_map_end(&mut self) -> Result<()> {
        Ok(())
    }

    fn read_bool(&mut self) -> Result<bool> {
        self.need(1)?;
        Ok(self.buf.get_u8() != 0)
    }

    fn read_byte(&mut self) -> Result<i8> {
        self.need(1)?;
        Ok(self.buf.get_i8())
    }

    fn read_i16(&mut self) -> Result<i16> {
        self.need(2)?;
        Ok(self.buf.get_i16())
    }

    fn read_i32(&mut self) -> Result<i32> {
        self.need(4)?;
        Ok(self.buf.get_i32())
    }

    fn read_i64(&mut self) -> Result<i64> {
        self.need(8)?;
        Ok(self.buf.get_i64())
    }

    fn read_double(&mut self) -> Result<f64> {
        self.need(8)?;
        Ok(self.buf.get_f64())
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.get_size("string")? as usize;
        self.need(len)?;
        let raw = self.buf.split_to(len);
        String::from_utf8(raw.to_vec()).map_err(|e| {
            Error::protocol(ProtocolErrorKind::InvalidData, format!("invalid UTF-8: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_struct_bytes() {
        let mut output = BinaryOutput::new();
        output.write_struct_begin("Point").unwrap();
        output
            .write_field_begin(&FieldHeader::new("x", WireKind::I32, 1))
            .unwrap();
        output.write_i32(5).unwrap();
        output.write_field_end().unwrap();
        output
            .write_field_begin(&FieldHeader::new("y", WireKind::I32, 2))
            .unwrap();
        output.write_i32(7).unwrap();
        output.write_field_end().unwrap();
        output.write_field_stop().unwrap();
        output.write_struct_end().unwrap();

        assert_eq!(
            output.as_slice(),
            &[8, 0, 1, 0, 0, 0, 5, 8, 0, 2, 0, 0, 0, 7, 0]
        );
    }

    #[test]
    fn test_message_header_roundtrip() {
        let mut output = BinaryOutput::new();
        let header = MessageHeader::new("ping", MessageKind::Call, 9);
        output.write_message_begin(&header).unwrap();
        assert_eq!(&output.as_slice()[..4], &[0x80, 0x01, 0x00, 0x01]);

        let mut input = BinaryInput::new(output.into_bytes());
        assert_eq!(input.read_message_begin().unwrap(), header);
    }

    #[test]
    fn test_bad_version_rejected() {
        let mut input = BinaryInput::new(vec![0x00, 0x00, 0x00, 0x04, b'p', b'i', b'n', b'g']);
        let err = input.read_message_begin().unwrap_err();
        assert_eq!(err.protocol_kind(), Some(ProtocolErrorKind::BadVersion));
    }

    #[test]
    fn test_negative_size_rejected() {
        let mut input = BinaryInput::new(vec![8, 0xff, 0xff, 0xff, 0xff]);
        let err = input.read_list_begin().unwrap_err();
        assert_eq!(err.protocol_kind(), Some(ProtocolErrorKind::NegativeSize));
    }

    #[test]
    fn test_invalid_utf8_rejected() {
        let mut input = BinaryInput::new(vec![0, 0, 0, 2, 0xc3, 0x28]);
        let err = input.read_string().unwrap_err();
        assert_eq!(err.protocol_kind(), Some(ProtocolErrorKind::InvalidData));
    }

    #[test]
    fn test_scalars() {
        let mut output = BinaryOutput::with_capacity(64);
        output.write_bool(true).unwrap();
        output.write_byte(-3).unwrap();
        output.write_i16(-300).unwrap();
        output.write_i64(1 << 40).unwrap();
        output.write_double(2.25).unwrap();
        output.write_string("héllo").unwrap();

        let mut input = BinaryInput::new(output.take());
        assert!(input.read_bool().unwrap());
        assert_eq!(input.read_byte().unwrap(), -3);
        assert_eq!(input.read_i16().unwrap(), -300);
        assert_eq!(input.read_i64().unwrap(), 1 << 40);
        assert_eq!(input.read_double().unwrap(), 2.25);
        assert_eq!(input.read_string().unwrap(), "héllo");
        assert_eq!(input.remaining(), 0);
        assert!(output.is_empty());
    }

    #[test]
    fn test_field_stop_has_no_id() {
        let mut input = BinaryInput::new(vec![0]);
        assert!(input.read_field_begin().unwrap().is_stop());
        assert_eq!(input.remaining(), 0);
    }
}
