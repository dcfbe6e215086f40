//! Protocol traits the generated code reads and writes through.
//!
//! Both traits are object safe so processors can dispatch over
//! `&mut dyn InputProtocol` / `&mut dyn OutputProtocol` while structs keep
//! generic `read`/`write` methods.

use crate::error::{Error, ProtocolErrorKind, Result};
use crate::wire::{FieldHeader, ListHeader, MapHeader, MessageHeader, SetHeader, WireKind};

/// Maximum nesting depth accepted by [`InputProtocol::skip`].
pub const MAX_SKIP_DEPTH: usize = 64;

/// Encoder side of a protocol.
pub trait OutputProtocol {
    /// Writes a message envelope header.
    fn write_message_begin(&mut self, header: &MessageHeader) -> Result<()>;
    /// Closes a message envelope.
    fn write_message_end(&mut self) -> Result<()>;
    /// Opens a struct. The name is a hint some encodings ignore.
    fn write_struct_begin(&mut self, name: &str) -> Result<()>;
    /// Closes a struct.
    fn write_struct_end(&mut self) -> Result<()>;
    /// Writes a field record header.
    fn write_field_begin(&mut self, header: &FieldHeader) -> Result<()>;
    /// Closes a field record.
    fn write_field_end(&mut self) -> Result<()>;
    /// Writes the struct terminator.
    fn write_field_stop(&mut self) -> Result<()>;
    /// Writes a list header.
    fn write_list_begin(&mut self, header: &ListHeader) -> Result<()>;
    /// Closes a list.
    fn write_list_end(&mut self) -> Result<()>;
    /// Writes a set header.
    fn write_set_begin(&mut self, header: &SetHeader) -> Result<()>;
    /// Closes a set.
    fn write_set_end(&mut self) -> Result<()>;
    /// Writes a map header.
    fn write_map_begin(&mut self, header: &MapHeader) -> Result<()>;
    /// Closes a map.
    fn write_map_end(&mut self) -> Result<()>;
    /// Writes a boolean.
    fn write_bool(&mut self, value: bool) -> Result<()>;
    /// Writes a signed byte.
    fn write_byte(&mut self, value: i8) -> Result<()>;
    /// Writes a 16-bit integer.
    fn write_i16(&mut self, value: i16) -> Result<()>;
    /// Writes a 32-bit integer.
    fn write_i32(&mut self, value: i32) -> Result<()>;
    /// Writes a 64-bit integer.
    fn write_i64(&mut self, value: i64) -> Result<()>;
    /// Writes a double.
    fn write_double(&mut self, value: f64) -> Result<()>;
    /// Writes a string.
    fn write_string(&mut self, value: &str) -> Result<()>;
    /// Flushes buffered output to the transport.
    fn flush(&mut self) -> Result<()>;
}

/// Decoder side of a protocol.
pub trait InputProtocol {
    /// Reads a message envelope header.
    fn read_message_begin(&mut self) -> Result<MessageHeader>;
    /// Consumes the end of a message envelope.
    fn read_message_end(&mut self) -> Result<()>;
    /// Opens a struct and returns its name hint.
    fn read_struct_begin(&mut self) -> Result<String>;
    /// Consumes the end of a struct.
    fn read_struct_end(&mut self) -> Result<()>;
    /// Reads a field record header. A [`WireKind::Stop`] kind ends the struct.
    fn read_field_begin(&mut self) -> Result<FieldHeader>;
    /// Consumes the end of a field record.
    fn read_field_end(&mut self) -> Result<()>;
    /// Reads a list header.
    fn read_list_begin(&mut self) -> Result<ListHeader>;
    /// Consumes the end of a list.
    fn read_list_end(&mut self) -> Result<()>;
    /// Reads a set header.
    fn read_set_begin(&mut self) -> Result<SetHeader>;
    /// Consumes the end of a set.
    fn read_set_end(&mut self) -> Result<()>;
    /// Reads a map header.
    fn read_map_begin(&mut self) -> Result<MapHeader>;
    /// Consumes the end of a map.
    fn read_map_end(&mut self) -> Result<()>;
    /// Reads a boolean.
    fn read_bool(&mut self) -> Result<bool>;
    /// Reads a signed byte.
    fn read_byte(&mut self) -> Result<i8>;
    /// Reads a 16-bit integer.
    fn read_i16(&mut self) -> Result<i16>;
    /// Reads a 32-bit integer.
    fn read_i32(&mut self) -> Result<i32>;
    /// Reads a 64-bit integer.
    fn read_i64(&mut self) -> Result<i64>;
    /// Reads a double.
    fn read_double(&mut self) -> Result<f64>;
    /// Reads a string.
    fn read_string(&mut self) -> Result<String>;

    /// Consumes one value of the given wire kind without decoding it.
    ///
    /// Used for unknown field ids and kind mismatches. Nesting deeper than
    /// [`MAX_SKIP_DEPTH`] fails with [`ProtocolErrorKind::DepthLimit`].
    fn skip(&mut self, kind: WireKind) -> Result<()> {
        skip_value(self, kind, MAX_SKIP_DEPTH)
    }
}

fn skip_value<P: InputProtocol + ?Sized>(input: &mut P, kind: WireKind, depth: usize) -> Result<()> {
    if depth == 0 {
        return Err(Error::protocol(
            ProtocolErrorKind::DepthLimit,
            format!("skip exceeded {MAX_SKIP_DEPTH} nested levels"),
        ));
    }
    match kind {
        WireKind::Bool => input.read_bool().map(drop),
        WireKind::Byte => input.read_byte().map(drop),
        WireKind::I16 => input.read_i16().map(drop),
        WireKind::I32 => input.read_i32().map(drop),
        WireKind::I64 => input.read_i64().map(drop),
        WireKind::Double => input.read_double().map(drop),
        WireKind::String => input.read_string().map(drop),
        WireKind::Struct => {
            input.read_struct_begin()?;
            loop {
                let field = input.read_field_begin()?;
                if field.is_stop() {
                    break;
                }
                skip_value(input, field.kind, depth - 1)?;
                input.read_field_end()?;
            }
            input.read_struct_end()
        }
        WireKind::List => {
            let header = input.read_list_begin()?;
            for _ in 0..header.size {
                skip_value(input, header.element_kind, depth - 1)?;
            }
            input.read_list_end()
        }
        WireKind::Set => {
            let header = input.read_set_begin()?;
            for _ in 0..header.size {
                skip_value(input, header.element_kind, depth - 1)?;
            }
            input.read_set_end()
        }
        WireKind::Map => {
            let header = input.read_map_begin()?;
            for _ in 0..header.size {
                skip_value(input, header.key_kind, depth - 1)?;
                skip_value(input, header.value_kind, depth - 1)?;
            }
            input.read_map_end()
        }
        WireKind::Stop | WireKind::Void => Err(Error::protocol(
            ProtocolErrorKind::InvalidData,
            format!("cannot skip a value of kind {kind}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{BinaryInput, BinaryOutput};

    #[test]
    fn test_skip_nested_struct() {
        let mut output = BinaryOutput::new();
        output.write_struct_begin("Outer").unwrap();
        output
            .write_field_begin(&FieldHeader::new("names", WireKind::List, 1))
            .unwrap();
        output
            .write_list_begin(&ListHeader::new(WireKind::String, 2))
            .unwrap();
        output.write_string("a").unwrap();
        output.write_string("b").unwrap();
        output.write_list_end().unwrap();
        output.write_field_end().unwrap();
        output
            .write_field_begin(&FieldHeader::new("scores", WireKind::Map, 2))
            .unwrap();
        output
            .write_map_begin(&MapHeader::new(WireKind::I32, WireKind::Double, 1))
            .unwrap();
        output.write_i32(7).unwrap();
        output.write_double(1.5).unwrap();
        output.write_map_end().unwrap();
        output.write_field_end().unwrap();
        output.write_field_stop().unwrap();
        output.write_struct_end().unwrap();
        output.write_i32(42).unwrap();

        let mut input = BinaryInput::new(output.into_bytes());
        input.skip(WireKind::Struct).unwrap();
        assert_eq!(input.read_i32().unwrap(), 42);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_skip_rejects_stop() {
        let mut input = BinaryInput::new(Vec::new());
        let err = input.skip(WireKind::Stop).unwrap_err();
        assert_eq!(err.protocol_kind(), Some(ProtocolErrorKind::InvalidData));
    }

    #[test]
    fn test_skip_depth_limit() {
        // Each level is a list holding one list.
        let mut output = BinaryOutput::new();
        for _ in 0..=MAX_SKIP_DEPTH {
            output
                .write_list_begin(&ListHeader::new(WireKind::List, 1))
                .unwrap();
        }
        let mut input = BinaryInput::new(output.into_bytes());
        let err = input.skip(WireKind::List).unwrap_err();
        assert_eq!(err.protocol_kind(), Some(ProtocolErrorKind::DepthLimit));
    }

    #[test]
    fn test_skip_truncated_input() {
        let mut input = BinaryInput::new(vec![0u8, 0]);
        let err = input.skip(WireKind::I64).unwrap_err();
        assert_eq!(err.protocol_kind(), Some(ProtocolErrorKind::UnexpectedEof));
    }
}
