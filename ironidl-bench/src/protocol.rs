//! Encoding/decoding helpers shared by the protocol benchmarks.

use bytes::Bytes;
use ironidl_core::{
    BinaryInput, BinaryOutput, FieldHeader, InputProtocol, ListHeader, OutputProtocol, Result,
    WireKind,
};

/// Writes a struct holding an `i32` list of `len` elements and a string field.
///
/// # Errors
/// Returns any error raised by the encoder.
pub fn write_sample<P: OutputProtocol + ?Sized>(output: &mut P, len: usize) -> Result<()> {
    output.write_struct_begin("Sample")?;
    output.write_field_begin(&FieldHeader::new("values", WireKind::List, 1))?;
    output.write_list_begin(&ListHeader::new(WireKind::I32, len as u32))?;
    for i in 0..len {
        output.write_i32(i as i32)?;
    }
    output.write_list_end()?;
    output.write_field_end()?;
    output.write_field_begin(&FieldHeader::new("label", WireKind::String, 2))?;
    output.write_string("benchmark sample")?;
    output.write_field_end()?;
    output.write_field_stop()?;
    output.write_struct_end()
}

/// Encodes [`write_sample`] into a fresh buffer.
///
/// # Errors
/// Returns any error raised by the encoder.
pub fn encode_sample(len: usize) -> Result<Bytes> {
    let mut output = BinaryOutput::with_capacity(len * 4 + 64);
    write_sample(&mut output, len)?;
    Ok(output.into_bytes())
}

/// Decodes a buffer produced by [`encode_sample`] and returns the sum of
/// its list elements.
///
/// # Errors
/// Returns a protocol error on malformed input.
pub fn sum_sample(data: Bytes) -> Result<i64> {
    let mut input = BinaryInput::new(data);
    let mut sum = 0i64;
    input.read_struct_begin()?;
    loop {
        let field = input.read_field_begin()?;
        if field.is_stop() {
            break;
        }
        match (field.id, field.kind) {
            (1, WireKind::List) => {
                let list = input.read_list_begin()?;
                for _ in 0..list.size {
                    sum += i64::from(input.read_i32()?);
                }
                input.read_list_end()?;
            }
            _ => input.skip(field.kind)?,
        }
        input.read_field_end()?;
    }
    input.read_struct_end()?;
    Ok(sum)
}
