//! Generic application exception carried in `Exception` replies.

use crate::error::Result;
use crate::protocol::{InputProtocol, OutputProtocol};
use crate::wire::{FieldHeader, WireKind};
use std::fmt;

/// Category of an [`ApplicationException`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(i32)]
pub enum ApplicationExceptionKind {
    /// Unclassified failure.
    #[default]
    Unknown = 0,
    /// The processor has no handler for the called function.
    UnknownMethod = 1,
    /// The message kind was not valid in context.
    InvalidMessageType = 2,
    /// The reply named a different function.
    WrongMethodName = 3,
    /// The reply carried an unexpected sequence id.
    BadSequenceId = 4,
    /// A reply for a non-void function carried no result.
    MissingResult = 5,
    /// The server failed internally.
    InternalError = 6,
    /// The server could not decode the request.
    ProtocolError = 7,
}

impl ApplicationExceptionKind {
    /// Decodes the wire value, mapping unknown codes to [`Self::Unknown`].
    #[must_use]
    pub const fn from_i32(value: i32) -> Self {
        match value {
            1 => Self::UnknownMethod,
            2 => Self::InvalidMessageType,
            3 => Self::WrongMethodName,
            4 => Self::BadSequenceId,
            5 => Self::MissingResult,
            6 => Self::InternalError,
            7 => Self::ProtocolError,
            _ => Self::Unknown,
        }
    }

    /// Returns the wire value.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Application-level exception.
///
/// # Wire Format
/// A struct with `1: string message` and `2: i32 type`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationException {
    /// Human readable message.
    pub message: String,
    /// Exception category.
    pub kind: ApplicationExceptionKind,
}

impl ApplicationException {
    /// Struct name used on the wire.
    pub const NAME: &'static str = "ApplicationException";

    /// Creates a new application exception.
    #[must_use]
    pub fn new(kind: ApplicationExceptionKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    /// Decodes an exception struct. Unknown fields are skipped.
    pub fn read<P: InputProtocol + ?Sized>(input: &mut P) -> Result<Self> {
        let mut this = Self::default();
        input.read_struct_begin()?;
        loop {
            let field = input.read_field_begin()?;
            if field.is_stop() {
                break;
            }
            match (field.id, field.kind) {
                (1, WireKind::String) => this.message = input.read_string()?,
                (2, WireKind::I32) => {
                    this.kind = ApplicationExceptionKind::from_i32(input.read_i32()?);
                }
                _ => input.skip(field.kind)?,
            }
            input.read_field_end()?;
        }
        input.read_struct_end()?;
        Ok(this)
    }

    /// Encodes the exception struct.
    pub fn write<P: OutputProtocol + ?Sized>(&self, output: &mut P) -> Result<()> {
        output.write_struct_begin(Self::NAME)?;
        output.write_field_begin(&FieldHeader::new("message", WireKind::String, 1))?;
        output.write_string(&self.message)?;
        output.write_field_end()?;
        output.write_field_begin(&FieldHeader::new("type", WireKind::I32, 2))?;
        output.write_i32(self.kind.as_i32())?;
        output.write_field_end()?;
        output.write_field_stop()?;
        output.write_struct_end()
    }
}

impl fmt::Display for ApplicationException {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApplicationException {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binary::{BinaryInput, BinaryOutput};

    #[test]
    fn test_exception_roundtrip() {
        let x = ApplicationException::new(
            ApplicationExceptionKind::UnknownMethod,
            "Function frobnicate not implemented.",
        );
        let mut output = BinaryOutput::new();
        x.write(&mut output).unwrap();
        let mut input = BinaryInput::new(output.into_bytes());
        assert_eq!(ApplicationException::read(&mut input).unwrap(), x);
    }

    #[test]
    fn test_kind_from_unknown_code() {
        assert_eq!(
            ApplicationExceptionKind::from_i32(99),
            ApplicationExceptionKind::Unknown
        );
        assert_eq!(
            ApplicationExceptionKind::from_i32(5),
            ApplicationExceptionKind::MissingResult
        );
    }

    #[test]
    fn test_display() {
        let x = ApplicationException::new(ApplicationExceptionKind::MissingResult, "add failed");
        assert_eq!(x.to_string(), "MissingResult: add failed");
    }
}
