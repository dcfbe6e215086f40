//! Wire-level kinds and envelope headers.
//!
//! This module provides:
//! - [`WireKind`] - the tag identifying a value's encoded shape
//! - [`MessageKind`] - the kind carried by a message envelope
//! - [`MessageHeader`], [`FieldHeader`] - message and struct field envelopes
//! - [`ListHeader`], [`SetHeader`], [`MapHeader`] - container envelopes

use std::fmt;

/// Encoded shape of a value as seen on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum WireKind {
    /// Struct terminator.
    Stop = 0,
    /// No value.
    Void = 1,
    /// Boolean.
    Bool = 2,
    /// Signed 8-bit integer.
    Byte = 3,
    /// 64-bit floating point.
    Double = 4,
    /// Signed 16-bit integer.
    I16 = 6,
    /// Signed 32-bit integer.
    I32 = 8,
    /// Signed 64-bit integer.
    I64 = 10,
    /// Length-prefixed UTF-8 string.
    String = 11,
    /// Field records terminated by [`WireKind::Stop`].
    Struct = 12,
    /// Key/value pairs.
    Map = 13,
    /// Unique elements.
    Set = 14,
    /// Ordered elements.
    List = 15,
}

impl WireKind {
    /// Returns the wire tag byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decodes a wire tag byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Stop),
            1 => Some(Self::Void),
            2 => Some(Self::Bool),
            3 => Some(Self::Byte),
            4 => Some(Self::Double),
            6 => Some(Self::I16),
            8 => Some(Self::I32),
            10 => Some(Self::I64),
            11 => Some(Self::String),
            12 => Some(Self::Struct),
            13 => Some(Self::Map),
            14 => Some(Self::Set),
            15 => Some(Self::List),
            _ => None,
        }
    }

    /// Returns true for list, set and map.
    #[must_use]
    pub const fn is_container(self) -> bool {
        matches!(self, Self::List | Self::Set | Self::Map)
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Stop => "STOP",
            Self::Void => "VOID",
            Self::Bool => "BOOL",
            Self::Byte => "BYTE",
            Self::Double => "DOUBLE",
            Self::I16 => "I16",
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::String => "STRING",
            Self::Struct => "STRUCT",
            Self::Map => "MAP",
            Self::Set => "SET",
            Self::List => "LIST",
        };
        f.write_str(name)
    }
}

/// Kind of a message envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageKind {
    /// Request expecting a reply.
    Call = 1,
    /// Reply carrying a result struct.
    Reply = 2,
    /// Reply carrying an [`ApplicationException`](crate::ApplicationException).
    Exception = 3,
    /// Request with no reply.
    Oneway = 4,
}

impl MessageKind {
    /// Returns the wire tag byte.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Decodes a wire tag byte.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Call),
            2 => Some(Self::Reply),
            3 => Some(Self::Exception),
            4 => Some(Self::Oneway),
            _ => None,
        }
    }
}

/// Message envelope: function name, kind and sequence id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageHeader {
    /// Function name.
    pub name: String,
    /// Message kind.
    pub kind: MessageKind,
    /// Per-connection sequence id.
    pub seq_id: i32,
}

impl MessageHeader {
    /// Creates a new message header.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: MessageKind, seq_id: i32) -> Self {
        Self {
            name: name.into(),
            kind,
            seq_id,
        }
    }
}

/// Struct field record header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldHeader {
    /// Field name hint. Binary encodings do not carry it and read back an empty string.
    pub name: String,
    /// Wire kind of the value that follows.
    pub kind: WireKind,
    /// Field id.
    pub id: i16,
}

impl FieldHeader {
    /// Creates a new field header.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: WireKind, id: i16) -> Self {
        Self {
            name: name.into(),
            kind,
            id,
        }
    }

    /// Header marking the end of a struct.
    #[must_use]
    pub fn stop() -> Self {
        Self::new("", WireKind::Stop, 0)
    }

    /// Returns true if this header terminates the struct.
    #[must_use]
    pub fn is_stop(&self) -> bool {
        self.kind == WireKind::Stop
    }
}

/// List envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListHeader {
    /// Wire kind of every element.
    pub element_kind: WireKind,
    /// Number of elements.
    pub size: u32,
}

impl ListHeader {
    /// Creates a new list header.
    #[must_use]
    pub const fn new(element_kind: WireKind, size: u32) -> Self {
        Self { element_kind, size }
    }
}

/// Set envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetHeader {
    /// Wire kind of every element.
    pub element_kind: WireKind,
    /// Number of elements.
    pub size: u32,
}

impl SetHeader {
    /// Creates a new set header.
    #[must_use]
    pub const fn new(element_kind: WireKind, size: u32) -> Self {
        Self { element_kind, size }
    }
}

/// Map envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapHeader {
    /// Wire kind of every key.
    pub key_kind: WireKind,
    /// Wire kind of every value.
    pub value_kind: WireKind,
    /// Number of entries.
    pub size: u32,
}

impl MapHeader {
    /// Creates a new map header.
    #[must_use]
    pub const fn new(key_kind: WireKind, value_kind: WireKind, size: u32) -> Self {
        Self {
            key_kind,
            value_kind,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_kind_tags() {
        for kind in [
            WireKind::Stop,
            WireKind::Void,
            WireKind::Bool,
            WireKind::Byte,
            WireKind::Double,
            WireKind::I16,
            WireKind::I32,
            WireKind::I64,
            WireKind::String,
            WireKind::Struct,
            WireKind::Map,
            WireKind::Set,
            WireKind::List,
        ] {
            assert_eq!(WireKind::from_u8(kind.as_u8()), Some(kind));
        }
        assert_eq!(WireKind::from_u8(5), None);
        assert_eq!(WireKind::from_u8(16), None);
    }

    #[test]
    fn test_wire_kind_is_container() {
        assert!(WireKind::List.is_container());
        assert!(WireKind::Map.is_container());
        assert!(!WireKind::Struct.is_container());
    }

    #[test]
    fn test_message_kind_tags() {
        assert_eq!(MessageKind::from_u8(1), Some(MessageKind::Call));
        assert_eq!(MessageKind::from_u8(4), Some(MessageKind::Oneway));
        assert_eq!(MessageKind::from_u8(0), None);
        assert_eq!(MessageKind::Exception.as_u8(), 3);
    }

    #[test]
    fn test_field_header_stop() {
        assert!(FieldHeader::stop().is_stop());
        assert!(!FieldHeader::new("x", WireKind::I32, 1).is_stop());
    }

    #[test]
    fn test_wire_kind_display() {
        assert_eq!(WireKind::Struct.to_string(), "STRUCT");
        assert_eq!(WireKind::I64.to_string(), "I64");
    }
}
