//! # IronIDL Core
//!
//! Runtime protocol interface for code generated by `ironidl-codegen`.
//!
//! This crate provides:
//! - Wire kinds, message kinds and the envelope headers ([`WireKind`], [`MessageKind`])
//! - The [`InputProtocol`] / [`OutputProtocol`] traits generated code reads and writes through
//! - A strict big-endian binary protocol ([`BinaryInput`], [`BinaryOutput`])
//! - [`ApplicationException`] for protocol-level failures reported to clients
//! - The [`Processor`] dispatch trait and the [`ClientChannel`] client scaffolding
//! - [`Double`], a totally ordered `f64` for keyed containers

pub mod binary;
pub mod client;
pub mod double;
pub mod error;
pub mod exception;
pub mod processor;
pub mod protocol;
pub mod wire;

pub use binary::{BinaryInput, BinaryOutput};
pub use client::ClientChannel;
pub use double::Double;
pub use error::{Error, ProtocolErrorKind, Result, UserError};
pub use exception::{ApplicationException, ApplicationExceptionKind};
pub use processor::{Processor, capture};
pub use protocol::{InputProtocol, MAX_SKIP_DEPTH, OutputProtocol};
pub use wire::{FieldHeader, ListHeader, MapHeader, MessageHeader, MessageKind, SetHeader, WireKind};
