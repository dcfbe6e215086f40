//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types and traits.
//!
//! ```ignore
//! use ironidl::prelude::*;
//! ```

// Runtime types
pub use ironidl_core::{
    ApplicationException, ApplicationExceptionKind, BinaryInput, BinaryOutput, ClientChannel,
    Double, Error as RuntimeError, InputProtocol, OutputProtocol, Processor,
    Result as RuntimeResult,
};

// Schema types
pub use ironidl_schema::{
    ConstDef, ConstValue, EnumDef, Field, FunctionDef, Schema, SchemaError, ServiceDef,
    StructDef, Type, TypedefDef, validate_schema,
};

// Code generation
pub use ironidl_codegen::{
    CodegenError, DirectorySink, Emitter, Generator, MemorySink, OutputSink, RustEmitter,
    RustOptions, XsdEmitter, XsdOptions, generate_rust, generate_xsd, write_rust,
};
