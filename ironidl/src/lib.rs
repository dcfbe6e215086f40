//! # IronIDL
//!
//! Backend of an interface definition language compiler.
//!
//! IronIDL takes a resolved schema (typedefs, enums, constants, structs,
//! exceptions and services) and emits Rust source that speaks a compact
//! binary protocol, plus one XSD document per service.
//!
//! ## Features
//!
//! - **Schema model** - Typed definitions with name resolution and validation
//! - **Rust codegen** - Struct codecs, service traits, clients and processors
//! - **Service inheritance** - Clients and processors chain to their parent service
//! - **XSD output** - Structural XML schema for every service
//!
//! ## Quick Start
//!
//! ```ignore
//! use ironidl::prelude::*;
//!
//! let mut schema = Schema::new("points");
//! schema.add_struct(StructDef::new("Point").field(Field::new(1, "x", Type::I32)));
//! validate_schema(&schema)?;
//!
//! write_rust(&schema, &RustOptions::default(), "src/generated")?;
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Binary protocol, client channel and processor runtime
//! - [`schema`] - Schema model, type resolution and validation
//! - [`codegen`] - Rust and XSD emitters

pub mod prelude;

/// Runtime used by generated code.
pub mod core {
    pub use ironidl_core::*;
}

/// Schema model and validation.
pub mod schema {
    pub use ironidl_schema::*;
}

/// Code generation backends.
pub mod codegen {
    pub use ironidl_codegen::*;
}
