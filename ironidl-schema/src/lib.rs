//! # IronIDL Schema
//!
//! Immutable schema model consumed by the IronIDL generators.
//!
//! This crate provides:
//! - The [`Type`] sum over every IDL type kind and typedef resolution
//! - Typedef, enum, constant, struct, exception and service definitions
//! - Constant value literals ([`ConstValue`])
//! - Identifier case conversion for generated code
//! - Schema validation

pub mod error;
pub mod names;
pub mod services;
pub mod structs;
pub mod types;
pub mod validation;
pub mod value;

pub use error::SchemaError;
pub use services::{FunctionDef, ServiceDef};
pub use structs::{Field, StructDef, XsdFieldOptions};
pub use types::{ConstDef, EnumDef, EnumValue, Schema, Type, TypedefDef};
pub use validation::validate_schema;
pub use value::ConstValue;
