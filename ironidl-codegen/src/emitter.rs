//! The emitter abstraction shared by every backend.

use crate::error::CodegenError;
use crate::output::OutputUnit;
use ironidl_schema::{ConstDef, EnumDef, Schema, ServiceDef, StructDef, TypedefDef};

/// Backend rendering a schema traversal into one target representation.
///
/// The [`Generator`](crate::Generator) calls [`Emitter::open`], then one
/// `emit_*` method per definition in the order typedefs, enums, constants,
/// structs and exceptions, services, and finally [`Emitter::close`].
/// Emitters must not assume they are reused; `open` resets any state.
pub trait Emitter {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Starts a generation pass for `schema`.
    ///
    /// # Errors
    /// Returns an error if the pass cannot start.
    fn open(&mut self, schema: &Schema) -> Result<(), CodegenError>;

    /// Emits a typedef.
    ///
    /// # Errors
    /// Returns an error if the typedef cannot be rendered.
    fn emit_typedef(&mut self, schema: &Schema, typedef: &TypedefDef) -> Result<(), CodegenError>;

    /// Emits an enum.
    ///
    /// # Errors
    /// Returns an error if the enum cannot be rendered.
    fn emit_enum(&mut self, schema: &Schema, enum_def: &EnumDef) -> Result<(), CodegenError>;

    /// Emits a named constant.
    ///
    /// # Errors
    /// Returns an error if the constant's value cannot be rendered.
    fn emit_const(&mut self, schema: &Schema, constant: &ConstDef) -> Result<(), CodegenError>;

    /// Emits a struct.
    ///
    /// # Errors
    /// Returns an error if the struct cannot be rendered.
    fn emit_struct(&mut self, schema: &Schema, struct_def: &StructDef) -> Result<(), CodegenError>;

    /// Emits an exception. Defaults to [`Emitter::emit_struct`].
    ///
    /// # Errors
    /// Returns an error if the exception cannot be rendered.
    fn emit_exception(
        &mut self,
        schema: &Schema,
        exception: &StructDef,
    ) -> Result<(), CodegenError> {
        self.emit_struct(schema, exception)
    }

    /// Emits a service.
    ///
    /// # Errors
    /// Returns an error if the service cannot be rendered.
    fn emit_service(&mut self, schema: &Schema, service: &ServiceDef) -> Result<(), CodegenError>;

    /// Finishes the pass and returns the generated units.
    ///
    /// # Errors
    /// Returns an error if the units cannot be assembled.
    fn close(&mut self, schema: &Schema) -> Result<Vec<OutputUnit>, CodegenError>;
}
