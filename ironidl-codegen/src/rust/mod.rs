//! Rust code emitter.
//!
//! This module provides:
//! - Type mapping from schema types to Rust types
//! - Constant value rendering
//! - Enum, typedef, struct and exception generation
//! - Service interface, client and processor generation
//!
//! A pass produces one `types.rs`, one `constants.rs`, one unit per service
//! and a `mod.rs` declaring them as sibling modules.

pub mod consts;
pub mod containers;
pub mod enums;
pub mod services;
pub mod structs;
pub mod types;

pub use consts::ConstRenderer;
pub use enums::EnumGenerator;
pub use services::ServiceGenerator;
pub use structs::StructGenerator;

use crate::emitter::Emitter;
use crate::error::CodegenError;
use crate::options::RustOptions;
use crate::output::OutputUnit;
use crate::writer::CodeWriter;
use ironidl_schema::names::field_ident;
use ironidl_schema::{ConstDef, EnumDef, Schema, ServiceDef, StructDef, TypedefDef};

/// Emitter producing Rust modules that call into the `ironidl-core` runtime.
pub struct RustEmitter {
    options: RustOptions,
    types: CodeWriter,
    constants: CodeWriter,
    services: Vec<(String, CodeWriter)>,
}

impl RustEmitter {
    /// Creates a new Rust emitter.
    #[must_use]
    pub fn new(options: RustOptions) -> Self {
        Self {
            options,
            types: CodeWriter::new(),
            constants: CodeWriter::new(),
            services: Vec::new(),
        }
    }

    /// Returns the emitter options.
    #[must_use]
    pub fn options(&self) -> &RustOptions {
        &self.options
    }

    fn unit_writer(&self, schema: &Schema, imports: &[String]) -> CodeWriter {
        let mut w = CodeWriter::new();
        if self.options.has_banner() {
            w.line(&format!(
                "// Generated by ironidl from schema `{}`. Do not edit.",
                schema.name
            ));
            w.blank();
        }
        w.line("#[allow(unused_imports)]");
        w.line(&format!("use {} as rt;", self.options.get_runtime_path()));
        for import in imports {
            w.line("#[allow(unused_imports)]");
            w.line(&format!("use {import};"));
        }
        w.blank();
        w
    }
}

impl Default for RustEmitter {
    fn default() -> Self {
        Self::new(RustOptions::default())
    }
}

impl Emitter for RustEmitter {
    fn name(&self) -> &'static str {
        "rust"
    }

    fn open(&mut self, schema: &Schema) -> Result<(), CodegenError> {
        self.types = self.unit_writer(schema, &[]);
        self.constants = self.unit_writer(schema, &["super::types::*".to_string()]);
        self.services.clear();
        Ok(())
    }

    fn emit_typedef(&mut self, _schema: &Schema, typedef: &TypedefDef) -> Result<(), CodegenError> {
        EnumGenerator::new(&self.options).generate_typedef(&mut self.types, typedef);
        Ok(())
    }

    fn emit_enum(&mut self, _schema: &Schema, enum_def: &EnumDef) -> Result<(), CodegenError> {
        EnumGenerator::new(&self.options).generate(&mut self.types, enum_def);
        Ok(())
    }

    fn emit_const(&mut self, schema: &Schema, constant: &ConstDef) -> Result<(), CodegenError> {
        ConstRenderer::new(schema).generate(&mut self.constants, constant)
    }

    fn emit_struct(&mut self, schema: &Schema, struct_def: &StructDef) -> Result<(), CodegenError> {
        StructGenerator::new(schema, &self.options).generate(&mut self.types, struct_def)
    }

    fn emit_service(&mut self, schema: &Schema, service: &ServiceDef) -> Result<(), CodegenError> {
        let mut imports = vec!["super::types::*".to_string()];
        if let Some(parent) = schema.parent_of(service)? {
            imports.push(format!("super::{}::*", field_ident(&parent.name)));
        }
        let mut w = self.unit_writer(schema, &imports);
        ServiceGenerator::new(schema, &self.options).generate(&mut w, service)?;
        self.services.push((field_ident(&service.name), w));
        Ok(())
    }

    fn close(&mut self, _schema: &Schema) -> Result<Vec<OutputUnit>, CodegenError> {
        let types = std::mem::take(&mut self.types);
        let constants = std::mem::take(&mut self.constants);
        let services = std::mem::take(&mut self.services);

        let mut root = CodeWriter::new();
        root.line("pub mod types;");
        root.line("pub mod constants;");

        let mut units = Vec::with_capacity(services.len() + 3);
        units.push(OutputUnit::new("types.rs", types.into_string()));
        units.push(OutputUnit::new("constants.rs", constants.into_string()));
        for (module, w) in services {
            root.line(&format!("pub mod {module};"));
            units.push(OutputUnit::new(format!("{module}.rs"), w.into_string()));
        }
        units.push(OutputUnit::new("mod.rs", root.into_string()));
        Ok(units)
    }
}
