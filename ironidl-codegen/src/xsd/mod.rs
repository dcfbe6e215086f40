//! XSD structural emitter.
//!
//! Produces one `<Service>.xsd` document per service. Each document repeats
//! every typedef and struct of the schema as named types, then declares a
//! `<function>_response` element per function and one element per distinct
//! declared exception.

pub mod elements;

pub use elements::{Occurs, XsdWriter, type_name};

use crate::emitter::Emitter;
use crate::error::CodegenError;
use crate::options::XsdOptions;
use crate::output::OutputUnit;
use elements::{write_element, write_schema_start, write_struct, write_typedef};
use ironidl_schema::{ConstDef, EnumDef, Schema, ServiceDef, StructDef, Type, TypedefDef};
use std::collections::BTreeMap;

/// Emitter producing XSD documents.
pub struct XsdEmitter {
    options: XsdOptions,
    typedefs: Vec<TypedefDef>,
    structs: Vec<StructDef>,
    units: Vec<OutputUnit>,
}

impl XsdEmitter {
    /// Creates a new XSD emitter.
    #[must_use]
    pub fn new(options: XsdOptions) -> Self {
        Self {
            options,
            typedefs: Vec::new(),
            structs: Vec::new(),
            units: Vec::new(),
        }
    }

    fn render_service(&self, schema: &Schema, service: &ServiceDef) -> Result<String, CodegenError> {
        let mut w = XsdWriter::new(self.options.get_indent());
        write_schema_start(&mut w, schema.xsd_namespace.as_deref())?;
        w.comment(&format!(
            "Generated by ironidl from schema {}. Do not edit.",
            schema.name
        ))?;

        for typedef in &self.typedefs {
            write_typedef(&mut w, typedef)?;
        }
        for def in &self.structs {
            write_struct(&mut w, def)?;
        }

        let mut exceptions: BTreeMap<&str, Type> = BTreeMap::new();
        for function in &service.functions {
            write_element(
                &mut w,
                &format!("{}_response", function.name),
                &function.return_type,
                None,
                Occurs::default(),
            )?;
            for field in &function.exceptions.fields {
                exceptions.insert(field.name.as_str(), field.ty.clone());
            }
        }
        for (name, ty) in &exceptions {
            write_element(&mut w, name, ty, None, Occurs::default())?;
        }

        w.end("xsd:schema")?;
        w.into_string()
    }
}

impl Default for XsdEmitter {
    fn default() -> Self {
        Self::new(XsdOptions::default())
    }
}

impl Emitter for XsdEmitter {
    fn name(&self) -> &'static str {
        "xsd"
    }

    fn open(&mut self, _schema: &Schema) -> Result<(), CodegenError> {
        self.typedefs.clear();
        self.structs.clear();
        self.units.clear();
        Ok(())
    }

    fn emit_typedef(&mut self, _schema: &Schema, typedef: &TypedefDef) -> Result<(), CodegenError> {
        self.typedefs.push(typedef.clone());
        Ok(())
    }

    fn emit_enum(&mut self, _schema: &Schema, _enum_def: &EnumDef) -> Result<(), CodegenError> {
        // Enums are referenced as xsd:int.
        Ok(())
    }

    fn emit_const(&mut self, _schema: &Schema, _constant: &ConstDef) -> Result<(), CodegenError> {
        Ok(())
    }

    fn emit_struct(&mut self, _schema: &Schema, struct_def: &StructDef) -> Result<(), CodegenError> {
        self.structs.push(struct_def.clone());
        Ok(())
    }

    fn emit_service(&mut self, schema: &Schema, service: &ServiceDef) -> Result<(), CodegenError> {
        let contents = self.render_service(schema, service)?;
        self.units
            .push(OutputUnit::new(format!("{}.xsd", service.name), contents));
        Ok(())
    }

    fn close(&mut self, _schema: &Schema) -> Result<Vec<OutputUnit>, CodegenError> {
        Ok(std::mem::take(&mut self.units))
    }
}
