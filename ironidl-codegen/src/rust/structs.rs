//! Struct and exception generation.
//!
//! This module provides:
//! - The struct definition with one optional member per field
//! - A `Default` impl applying declared field defaults
//! - An `absent` constructor and `read_new`, which decodes into it so fields
//!   missing on the wire stay `None`
//! - Field-id dispatched `read` and declaration-ordered `write`
//! - `Display` and `Error` impls for exceptions

use crate::error::CodegenError;
use crate::options::RustOptions;
use crate::rust::consts::ConstRenderer;
use crate::rust::containers::{generate_deserialize, generate_serialize};
use crate::rust::types::{contains_void, rust_type, wire_kind_expr};
use crate::writer::CodeWriter;
use ironidl_schema::names::{field_ident, type_ident};
use ironidl_schema::{Schema, SchemaError, StructDef};

/// Generator for struct codecs.
pub struct StructGenerator<'a> {
    schema: &'a Schema,
    options: &'a RustOptions,
}

impl<'a> StructGenerator<'a> {
    /// Creates a new struct generator.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a RustOptions) -> Self {
        Self { schema, options }
    }

    /// Generates the full struct: definition, `Default`, `read` and `write`.
    ///
    /// # Errors
    /// Returns `SchemaError::VoidField` for a field whose type is or contains
    /// void, or any error rendering a field default.
    pub fn generate(&self, w: &mut CodeWriter, def: &StructDef) -> Result<(), CodegenError> {
        for field in &def.fields {
            if contains_void(&field.ty) {
                return Err(SchemaError::void_field(def.name.as_str(), field.name.as_str()).into());
            }
        }

        let name = type_ident(&def.name);
        self.generate_definition(w, def, &name);
        self.generate_default(w, def, &name)?;

        w.block::<CodegenError, _>(&format!("impl {name}"), "", |w| {
            w.line(&format!("pub const NAME: &'static str = {:?};", def.name));
            w.blank();
            self.generate_absent(w, def)?;
            w.blank();
            self.generate_read_new(w)?;
            w.blank();
            self.generate_read(w, def)?;
            w.blank();
            self.generate_write(w, def)
        })?;
        w.blank();

        if def.is_exception {
            generate_error_impls(w, &name);
        }
        Ok(())
    }

    fn generate_definition(&self, w: &mut CodeWriter, def: &StructDef, name: &str) {
        if self.options.has_docs() {
            let kind = if def.is_exception { "Exception" } else { "Struct" };
            w.doc("///", &format!("{kind} `{}`.", def.name));
        }
        w.line("#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]");
        w.line(&format!("pub struct {name} {{"));
        w.indent();
        for field in &def.fields {
            if self.options.has_docs() {
                w.doc("///", &format!("Field {}: `{}`.", field.id, field.ty));
            }
            w.line(&format!(
                "pub {}: Option<{}>,",
                field_ident(&field.name),
                rust_type(&field.ty)
            ));
        }
        w.dedent();
        w.line("}");
        w.blank();
    }

    fn generate_default(
        &self,
        w: &mut CodeWriter,
        def: &StructDef,
        name: &str,
    ) -> Result<(), CodegenError> {
        let renderer = ConstRenderer::new(self.schema);
        w.block::<CodegenError, _>(&format!("impl Default for {name}"), "", |w| {
            w.block::<CodegenError, _>("fn default() -> Self", "", |w| {
                if def.fields.is_empty() {
                    w.line("Self {}");
                    return Ok(());
                }
                w.block::<CodegenError, _>("Self", "", |w| {
                    for field in &def.fields {
                        let value = match &field.default {
                            Some(value) => format!("Some({})", renderer.render(&field.ty, value)?),
                            None => "None".to_string(),
                        };
                        w.line(&format!("{}: {value},", field_ident(&field.name)));
                    }
                    Ok(())
                })
            })
        })?;
        w.blank();
        Ok(())
    }

    fn generate_absent(&self, w: &mut CodeWriter, def: &StructDef) -> Result<(), CodegenError> {
        if self.options.has_docs() {
            w.doc("///", "Returns a value with every field absent, ignoring declared defaults.");
        }
        w.block::<CodegenError, _>("pub fn absent() -> Self", "", |w| {
            if def.fields.is_empty() {
                w.line("Self {}");
                return Ok(());
            }
            w.block::<CodegenError, _>("Self", "", |w| {
                for field in &def.fields {
                    w.line(&format!("{}: None,", field_ident(&field.name)));
                }
                Ok(())
            })
        })
    }

    fn generate_read_new(&self, w: &mut CodeWriter) -> Result<(), CodegenError> {
        if self.options.has_docs() {
            w.doc("///", "Decodes a fresh value. Fields missing on the wire stay `None`.");
        }
        w.block::<CodegenError, _>(
            "pub fn read_new<P: rt::InputProtocol + ?Sized>(input: &mut P) -> rt::Result<Self>",
            "",
            |w| {
                w.line("let mut value = Self::absent();");
                w.line("value.read(input)?;");
                w.line("Ok(value)");
                Ok(())
            },
        )
    }

    fn generate_read(&self, w: &mut CodeWriter, def: &StructDef) -> Result<(), CodegenError> {
        if self.options.has_docs() {
            w.doc(
                "///",
                "Reads fields into `self`, skipping unknown or mistyped ones. Fields not on the wire keep their current value.",
            );
        }
        w.block::<CodegenError, _>(
            "pub fn read<P: rt::InputProtocol + ?Sized>(&mut self, input: &mut P) -> rt::Result<()>",
            "",
            |w| {
                w.line("input.read_struct_begin()?;");
                w.block::<CodegenError, _>("loop", "", |w| {
                    w.line("let field = input.read_field_begin()?;");
                    w.block("if field.kind == rt::WireKind::Stop", "", |w| {
                        w.line("break;");
                        Ok::<(), CodegenError>(())
                    })?;
                    if def.fields.is_empty() {
                        w.line("input.skip(field.kind)?;");
                    } else {
                        w.block::<CodegenError, _>("match field.id", "", |w| {
                            for field in &def.fields {
                                let arm = format!(
                                    "{} if field.kind == {} =>",
                                    field.id,
                                    wire_kind_expr(&field.ty)
                                );
                                w.block::<CodegenError, _>(&arm, "", |w| {
                                    let var = w.tmp("_val");
                                    generate_deserialize(w, &field.ty, &var)?;
                                    w.line(&format!(
                                        "self.{} = Some({var});",
                                        field_ident(&field.name)
                                    ));
                                    Ok(())
                                })?;
                            }
                            w.line("_ => input.skip(field.kind)?,");
                            Ok(())
                        })?;
                    }
                    w.line("input.read_field_end()?;");
                    Ok(())
                })?;
                w.line("input.read_struct_end()");
                Ok(())
            },
        )
    }

    fn generate_write(&self, w: &mut CodeWriter, def: &StructDef) -> Result<(), CodegenError> {
        if self.options.has_docs() {
            w.doc("///", "Writes every present field in declaration order.");
        }
        w.block::<CodegenError, _>(
            "pub fn write<P: rt::OutputProtocol + ?Sized>(&self, output: &mut P) -> rt::Result<()>",
            "",
            |w| {
                w.line("output.write_struct_begin(Self::NAME)?;");
                for field in &def.fields {
                    let header = format!("if let Some(value) = &self.{}", field_ident(&field.name));
                    w.block::<CodegenError, _>(&header, "", |w| {
                        w.line(&format!(
                            "output.write_field_begin(&rt::FieldHeader::new({:?}, {}, {}))?;",
                            field.name,
                            wire_kind_expr(&field.ty),
                            field.id
                        ));
                        generate_serialize(w, &field.ty, "value")?;
                        w.line("output.write_field_end()?;");
                        Ok(())
                    })?;
                }
                w.line("output.write_field_stop()?;");
                w.line("output.write_struct_end()");
                Ok(())
            },
        )
    }
}

fn generate_error_impls(w: &mut CodeWriter, name: &str) {
    w.line(&format!("impl ::std::fmt::Display for {name} {{"));
    w.indent();
    w.line("fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {");
    w.line("    write!(f, \"{}: {:?}\", Self::NAME, self)");
    w.line("}");
    w.dedent();
    w.line("}");
    w.blank();
    w.line(&format!("impl ::std::error::Error for {name} {{}}"));
    w.blank();
}
