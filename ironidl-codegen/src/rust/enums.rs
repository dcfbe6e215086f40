//! Enum and typedef generation.

use crate::options::RustOptions;
use crate::rust::types::rust_type;
use crate::writer::CodeWriter;
use ironidl_schema::names::{const_ident, type_ident};
use ironidl_schema::{EnumDef, TypedefDef};

/// Generates enums as open newtypes over `i32`.
///
/// Unknown discriminants received on the wire stay representable; named
/// constants exist for every declared value.
pub struct EnumGenerator<'a> {
    options: &'a RustOptions,
}

impl<'a> EnumGenerator<'a> {
    /// Creates a new enum generator.
    #[must_use]
    pub fn new(options: &'a RustOptions) -> Self {
        Self { options }
    }

    /// Writes the newtype, its constants, and conversions.
    pub fn generate(&self, w: &mut CodeWriter, enum_def: &EnumDef) {
        let name = type_ident(&enum_def.name);
        let values = enum_def.resolved_values();

        if self.options.has_docs() {
            w.doc("///", &format!("Enum `{}`.", enum_def.name));
        }
        w.line("#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]");
        w.line(&format!("pub struct {name}(pub i32);"));
        w.blank();

        w.line(&format!("impl {name} {{"));
        w.indent();
        for (value_name, value) in &values {
            w.line(&format!(
                "pub const {}: Self = Self({value});",
                const_ident(value_name)
            ));
        }
        if !values.is_empty() {
            w.blank();
        }
        if self.options.has_docs() {
            w.doc("///", "Every declared value with its name.");
        }
        w.line("pub const VALUES: &'static [(&'static str, Self)] = &[");
        w.indent();
        for (value_name, _) in &values {
            w.line(&format!("({value_name:?}, Self::{}),", const_ident(value_name)));
        }
        w.dedent();
        w.line("];");
        w.blank();
        if self.options.has_docs() {
            w.doc("///", "Returns the declared name of this value, if any.");
        }
        w.line("pub fn name(self) -> Option<&'static str> {");
        w.indent();
        w.line("Self::VALUES");
        w.indent();
        w.line(".iter()");
        w.line(".find(|(_, v)| *v == self)");
        w.line(".map(|(n, _)| *n)");
        w.dedent();
        w.dedent();
        w.line("}");
        w.dedent();
        w.line("}");
        w.blank();

        w.line(&format!("impl From<i32> for {name} {{"));
        w.indent();
        w.line("fn from(value: i32) -> Self {");
        w.line("    Self(value)");
        w.line("}");
        w.dedent();
        w.line("}");
        w.blank();

        w.line(&format!("impl From<{name}> for i32 {{"));
        w.indent();
        w.line(&format!("fn from(value: {name}) -> Self {{"));
        w.line("    value.0");
        w.line("}");
        w.dedent();
        w.line("}");
        w.blank();
    }

    /// Writes a typedef as a type alias.
    pub fn generate_typedef(&self, w: &mut CodeWriter, typedef: &TypedefDef) {
        if self.options.has_docs() {
            match &typedef.string_enum {
                Some(values) => w.doc(
                    "///",
                    &format!(
                        "Typedef `{}`, restricted to: {}.",
                        typedef.name,
                        values.join(", ")
                    ),
                ),
                None => w.doc("///", &format!("Typedef `{}`.", typedef.name)),
            }
        }
        w.line(&format!(
            "pub type {} = {};",
            type_ident(&typedef.name),
            rust_type(&typedef.target)
        ));
        w.blank();
    }
}
