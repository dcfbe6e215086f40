//! Constant value rendering.
//!
//! Renders literal trees as Rust expressions. Used for named constants and
//! for struct field defaults.

use crate::error::CodegenError;
use crate::rust::types::{MAP_PATH, SET_PATH, rust_type};
use crate::writer::CodeWriter;
use ironidl_schema::names::{const_ident, field_ident, type_ident};
use ironidl_schema::{ConstDef, ConstValue, Schema, SchemaError, Type};

/// Renderer for constant values of any type.
pub struct ConstRenderer<'a> {
    schema: &'a Schema,
}

impl<'a> ConstRenderer<'a> {
    /// Creates a renderer resolving struct literals against `schema`.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Renders `value` as an owned Rust expression of type `ty`.
    ///
    /// # Errors
    /// Returns `SchemaError::UnknownField` if a struct literal names a field
    /// the struct does not declare, and `Unsupported` for void values or a
    /// literal form that does not fit the type.
    pub fn render(&self, ty: &Type, value: &ConstValue) -> Result<String, CodegenError> {
        match ty.resolve() {
            Type::Void => Err(CodegenError::unsupported("constant value of type void")),
            Type::String => match value {
                ConstValue::String(s) => Ok(format!("{s:?}.to_owned()")),
                other => Err(mismatch(ty, other)),
            },
            Type::Bool => value
                .as_integer()
                .map(|v| if v != 0 { "true" } else { "false" }.to_string())
                .ok_or_else(|| mismatch(ty, value)),
            Type::Byte => integer(ty, value, i64::from(i8::MIN), i64::from(i8::MAX)),
            Type::I16 => integer(ty, value, i64::from(i16::MIN), i64::from(i16::MAX)),
            Type::I32 => integer(ty, value, i64::from(i32::MIN), i64::from(i32::MAX)),
            Type::I64 => integer(ty, value, i64::MIN, i64::MAX),
            Type::Double => match value {
                ConstValue::Integer(v) => Ok(format!("rt::Double({v}_f64)")),
                ConstValue::Double(v) => Ok(format!("rt::Double({})", float_literal(*v))),
                other => Err(mismatch(ty, other)),
            },
            Type::Enum(name) => {
                let v = integer(ty, value, i64::from(i32::MIN), i64::from(i32::MAX))?;
                Ok(format!("{}({v})", type_ident(name)))
            }
            Type::Struct(name) | Type::Exception(name) => self.render_struct(name, value),
            Type::List(elem) => {
                let items = self.render_elements(ty, elem, value)?;
                if items.is_empty() {
                    Ok("Vec::new()".to_string())
                } else {
                    Ok(format!("vec![{}]", items.join(", ")))
                }
            }
            Type::Set(elem) => {
                let items = self.render_elements(ty, elem, value)?;
                if items.is_empty() {
                    Ok(format!("{SET_PATH}::new()"))
                } else {
                    Ok(format!("{SET_PATH}::from([{}])", items.join(", ")))
                }
            }
            Type::Map(key_ty, value_ty) => {
                let ConstValue::Map(pairs) = value else {
                    return Err(mismatch(ty, value));
                };
                if pairs.is_empty() {
                    return Ok(format!("{MAP_PATH}::new()"));
                }
                let mut entries = Vec::with_capacity(pairs.len());
                for (k, v) in pairs {
                    entries.push(format!(
                        "({}, {})",
                        self.render(key_ty, k)?,
                        self.render(value_ty, v)?
                    ));
                }
                Ok(format!("{MAP_PATH}::from([{}])", entries.join(", ")))
            }
            Type::Typedef { target, .. } => self.render(target, value),
        }
    }

    /// Writes a named constant item.
    ///
    /// Scalars and enums become `pub const`, strings become `pub const &str`,
    /// and everything else a lazily built `pub static`.
    ///
    /// # Errors
    /// Returns any error from [`Self::render`].
    pub fn generate(&self, w: &mut CodeWriter, constant: &ConstDef) -> Result<(), CodegenError> {
        let name = const_ident(&constant.name);
        let ty = rust_type(&constant.ty);
        match constant.ty.resolve() {
            Type::String => {
                let ConstValue::String(s) = &constant.value else {
                    return Err(mismatch(&constant.ty, &constant.value));
                };
                w.line(&format!("pub const {name}: &str = {s:?};"));
            }
            Type::Bool
            | Type::Byte
            | Type::I16
            | Type::I32
            | Type::I64
            | Type::Double
            | Type::Enum(_) => {
                let value = self.render(&constant.ty, &constant.value)?;
                w.line(&format!("pub const {name}: {ty} = {value};"));
            }
            _ => {
                let value = self.render(&constant.ty, &constant.value)?;
                w.line(&format!(
                    "pub static {name}: ::std::sync::LazyLock<{ty}> = ::std::sync::LazyLock::new(|| {value});"
                ));
            }
        }
        Ok(())
    }

    fn render_elements(
        &self,
        ty: &Type,
        elem: &Type,
        value: &ConstValue,
    ) -> Result<Vec<String>, CodegenError> {
        let items = value.as_elements().ok_or_else(|| mismatch(ty, value))?;
        items.iter().map(|item| self.render(elem, item)).collect()
    }

    fn render_struct(&self, name: &str, value: &ConstValue) -> Result<String, CodegenError> {
        let def = self.schema.require_struct(name)?;
        let entries: Vec<(&str, &ConstValue)> = match value {
            ConstValue::Struct(fields) => fields.iter().map(|(k, v)| (k.as_str(), v)).collect(),
            ConstValue::Map(pairs) => pairs
                .iter()
                .map(|(k, v)| match k {
                    ConstValue::String(key) => Ok((key.as_str(), v)),
                    other => Err(CodegenError::unsupported(format!(
                        "{} key in struct literal for {}",
                        other.kind_name(),
                        def.name
                    ))),
                })
                .collect::<Result<_, _>>()?,
            other => return Err(mismatch(&def.as_type(), other)),
        };

        // Later keys win, keeping the position of the first occurrence.
        let mut fields: Vec<(String, String)> = Vec::with_capacity(entries.len());
        for (key, v) in entries {
            let field = def
                .get_field(key)
                .ok_or_else(|| SchemaError::unknown_field(def.name.as_str(), key))?;
            let ident = field_ident(&field.name);
            let expr = format!("Some({})", self.render(&field.ty, v)?);
            match fields.iter_mut().find(|(n, _)| *n == ident) {
                Some(slot) => slot.1 = expr,
                None => fields.push((ident, expr)),
            }
        }

        let mut out = format!("{} {{ ", type_ident(&def.name));
        for (ident, expr) in &fields {
            out.push_str(&format!("{ident}: {expr}, "));
        }
        out.push_str("..Default::default() }");
        Ok(out)
    }
}

fn integer(ty: &Type, value: &ConstValue, min: i64, max: i64) -> Result<String, CodegenError> {
    let v = value.as_integer().ok_or_else(|| mismatch(ty, value))?;
    if v < min || v > max {
        return Err(CodegenError::unsupported(format!(
            "integer literal {v} out of range for {ty}"
        )));
    }
    Ok(v.to_string())
}

fn float_literal(v: f64) -> String {
    if v.is_nan() {
        "f64::NAN".to_string()
    } else if v == f64::INFINITY {
        "f64::INFINITY".to_string()
    } else if v == f64::NEG_INFINITY {
        "f64::NEG_INFINITY".to_string()
    } else {
        format!("{v:?}")
    }
}

fn mismatch(ty: &Type, value: &ConstValue) -> CodegenError {
    CodegenError::unsupported(format!("{} literal for type {ty}", value.kind_name()))
}
