//! Value codec statements.
//!
//! This module provides the recursive deserialize and serialize generators
//! shared by struct fields and container elements. Every temporary comes
//! from the unit's [`CodeWriter::tmp`] counter, so nested containers never
//! shadow each other.

use crate::error::CodegenError;
use crate::rust::types::{rust_type, wire_kind_expr};
use crate::writer::CodeWriter;
use ironidl_schema::Type;
use ironidl_schema::names::type_ident;

/// Emits statements binding `target` to a value of `ty` read from `input`.
///
/// # Errors
/// Returns `Unsupported` if `ty` is or contains void.
pub fn generate_deserialize(
    w: &mut CodeWriter,
    ty: &Type,
    target: &str,
) -> Result<(), CodegenError> {
    let resolved = ty.resolve();
    match resolved {
        Type::Void => return Err(CodegenError::unsupported("deserializing a void value")),
        Type::Bool => w.line(&format!("let {target} = input.read_bool()?;")),
        Type::Byte => w.line(&format!("let {target} = input.read_byte()?;")),
        Type::I16 => w.line(&format!("let {target} = input.read_i16()?;")),
        Type::I32 => w.line(&format!("let {target} = input.read_i32()?;")),
        Type::I64 => w.line(&format!("let {target} = input.read_i64()?;")),
        Type::Double => w.line(&format!("let {target} = rt::Double(input.read_double()?);")),
        Type::String => w.line(&format!("let {target} = input.read_string()?;")),
        Type::Enum(name) => w.line(&format!(
            "let {target} = {}(input.read_i32()?);",
            type_ident(name)
        )),
        Type::Struct(name) | Type::Exception(name) => w.line(&format!(
            "let {target} = {}::read_new(input)?;",
            type_ident(name)
        )),
        Type::List(elem) => {
            w.line(&format!("let mut {target}: {} = Vec::new();", rust_type(resolved)));
            let header = w.tmp("_list");
            w.block::<CodegenError, _>("", "", |w| {
                w.line(&format!("let {header} = input.read_list_begin()?;"));
                w.block::<CodegenError, _>(&format!("for _ in 0..{header}.size"), "", |w| {
                    let elem_var = w.tmp("_elem");
                    generate_deserialize(w, elem, &elem_var)?;
                    w.line(&format!("{target}.push({elem_var});"));
                    Ok(())
                })?;
                w.line("input.read_list_end()?;");
                Ok(())
            })?;
        }
        Type::Set(elem) => {
            w.line(&format!(
                "let mut {target}: {} = ::std::collections::BTreeSet::new();",
                rust_type(resolved)
            ));
            let header = w.tmp("_set");
            w.block::<CodegenError, _>("", "", |w| {
                w.line(&format!("let {header} = input.read_set_begin()?;"));
                w.block::<CodegenError, _>(&format!("for _ in 0..{header}.size"), "", |w| {
                    let elem_var = w.tmp("_elem");
                    generate_deserialize(w, elem, &elem_var)?;
                    w.line(&format!("{target}.insert({elem_var});"));
                    Ok(())
                })?;
                w.line("input.read_set_end()?;");
                Ok(())
            })?;
        }
        Type::Map(key, value) => {
            w.line(&format!(
                "let mut {target}: {} = ::std::collections::BTreeMap::new();",
                rust_type(resolved)
            ));
            let header = w.tmp("_map");
            w.block::<CodegenError, _>("", "", |w| {
                w.line(&format!("let {header} = input.read_map_begin()?;"));
                w.block::<CodegenError, _>(&format!("for _ in 0..{header}.size"), "", |w| {
                    let key_var = w.tmp("_key");
                    let val_var = w.tmp("_val");
                    generate_deserialize(w, key, &key_var)?;
                    generate_deserialize(w, value, &val_var)?;
                    w.line(&format!("{target}.insert({key_var}, {val_var});"));
                    Ok(())
                })?;
                w.line("input.read_map_end()?;");
                Ok(())
            })?;
        }
        Type::Typedef { target: inner, .. } => return generate_deserialize(w, inner, target),
    }
    Ok(())
}

/// Emits statements writing `value`, an expression of type `&T`, to `output`.
///
/// # Errors
/// Returns `Unsupported` if `ty` is or contains void.
pub fn generate_serialize(w: &mut CodeWriter, ty: &Type, value: &str) -> Result<(), CodegenError> {
    match ty.resolve() {
        Type::Void => return Err(CodegenError::unsupported("serializing a void value")),
        Type::Bool => w.line(&format!("output.write_bool(*{value})?;")),
        Type::Byte => w.line(&format!("output.write_byte(*{value})?;")),
        Type::I16 => w.line(&format!("output.write_i16(*{value})?;")),
        Type::I32 => w.line(&format!("output.write_i32(*{value})?;")),
        Type::I64 => w.line(&format!("output.write_i64(*{value})?;")),
        Type::Double => w.line(&format!("output.write_double({value}.0)?;")),
        Type::String => w.line(&format!("output.write_string({value})?;")),
        Type::Enum(_) => w.line(&format!("output.write_i32({value}.0)?;")),
        Type::Struct(_) | Type::Exception(_) => w.line(&format!("{value}.write(output)?;")),
        Type::List(elem) => {
            w.line(&format!(
                "output.write_list_begin(&rt::ListHeader::new({}, {value}.len() as u32))?;",
                wire_kind_expr(elem)
            ));
            let iter = w.tmp("_iter");
            w.block(&format!("for {iter} in {value}"), "", |w| {
                generate_serialize(w, elem, &iter)
            })?;
            w.line("output.write_list_end()?;");
        }
        Type::Set(elem) => {
            w.line(&format!(
                "output.write_set_begin(&rt::SetHeader::new({}, {value}.len() as u32))?;",
                wire_kind_expr(elem)
            ));
            let iter = w.tmp("_iter");
            w.block(&format!("for {iter} in {value}"), "", |w| {
                generate_serialize(w, elem, &iter)
            })?;
            w.line("output.write_set_end()?;");
        }
        Type::Map(key, val) => {
            w.line(&format!(
                "output.write_map_begin(&rt::MapHeader::new({}, {}, {value}.len() as u32))?;",
                wire_kind_expr(key),
                wire_kind_expr(val)
            ));
            let key_iter = w.tmp("_kiter");
            let val_iter = w.tmp("_viter");
            w.block(&format!("for ({key_iter}, {val_iter}) in {value}"), "", |w| {
                generate_serialize(w, key, &key_iter)?;
                generate_serialize(w, val, &val_iter)
            })?;
            w.line("output.write_map_end()?;");
        }
        Type::Typedef { target, .. } => return generate_serialize(w, target, value),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balanced(code: &str) -> bool {
        let mut depth = 0i64;
        for c in code.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth -= 1,
                _ => {}
            }
            if depth < 0 {
                return false;
            }
        }
        depth == 0
    }

    #[test]
    fn test_deserialize_base() {
        let mut w = CodeWriter::new();
        generate_deserialize(&mut w, &Type::I32, "v").unwrap();
        generate_deserialize(&mut w, &Type::enumeration("Operation"), "op").unwrap();
        generate_deserialize(&mut w, &Type::structure("Work"), "work").unwrap();
        let out = w.into_string();
        assert!(out.contains("let v = input.read_i32()?;"));
        assert!(out.contains("let op = Operation(input.read_i32()?);"));
        assert!(out.contains("let work = Work::read_new(input)?;"));
        assert!(!out.contains("Work::default()"));
    }

    #[test]
    fn test_deserialize_nested_map_uses_fresh_names() {
        let mut w = CodeWriter::new();
        let ty = Type::map(Type::String, Type::list(Type::I32));
        generate_deserialize(&mut w, &ty, "m").unwrap();
        let out = w.into_string();
        assert!(out.contains("let _map0 = input.read_map_begin()?;"));
        assert!(out.contains("let _list3 = input.read_list_begin()?;"));
        assert!(out.contains("m.insert(_key1, _val2);"));
        assert!(out.contains("_val2.push(_elem4);"));
        assert!(balanced(&out));
    }

    #[test]
    fn test_serialize_base() {
        let mut w = CodeWriter::new();
        generate_serialize(&mut w, &Type::I64, "value").unwrap();
        generate_serialize(&mut w, &Type::Double, "value").unwrap();
        generate_serialize(&mut w, &Type::String, "value").unwrap();
        generate_serialize(&mut w, &Type::typedef("Id", Type::I16), "value").unwrap();
        let out = w.into_string();
        assert!(out.contains("output.write_i64(*value)?;"));
        assert!(out.contains("output.write_double(value.0)?;"));
        assert!(out.contains("output.write_string(value)?;"));
        assert!(out.contains("output.write_i16(*value)?;"));
    }

    #[test]
    fn test_serialize_deep_nesting_is_balanced() {
        let mut w = CodeWriter::new();
        let mut ty = Type::I32;
        for depth in 0..8 {
            ty = if depth % 2 == 0 {
                Type::list(ty)
            } else {
                Type::map(Type::String, ty)
            };
        }
        generate_serialize(&mut w, &ty, "value").unwrap();
        generate_deserialize(&mut w, &ty, "decoded").unwrap();
        assert!(balanced(w.as_str()));
        assert_eq!(w.indent_level(), 0);
    }

    #[test]
    fn test_void_element_rejected() {
        let mut w = CodeWriter::new();
        let err = generate_serialize(&mut w, &Type::list(Type::Void), "value").unwrap_err();
        assert!(matches!(err, CodegenError::Unsupported { .. }));
    }
}
