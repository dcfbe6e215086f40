//! Schema type to Rust type mapping.

use ironidl_schema::Type;
use ironidl_schema::names::type_ident;

/// Path of the ordered set type used for IDL sets.
pub const SET_PATH: &str = "::std::collections::BTreeSet";
/// Path of the ordered map type used for IDL maps.
pub const MAP_PATH: &str = "::std::collections::BTreeMap";

/// Returns the Rust type for a declared schema type.
///
/// Typedefs keep their alias name; everything else maps structurally.
#[must_use]
pub fn rust_type(ty: &Type) -> String {
    match ty {
        Type::Void => "()".to_string(),
        Type::Bool => "bool".to_string(),
        Type::Byte => "i8".to_string(),
        Type::I16 => "i16".to_string(),
        Type::I32 => "i32".to_string(),
        Type::I64 => "i64".to_string(),
        Type::Double => "rt::Double".to_string(),
        Type::String => "String".to_string(),
        Type::Enum(name) | Type::Struct(name) | Type::Exception(name) => type_ident(name),
        Type::Typedef { name, .. } => type_ident(name),
        Type::List(elem) => format!("Vec<{}>", rust_type(elem)),
        Type::Set(elem) => format!("{SET_PATH}<{}>", rust_type(elem)),
        Type::Map(key, value) => format!("{MAP_PATH}<{}, {}>", rust_type(key), rust_type(value)),
    }
}

/// Returns the `rt::WireKind` expression for a type.
#[must_use]
pub fn wire_kind_expr(ty: &Type) -> String {
    format!("rt::WireKind::{:?}", ty.wire_kind())
}

/// Returns true if the type or any nested element resolves to void.
#[must_use]
pub fn contains_void(ty: &Type) -> bool {
    match ty.resolve() {
        Type::Void => true,
        Type::List(elem) | Type::Set(elem) => contains_void(elem),
        Type::Map(key, value) => contains_void(key) || contains_void(value),
        _ => false,
    }
}
