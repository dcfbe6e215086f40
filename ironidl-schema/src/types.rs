//! Schema type definitions.
//!
//! This module contains the [`Type`] sum over every IDL type kind, the
//! typedef, enum and constant definitions, and the [`Schema`] container that
//! owns every definition in declaration order.

use crate::error::SchemaError;
use crate::services::ServiceDef;
use crate::structs::StructDef;
use crate::value::ConstValue;
use ironidl_core::WireKind;
use std::collections::HashMap;
use std::fmt;

/// Declared type of a field, argument, constant or return value.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// No value. Only valid as a function return type.
    Void,
    /// Boolean.
    Bool,
    /// Signed 8-bit integer.
    Byte,
    /// Signed 16-bit integer.
    I16,
    /// Signed 32-bit integer.
    I32,
    /// Signed 64-bit integer.
    I64,
    /// 64-bit floating point.
    Double,
    /// UTF-8 string.
    String,
    /// Reference to an enum by name.
    Enum(String),
    /// Named alias carrying the aliased type inline.
    Typedef {
        /// Alias name.
        name: String,
        /// Aliased type, possibly another typedef.
        target: Box<Type>,
    },
    /// Reference to a struct by name.
    Struct(String),
    /// Reference to an exception struct by name.
    Exception(String),
    /// Ordered sequence.
    List(Box<Type>),
    /// Unique keyed set.
    Set(Box<Type>),
    /// Key to value mapping.
    Map(Box<Type>, Box<Type>),
}

impl Type {
    /// Creates a typedef reference.
    #[must_use]
    pub fn typedef(name: impl Into<String>, target: Type) -> Self {
        Self::Typedef {
            name: name.into(),
            target: Box::new(target),
        }
    }

    /// Creates an enum reference.
    #[must_use]
    pub fn enumeration(name: impl Into<String>) -> Self {
        Self::Enum(name.into())
    }

    /// Creates a struct reference.
    #[must_use]
    pub fn structure(name: impl Into<String>) -> Self {
        Self::Struct(name.into())
    }

    /// Creates an exception reference.
    #[must_use]
    pub fn exception(name: impl Into<String>) -> Self {
        Self::Exception(name.into())
    }

    /// Creates a list type.
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Creates a set type.
    #[must_use]
    pub fn set(element: Type) -> Self {
        Self::Set(Box::new(element))
    }

    /// Creates a map type.
    #[must_use]
    pub fn map(key: Type, value: Type) -> Self {
        Self::Map(Box::new(key), Box::new(value))
    }

    /// Strips typedef indirection down to a concrete kind.
    #[must_use]
    pub fn resolve(&self) -> &Type {
        let mut ty = self;
        while let Self::Typedef { target, .. } = ty {
            ty = target;
        }
        ty
    }

    /// Returns the wire kind of this type after typedef resolution.
    #[must_use]
    pub fn wire_kind(&self) -> WireKind {
        match self {
            Self::Void => WireKind::Void,
            Self::Bool => WireKind::Bool,
            Self::Byte => WireKind::Byte,
            Self::I16 => WireKind::I16,
            Self::I32 | Self::Enum(_) => WireKind::I32,
            Self::I64 => WireKind::I64,
            Self::Double => WireKind::Double,
            Self::String => WireKind::String,
            Self::Struct(_) | Self::Exception(_) => WireKind::Struct,
            Self::List(_) => WireKind::List,
            Self::Set(_) => WireKind::Set,
            Self::Map(_, _) => WireKind::Map,
            Self::Typedef { target, .. } => target.wire_kind(),
        }
    }

    /// Returns true if the resolved type is void.
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self.resolve(), Self::Void)
    }

    /// Returns true if the resolved type is a base type (not enum, struct or container).
    #[must_use]
    pub fn is_base(&self) -> bool {
        matches!(
            self.resolve(),
            Self::Void
                | Self::Bool
                | Self::Byte
                | Self::I16
                | Self::I32
                | Self::I64
                | Self::Double
                | Self::String
        )
    }

    /// Returns true if the resolved type is a struct or exception.
    #[must_use]
    pub fn is_struct(&self) -> bool {
        matches!(self.resolve(), Self::Struct(_) | Self::Exception(_))
    }

    /// Returns true if the resolved type is a list, set or map.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self.resolve(), Self::List(_) | Self::Set(_) | Self::Map(_, _))
    }

    /// Returns the referenced struct or exception name, if any.
    #[must_use]
    pub fn struct_name(&self) -> Option<&str> {
        match self.resolve() {
            Self::Struct(name) | Self::Exception(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Void => f.write_str("void"),
            Self::Bool => f.write_str("bool"),
            Self::Byte => f.write_str("byte"),
            Self::I16 => f.write_str("i16"),
            Self::I32 => f.write_str("i32"),
            Self::I64 => f.write_str("i64"),
            Self::Double => f.write_str("double"),
            Self::String => f.write_str("string"),
            Self::Enum(name) | Self::Struct(name) | Self::Exception(name) => f.write_str(name),
            Self::Typedef { name, .. } => f.write_str(name),
            Self::List(elem) => write!(f, "list<{elem}>"),
            Self::Set(elem) => write!(f, "set<{elem}>"),
            Self::Map(key, value) => write!(f, "map<{key},{value}>"),
        }
    }
}

/// Named type alias.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedefDef {
    /// Alias name.
    pub name: String,
    /// Aliased type.
    pub target: Type,
    /// Allowed values when the alias is a string enumeration.
    pub string_enum: Option<Vec<String>>,
}

impl TypedefDef {
    /// Creates a new typedef.
    #[must_use]
    pub fn new(name: impl Into<String>, target: Type) -> Self {
        Self {
            name: name.into(),
            target,
            string_enum: None,
        }
    }

    /// Restricts a string alias to an explicit value list.
    #[must_use]
    pub fn with_string_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.string_enum = Some(values.into_iter().map(Into::into).collect());
        self
    }

    /// Returns a [`Type::Typedef`] referring to this alias.
    #[must_use]
    pub fn as_type(&self) -> Type {
        Type::typedef(self.name.clone(), self.target.clone())
    }
}

/// Enum type definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDef {
    /// Enum name.
    pub name: String,
    /// Constants in declaration order.
    pub values: Vec<EnumValue>,
}

/// Enum constant as declared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Constant name.
    pub name: String,
    /// Explicit value, if one was written.
    pub value: Option<i32>,
}

impl EnumDef {
    /// Creates a new enum definition.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Adds a constant with an implicit value.
    #[must_use]
    pub fn value(mut self, name: impl Into<String>) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value: None,
        });
        self
    }

    /// Adds a constant with an explicit value.
    #[must_use]
    pub fn value_of(mut self, name: impl Into<String>, value: i32) -> Self {
        self.values.push(EnumValue {
            name: name.into(),
            value: Some(value),
        });
        self
    }

    /// Returns `(name, value)` pairs with implicit values resolved.
    ///
    /// The first implicit value is 0; each later implicit value is the
    /// previous resolved value plus one; an explicit value restarts the count.
    #[must_use]
    pub fn resolved_values(&self) -> Vec<(&str, i32)> {
        let mut next = 0i32;
        self.values
            .iter()
            .map(|v| {
                let value = v.value.unwrap_or(next);
                next = value.wrapping_add(1);
                (v.name.as_str(), value)
            })
            .collect()
    }

    /// Looks up a constant's resolved value by name.
    #[must_use]
    pub fn value_by_name(&self, name: &str) -> Option<i32> {
        self.resolved_values()
            .into_iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v)
    }
}

/// Named constant.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstDef {
    /// Constant name.
    pub name: String,
    /// Declared type.
    pub ty: Type,
    /// Literal value.
    pub value: ConstValue,
}

impl ConstDef {
    /// Creates a new constant.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: Type, value: ConstValue) -> Self {
        Self {
            name: name.into(),
            ty,
            value,
        }
    }
}

/// Complete, immutable schema handed to the generators.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Program name, used for output naming and banners.
    pub name: String,
    /// Target namespace for structural documents.
    pub xsd_namespace: Option<String>,
    /// Typedefs in declaration order.
    pub typedefs: Vec<TypedefDef>,
    /// Enums in declaration order.
    pub enums: Vec<EnumDef>,
    /// Constants in declaration order.
    pub constants: Vec<ConstDef>,
    /// Structs and exceptions in declaration order.
    pub structs: Vec<StructDef>,
    /// Services in declaration order.
    pub services: Vec<ServiceDef>,
    struct_map: HashMap<String, usize>,
    enum_map: HashMap<String, usize>,
    service_map: HashMap<String, usize>,
}

impl Schema {
    /// Creates a new empty schema.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the structural document target namespace.
    #[must_use]
    pub fn with_xsd_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.xsd_namespace = Some(namespace.into());
        self
    }

    /// Adds a typedef.
    pub fn add_typedef(&mut self, typedef: TypedefDef) {
        self.typedefs.push(typedef);
    }

    /// Adds an enum definition.
    pub fn add_enum(&mut self, enum_def: EnumDef) {
        self.enum_map.insert(enum_def.name.clone(), self.enums.len());
        self.enums.push(enum_def);
    }

    /// Adds a constant.
    pub fn add_const(&mut self, constant: ConstDef) {
        self.constants.push(constant);
    }

    /// Adds a struct or exception definition.
    pub fn add_struct(&mut self, struct_def: StructDef) {
        self.struct_map
            .insert(struct_def.name.clone(), self.structs.len());
        self.structs.push(struct_def);
    }

    /// Adds a service definition.
    pub fn add_service(&mut self, service: ServiceDef) {
        self.service_map
            .insert(service.name.clone(), self.services.len());
        self.services.push(service);
    }

    /// Looks up a struct or exception by name.
    #[must_use]
    pub fn get_struct(&self, name: &str) -> Option<&StructDef> {
        self.struct_map.get(name).map(|&idx| &self.structs[idx])
    }

    /// Looks up an enum by name.
    #[must_use]
    pub fn get_enum(&self, name: &str) -> Option<&EnumDef> {
        self.enum_map.get(name).map(|&idx| &self.enums[idx])
    }

    /// Looks up a service by name.
    #[must_use]
    pub fn get_service(&self, name: &str) -> Option<&ServiceDef> {
        self.service_map.get(name).map(|&idx| &self.services[idx])
    }

    /// Looks up a struct, failing with [`SchemaError::TypeNotFound`].
    ///
    /// # Errors
    /// Returns an error if no struct or exception has the given name.
    pub fn require_struct(&self, name: &str) -> Result<&StructDef, SchemaError> {
        self.get_struct(name)
            .ok_or_else(|| SchemaError::not_found("struct", name))
    }

    /// Returns the parent of a service, if it extends one.
    ///
    /// # Errors
    /// Returns an error if the named parent does not exist.
    pub fn parent_of(&self, service: &ServiceDef) -> Result<Option<&ServiceDef>, SchemaError> {
        match &service.extends {
            Some(parent) => self
                .get_service(parent)
                .map(Some)
                .ok_or_else(|| SchemaError::not_found("service", parent.as_str())),
            None => Ok(None),
        }
    }
}
