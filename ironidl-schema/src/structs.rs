//! Struct and field definitions.
//!
//! Structs also model exception payloads and the implicit argument and
//! exception lists of service functions.

use crate::types::Type;
use crate::value::ConstValue;

/// Field of a struct, exception or argument list.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Wire key, unique within the owning struct.
    pub id: i16,
    /// Field name.
    pub name: String,
    /// Declared type.
    pub ty: Type,
    /// Default value literal.
    pub default: Option<ConstValue>,
    /// Structural document annotations.
    pub xsd: XsdFieldOptions,
}

/// Structural document annotations of a field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct XsdFieldOptions {
    /// Element may be omitted.
    pub optional: bool,
    /// Element may be explicitly nil.
    pub nillable: bool,
    /// Attributes attached to the element.
    pub attrs: Option<Vec<Field>>,
}

impl Field {
    /// Creates a new field without a default.
    #[must_use]
    pub fn new(id: i16, name: impl Into<String>, ty: Type) -> Self {
        Self {
            id,
            name: name.into(),
            ty,
            default: None,
            xsd: XsdFieldOptions::default(),
        }
    }

    /// Sets the default value.
    #[must_use]
    pub fn with_default(mut self, value: ConstValue) -> Self {
        self.default = Some(value);
        self
    }

    /// Marks the field optional in structural documents.
    #[must_use]
    pub fn xsd_optional(mut self) -> Self {
        self.xsd.optional = true;
        self
    }

    /// Marks the field nillable in structural documents.
    #[must_use]
    pub fn xsd_nillable(mut self) -> Self {
        self.xsd.nillable = true;
        self
    }

    /// Attaches structural document attributes.
    #[must_use]
    pub fn xsd_attrs(mut self, attrs: Vec<Field>) -> Self {
        self.xsd.attrs = Some(attrs);
        self
    }
}

/// Struct or exception definition.
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    /// Struct name.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// True for exception payloads.
    pub is_exception: bool,
    /// Structural documents use an unordered `all` group.
    pub xsd_all: bool,
}

impl StructDef {
    /// Creates a new empty struct.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            is_exception: false,
            xsd_all: false,
        }
    }

    /// Creates a new empty exception.
    #[must_use]
    pub fn exception(name: impl Into<String>) -> Self {
        Self {
            is_exception: true,
            ..Self::new(name)
        }
    }

    /// Appends a field.
    #[must_use]
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Uses an unordered `all` group in structural documents.
    #[must_use]
    pub fn with_xsd_all(mut self) -> Self {
        self.xsd_all = true;
        self
    }

    /// Appends a field in place.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn get_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Looks up a field by id.
    #[must_use]
    pub fn get_field_by_id(&self, id: i16) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Returns true if the struct declares no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns this struct as a [`Type`] reference.
    #[must_use]
    pub fn as_type(&self) -> Type {
        if self.is_exception {
            Type::exception(self.name.clone())
        } else {
            Type::structure(self.name.clone())
        }
    }
}
