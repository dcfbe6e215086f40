//! Error types for schema lookup, validation and generation-time checks.

use thiserror::Error;

/// Error type for schema operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A struct literal names a field the target struct does not declare.
    #[error("type error: {struct_name} has no field {field}")]
    UnknownField {
        /// Struct name.
        struct_name: String,
        /// Field name from the literal.
        field: String,
    },

    /// A field or container element resolves to void.
    #[error("void type is not allowed for field '{field}' of '{owner}'")]
    VoidField {
        /// Owning struct (or function) name.
        owner: String,
        /// Field name.
        field: String,
    },

    /// A referenced struct, enum or service does not exist.
    #[error("{kind} '{name}' not found")]
    TypeNotFound {
        /// Kind of definition.
        kind: String,
        /// Referenced name.
        name: String,
    },

    /// Two fields of one struct share an id.
    #[error("duplicate field id {id} in '{owner}'")]
    DuplicateFieldId {
        /// Owning struct name.
        owner: String,
        /// Repeated id.
        id: i16,
    },

    /// Duplicate definition.
    #[error("duplicate {kind} definition: '{name}'")]
    DuplicateDefinition {
        /// Kind of definition (struct, enum constant, etc.).
        kind: String,
        /// Name of the duplicate.
        name: String,
    },

    /// Circular service inheritance.
    #[error("circular service inheritance detected: {path}")]
    CircularReference {
        /// Services on the cycle, joined by `->`.
        path: String,
    },

    /// One-way function with a return value or declared exceptions.
    #[error("oneway function '{service}.{function}' {reason}")]
    InvalidOneway {
        /// Service name.
        service: String,
        /// Function name.
        function: String,
        /// What is wrong.
        reason: String,
    },

    /// Two names that map to the same generated Rust identifier.
    #[error("'{first}' and '{second}' in '{owner}' both generate '{ident}'")]
    NameCollision {
        /// Struct or service the names belong to.
        owner: String,
        /// Name declared first.
        first: String,
        /// Name declared later.
        second: String,
        /// Shared identifier.
        ident: String,
    },

    /// Validation error.
    #[error("validation error: {message}")]
    Validation {
        /// Error message.
        message: String,
    },
}

impl SchemaError {
    /// Creates an unknown struct-literal field error.
    pub fn unknown_field(struct_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            struct_name: struct_name.into(),
            field: field.into(),
        }
    }

    /// Creates a void field error.
    pub fn void_field(owner: impl Into<String>, field: impl Into<String>) -> Self {
        Self::VoidField {
            owner: owner.into(),
            field: field.into(),
        }
    }

    /// Creates a missing definition error.
    pub fn not_found(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::TypeNotFound {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a duplicate definition error.
    pub fn duplicate(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self::DuplicateDefinition {
            kind: kind.into(),
            name: name.into(),
        }
    }

    /// Creates a generated-identifier collision error.
    pub fn name_collision(
        owner: impl Into<String>,
        first: impl Into<String>,
        second: impl Into<String>,
        ident: impl Into<String>,
    ) -> Self {
        Self::NameCollision {
            owner: owner.into(),
            first: first.into(),
            second: second.into(),
            ident: ident.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_field_message() {
        let err = SchemaError::unknown_field("Point", "z");
        assert_eq!(err.to_string(), "type error: Point has no field z");
    }

    #[test]
    fn test_void_field_message() {
        let err = SchemaError::void_field("Work", "nothing");
        assert!(err.to_string().contains("'nothing'"));
        assert!(err.to_string().contains("'Work'"));
    }

    #[test]
    fn test_name_collision_message() {
        let err = SchemaError::name_collision("Point", "fooBar", "foo_bar", "foo_bar");
        assert_eq!(
            err.to_string(),
            "'fooBar' and 'foo_bar' in 'Point' both generate 'foo_bar'"
        );
    }
}
