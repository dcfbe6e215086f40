//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Schema error found while generating.
    #[error("schema error: {0}")]
    Schema(#[from] ironidl_schema::SchemaError),

    /// A type and value combination has no rendering rule.
    #[error("unsupported construct: {construct}")]
    Unsupported {
        /// Description of the construct.
        construct: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Code generation error.
    #[error("generation error: {message}")]
    Generation {
        /// Error message.
        message: String,
    },

    /// Error raised while generating a named entity.
    #[error("while generating {entity}: {source}")]
    Entity {
        /// Entity description, such as `struct Work`.
        entity: String,
        /// Underlying error.
        source: Box<CodegenError>,
    },
}

impl CodegenError {
    /// Creates an unsupported construct error.
    pub fn unsupported(construct: impl Into<String>) -> Self {
        Self::Unsupported {
            construct: construct.into(),
        }
    }

    /// Creates a generation error with the given message.
    pub fn generation(message: impl Into<String>) -> Self {
        Self::Generation {
            message: message.into(),
        }
    }

    /// Wraps this error with the entity being generated.
    #[must_use]
    pub fn in_entity(self, entity: impl Into<String>) -> Self {
        Self::Entity {
            entity: entity.into(),
            source: Box::new(self),
        }
    }

    /// Returns the innermost error, skipping entity wrappers.
    #[must_use]
    pub fn root(&self) -> &CodegenError {
        match self {
            Self::Entity { source, .. } => source.root(),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironidl_schema::SchemaError;

    #[test]
    fn test_entity_wrapping() {
        let err = CodegenError::from(SchemaError::unknown_field("Point", "z"))
            .in_entity("const ORIGIN");
        let message = err.to_string();
        assert!(message.contains("const ORIGIN"));
        assert!(message.contains("Point has no field z"));
        assert!(matches!(
            err.root(),
            CodegenError::Schema(SchemaError::UnknownField { .. })
        ));
    }

    #[test]
    fn test_unsupported_message() {
        let err = CodegenError::unsupported("void value");
        assert_eq!(err.to_string(), "unsupported construct: void value");
    }
}
