//! Service and function definitions.

use crate::structs::{Field, StructDef};
use crate::types::Type;

/// Remote function of a service.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// Function name.
    pub name: String,
    /// Return type, possibly [`Type::Void`].
    pub return_type: Type,
    /// Arguments as an implicit struct.
    pub args: StructDef,
    /// Declared exceptions as an implicit struct.
    pub exceptions: StructDef,
    /// No reply is sent or awaited.
    pub oneway: bool,
}

impl FunctionDef {
    /// Creates a function with no arguments and no exceptions.
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        let name = name.into();
        Self {
            args: StructDef::new(format!("{name}_args")),
            exceptions: StructDef::new(format!("{name}_exceptions")),
            name,
            return_type,
            oneway: false,
        }
    }

    /// Appends an argument. Ids are positional when built through [`Self::arg`].
    #[must_use]
    pub fn arg(mut self, name: impl Into<String>, ty: Type) -> Self {
        let id = next_id(&self.args);
        self.args.add_field(Field::new(id, name, ty));
        self
    }

    /// Appends an argument with an explicit field.
    #[must_use]
    pub fn arg_field(mut self, field: Field) -> Self {
        self.args.add_field(field);
        self
    }

    /// Declares a thrown exception type.
    #[must_use]
    pub fn throws(mut self, name: impl Into<String>, exception: impl Into<String>) -> Self {
        let id = next_id(&self.exceptions);
        self.exceptions
            .add_field(Field::new(id, name, Type::exception(exception)));
        self
    }

    /// Marks the function one-way.
    #[must_use]
    pub fn oneway(mut self) -> Self {
        self.oneway = true;
        self
    }

    /// Returns true if the function returns a value.
    #[must_use]
    pub fn has_return(&self) -> bool {
        !self.return_type.is_void()
    }
}

fn next_id(owner: &StructDef) -> i16 {
    owner.fields.iter().map(|f| f.id).max().unwrap_or(0) + 1
}

/// Service definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDef {
    /// Service name.
    pub name: String,
    /// Functions in declaration order.
    pub functions: Vec<FunctionDef>,
    /// Name of the parent service.
    pub extends: Option<String>,
}

impl ServiceDef {
    /// Creates a new service with no functions.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            extends: None,
        }
    }

    /// Sets the parent service.
    #[must_use]
    pub fn extends(mut self, parent: impl Into<String>) -> Self {
        self.extends = Some(parent.into());
        self
    }

    /// Appends a function.
    #[must_use]
    pub fn function(mut self, function: FunctionDef) -> Self {
        self.functions.push(function);
        self
    }

    /// Looks up a function declared directly on this service.
    #[must_use]
    pub fn get_function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }
}
