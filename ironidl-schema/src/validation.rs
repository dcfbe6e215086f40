//! Schema validation utilities.
//!
//! Generators assume a well-formed schema. Front-ends that build a
//! [`Schema`] by hand can run [`validate_schema`] first to reject the
//! mistakes the model itself does not rule out.

use crate::error::SchemaError;
use crate::names::{client_method_ident, field_ident, prefixed_ident};
use crate::services::ServiceDef;
use crate::structs::StructDef;
use crate::types::{Schema, Type};
use std::collections::{BTreeSet, HashMap, HashSet};

/// Validates a schema for correctness.
///
/// # Errors
/// Returns the first `SchemaError` found.
pub fn validate_schema(schema: &Schema) -> Result<(), SchemaError> {
    validate_names(schema)?;
    for enum_def in &schema.enums {
        let mut seen = HashSet::new();
        for value in &enum_def.values {
            if !seen.insert(value.name.as_str()) {
                return Err(SchemaError::duplicate(
                    format!("enum constant in '{}'", enum_def.name),
                    value.name.as_str(),
                ));
            }
        }
    }
    for typedef in &schema.typedefs {
        validate_type(schema, &typedef.target, &typedef.name)?;
    }
    for constant in &schema.constants {
        validate_type(schema, &constant.ty, &constant.name)?;
    }
    for struct_def in &schema.structs {
        validate_struct(schema, struct_def)?;
    }
    for service in &schema.services {
        validate_service(schema, service)?;
    }
    Ok(())
}

/// Rejects duplicate top-level names.
fn validate_names(schema: &Schema) -> Result<(), SchemaError> {
    let mut types = HashSet::new();
    let names = schema
        .typedefs
        .iter()
        .map(|t| &t.name)
        .chain(schema.enums.iter().map(|e| &e.name))
        .chain(schema.structs.iter().map(|s| &s.name));
    for name in names {
        if !types.insert(name.as_str()) {
            return Err(SchemaError::duplicate("type", name.as_str()));
        }
    }

    let mut services = HashSet::new();
    for service in &schema.services {
        if !services.insert(service.name.as_str()) {
            return Err(SchemaError::duplicate("service", service.name.as_str()));
        }
    }

    let mut constants = HashSet::new();
    for constant in &schema.constants {
        if !constants.insert(constant.name.as_str()) {
            return Err(SchemaError::duplicate("constant", constant.name.as_str()));
        }
    }
    Ok(())
}

/// Validates field ids, names, void fields and type references of one struct.
fn validate_struct(schema: &Schema, struct_def: &StructDef) -> Result<(), SchemaError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    let mut idents: HashMap<String, &str> = HashMap::new();
    for field in &struct_def.fields {
        if !ids.insert(field.id) {
            return Err(SchemaError::DuplicateFieldId {
                owner: struct_def.name.clone(),
                id: field.id,
            });
        }
        if !names.insert(field.name.as_str()) {
            return Err(SchemaError::duplicate(
                format!("field in '{}'", struct_def.name),
                field.name.as_str(),
            ));
        }
        let ident = field_ident(&field.name);
        if let Some(first) = idents.get(&ident) {
            return Err(SchemaError::name_collision(
                struct_def.name.as_str(),
                *first,
                field.name.as_str(),
                ident,
            ));
        }
        idents.insert(ident, field.name.as_str());
        if field.ty.is_void() {
            return Err(SchemaError::void_field(
                struct_def.name.as_str(),
                field.name.as_str(),
            ));
        }
        validate_type(schema, &field.ty, &field.name)?;
    }
    Ok(())
}

/// Checks that every named reference inside a type exists.
fn validate_type(schema: &Schema, ty: &Type, context: &str) -> Result<(), SchemaError> {
    match ty {
        Type::Enum(name) => {
            if schema.get_enum(name).is_none() {
                return Err(SchemaError::not_found("enum", name.as_str()));
            }
        }
        Type::Struct(name) | Type::Exception(name) => {
            if schema.get_struct(name).is_none() {
                return Err(SchemaError::not_found("struct", name.as_str()));
            }
        }
        Type::Typedef { target, .. } => validate_type(schema, target, context)?,
        Type::List(elem) | Type::Set(elem) => {
            if elem.is_void() {
                return Err(SchemaError::void_field(context, "<element>"));
            }
            validate_type(schema, elem, context)?;
        }
        Type::Map(key, value) => {
            if key.is_void() || value.is_void() {
                return Err(SchemaError::void_field(context, "<entry>"));
            }
            validate_type(schema, key, context)?;
            validate_type(schema, value, context)?;
        }
        Type::Void
        | Type::Bool
        | Type::Byte
        | Type::I16
        | Type::I32
        | Type::I64
        | Type::Double
        | Type::String => {}
    }
    Ok(())
}

/// Validates functions and the inheritance chain of one service.
fn validate_service(schema: &Schema, service: &ServiceDef) -> Result<(), SchemaError> {
    let mut path = vec![service.name.as_str()];
    let mut current = schema.parent_of(service)?;
    while let Some(parent) = current {
        if path.contains(&parent.name.as_str()) {
            path.push(parent.name.as_str());
            return Err(SchemaError::CircularReference {
                path: path.join(" -> "),
            });
        }
        path.push(parent.name.as_str());
        current = schema.parent_of(parent)?;
    }

    let mut names = HashSet::new();
    for function in &service.functions {
        if !names.insert(function.name.as_str()) {
            return Err(SchemaError::duplicate(
                format!("function in '{}'", service.name),
                function.name.as_str(),
            ));
        }
        if function.oneway && function.has_return() {
            return Err(SchemaError::InvalidOneway {
                service: service.name.clone(),
                function: function.name.clone(),
                reason: "must return void".to_string(),
            });
        }
        if function.oneway && !function.exceptions.is_empty() {
            return Err(SchemaError::InvalidOneway {
                service: service.name.clone(),
                function: function.name.clone(),
                reason: "cannot declare exceptions".to_string(),
            });
        }
        validate_type(schema, &function.return_type, &function.name)?;
        validate_struct(schema, &function.args)?;
        validate_struct(schema, &function.exceptions)?;
        for field in &function.exceptions.fields {
            if !matches!(field.ty.resolve(), Type::Exception(_)) {
                return Err(SchemaError::Validation {
                    message: format!(
                        "'{}.{}' throws non-exception type '{}'",
                        service.name, function.name, field.ty
                    ),
                });
            }
        }
    }
    validate_generated_methods(schema, service)
}

/// Rejects functions of a service and its ancestors whose generated Rust
/// methods share a name. Each function contributes its handler method,
/// its client call and its `send_`/`recv_` pair.
fn validate_generated_methods(schema: &Schema, service: &ServiceDef) -> Result<(), SchemaError> {
    let mut seen: HashMap<String, String> = HashMap::new();
    let mut current = Some(service);
    while let Some(owner) = current {
        for function in &owner.functions {
            let qualified = format!("{}.{}", owner.name, function.name);
            let mut methods = BTreeSet::from([
                field_ident(&function.name),
                client_method_ident(&function.name),
                prefixed_ident("send", &function.name),
            ]);
            if !function.oneway {
                methods.insert(prefixed_ident("recv", &function.name));
            }
            for method in methods {
                if let Some(first) = seen.get(&method) {
                    return Err(SchemaError::name_collision(
                        service.name.as_str(),
                        first.as_str(),
                        qualified.as_str(),
                        method,
                    ));
                }
                seen.insert(method, qualified.clone());
            }
        }
        current = schema.parent_of(owner)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::FunctionDef;
    use crate::structs::Field;
    use crate::types::EnumDef;

    fn base_schema() -> Schema {
        let mut schema = Schema::new("test");
        schema.add_enum(EnumDef::new("Operation").value_of("ADD", 1).value("SUBTRACT"));
        schema.add_struct(
            StructDef::new("Work")
                .field(Field::new(1, "num1", Type::I32))
                .field(Field::new(2, "op", Type::enumeration("Operation"))),
        );
        schema.add_struct(
            StructDef::exception("InvalidOperation").field(Field::new(1, "why", Type::String)),
        );
        schema.add_service(
            ServiceDef::new("Calculator").function(
                FunctionDef::new("calculate", Type::I32)
                    .arg("w", Type::structure("Work"))
                    .throws("ouch", "InvalidOperation"),
            ),
        );
        schema
    }

    #[test]
    fn test_validate_valid_schema() {
        assert!(validate_schema(&base_schema()).is_ok());
    }

    #[test]
    fn test_validate_duplicate_field_id() {
        let mut schema = base_schema();
        schema.add_struct(
            StructDef::new("Dup")
                .field(Field::new(1, "a", Type::I32))
                .field(Field::new(1, "b", Type::I32)),
        );
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::DuplicateFieldId {
                owner: "Dup".to_string(),
                id: 1
            })
        );
    }

    #[test]
    fn test_validate_duplicate_enum_constant() {
        let mut schema = base_schema();
        schema.add_enum(EnumDef::new("E").value("A").value("A"));
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::DuplicateDefinition { .. })
        ));
    }

    #[test]
    fn test_validate_void_field() {
        let mut schema = base_schema();
        schema.add_struct(StructDef::new("Bad").field(Field::new(1, "nothing", Type::Void)));
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::void_field("Bad", "nothing"))
        );
    }

    #[test]
    fn test_validate_dangling_reference() {
        let mut schema = base_schema();
        schema.add_struct(
            StructDef::new("Holder").field(Field::new(
                1,
                "items",
                Type::list(Type::structure("Missing")),
            )),
        );
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::not_found("struct", "Missing"))
        );
    }

    #[test]
    fn test_validate_service_cycle() {
        let mut schema = base_schema();
        schema.add_service(ServiceDef::new("A").extends("B"));
        schema.add_service(ServiceDef::new("B").extends("A"));
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::CircularReference { .. })
        ));
    }

    #[test]
    fn test_validate_oneway_with_return() {
        let mut schema = base_schema();
        schema.add_service(
            ServiceDef::new("Bad").function(FunctionDef::new("fire", Type::I32).oneway()),
        );
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::InvalidOneway { .. })
        ));
    }

    #[test]
    fn test_validate_field_ident_collision() {
        let mut schema = base_schema();
        schema.add_struct(
            StructDef::new("Clash")
                .field(Field::new(1, "fooBar", Type::I32))
                .field(Field::new(2, "foo_bar", Type::I32)),
        );
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::name_collision("Clash", "fooBar", "foo_bar", "foo_bar"))
        );
    }

    #[test]
    fn test_validate_argument_ident_collision() {
        let mut schema = base_schema();
        schema.add_service(
            ServiceDef::new("Search").function(
                FunctionDef::new("find", Type::Void)
                    .arg("pageSize", Type::I32)
                    .arg("page_size", Type::I32),
            ),
        );
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::NameCollision { ref owner, .. }) if owner == "find_args"
        ));
    }

    #[test]
    fn test_validate_child_reuses_parent_function() {
        let mut schema = base_schema();
        schema.add_service(
            ServiceDef::new("Scientific")
                .extends("Calculator")
                .function(FunctionDef::new("calculate", Type::I32)),
        );
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::name_collision(
                "Scientific",
                "Scientific.calculate",
                "Calculator.calculate",
                "calculate"
            ))
        );
    }

    #[test]
    fn test_validate_prefixed_method_collision() {
        let mut schema = base_schema();
        schema.add_service(
            ServiceDef::new("Mailer")
                .function(FunctionDef::new("mail", Type::Void))
                .function(FunctionDef::new("sendMail", Type::Void)),
        );
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::NameCollision { ref ident, .. }) if ident == "send_mail"
        ));
    }

    #[test]
    fn test_validate_accepts_client_accessor_names() {
        let mut schema = base_schema();
        schema.add_service(
            ServiceDef::new("Factory")
                .function(FunctionDef::new("new", Type::I32))
                .function(FunctionDef::new("intoChannel", Type::Void).oneway()),
        );
        assert!(validate_schema(&schema).is_ok());

        // `new_` is already taken by the escaped client call for `new`.
        schema.add_service(
            ServiceDef::new("Twice")
                .function(FunctionDef::new("new", Type::Void))
                .function(FunctionDef::new("new_", Type::Void)),
        );
        assert!(matches!(
            validate_schema(&schema),
            Err(SchemaError::NameCollision { ref ident, .. }) if ident == "new_"
        ));
    }

    #[test]
    fn test_validate_missing_parent() {
        let mut schema = base_schema();
        schema.add_service(ServiceDef::new("Child").extends("Nobody"));
        assert_eq!(
            validate_schema(&schema),
            Err(SchemaError::not_found("service", "Nobody"))
        );
    }
}
