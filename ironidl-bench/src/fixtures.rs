//! Synthetic schemas for generation benchmarks.

use ironidl_schema::{ConstValue, EnumDef, Field, FunctionDef, Schema, ServiceDef, StructDef, Type};

/// Builds a schema with `structs` record types, one enum, and a service
/// exposing one function per record.
#[must_use]
pub fn wide_schema(structs: usize) -> Schema {
    let mut schema = Schema::new("bench");
    schema.add_enum(
        EnumDef::new("Level")
            .value("LOW")
            .value("MEDIUM")
            .value("HIGH"),
    );
    schema.add_struct(
        StructDef::exception("Failure")
            .field(Field::new(1, "code", Type::I32))
            .field(Field::new(2, "reason", Type::String)),
    );

    let mut service = ServiceDef::new("Store");
    for i in 0..structs {
        let name = format!("Record{i}");
        schema.add_struct(
            StructDef::new(&name)
                .field(Field::new(1, "id", Type::I64))
                .field(Field::new(2, "level", Type::enumeration("Level")))
                .field(
                    Field::new(3, "tags", Type::set(Type::String))
                        .with_default(ConstValue::List(vec![ConstValue::string("new")])),
                )
                .field(Field::new(
                    4,
                    "history",
                    Type::map(Type::I32, Type::list(Type::Double)),
                )),
        );
        service = service.function(
            FunctionDef::new(format!("put{i}"), Type::Bool)
                .arg("record", Type::structure(&name))
                .throws("failure", "Failure"),
        );
    }
    schema.add_service(service);
    schema
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wide_schema_is_valid() {
        let schema = wide_schema(8);
        ironidl_schema::validate_schema(&schema).unwrap();
        assert_eq!(schema.services.len(), 1);
        assert_eq!(schema.services[0].functions.len(), 8);
    }
}
