//! Generates Rust from the fixture schemas into `OUT_DIR`.

use ironidl_codegen::{RustOptions, write_rust};
use ironidl_schema::{
    ConstDef, ConstValue, EnumDef, Field, FunctionDef, Schema, ServiceDef, StructDef, Type,
    TypedefDef, validate_schema,
};
use std::env;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo::rerun-if-changed=build.rs");

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let schema = tutorial();
    validate_schema(&schema)?;
    write_rust(&schema, &RustOptions::default(), out_dir.join("tutorial"))?;
    Ok(())
}

fn tutorial() -> Schema {
    let my_integer = Type::typedef("MyInteger", Type::I32);
    let mut schema = Schema::new("tutorial");

    schema.add_typedef(TypedefDef::new("MyInteger", Type::I32));
    schema.add_typedef(
        TypedefDef::new("Mood", Type::String).with_string_enum(["happy", "sad"]),
    );

    schema.add_enum(
        EnumDef::new("Operation")
            .value_of("ADD", 1)
            .value_of("SUBTRACT", 2)
            .value_of("MULTIPLY", 3)
            .value_of("DIVIDE", 4),
    );
    schema.add_enum(
        EnumDef::new("Color")
            .value("RED")
            .value_of("GREEN", 5)
            .value("BLUE"),
    );

    schema.add_const(ConstDef::new(
        "INT32CONSTANT",
        Type::I32,
        ConstValue::Integer(9853),
    ));
    schema.add_const(ConstDef::new(
        "GREETING",
        Type::String,
        ConstValue::string("hello \"world\""),
    ));
    schema.add_const(ConstDef::new(
        "MAPCONSTANT",
        Type::map(Type::String, Type::String),
        ConstValue::Map(vec![
            (ConstValue::string("hello"), ConstValue::string("world")),
            (ConstValue::string("goodnight"), ConstValue::string("moon")),
        ]),
    ));
    schema.add_const(ConstDef::new(
        "PI",
        Type::Double,
        ConstValue::Double(3.25),
    ));
    schema.add_const(ConstDef::new(
        "DEFAULT_COLOR",
        Type::enumeration("Color"),
        ConstValue::Integer(5),
    ));
    schema.add_const(ConstDef::new(
        "ORIGIN",
        Type::structure("Point"),
        ConstValue::structure([("x", ConstValue::Integer(3)), ("y", ConstValue::Integer(4))]),
    ));
    schema.add_const(ConstDef::new(
        "MATRIX",
        Type::list(Type::list(my_integer.clone())),
        ConstValue::List(vec![
            ConstValue::List(vec![ConstValue::Integer(1), ConstValue::Integer(2)]),
            ConstValue::List(vec![]),
        ]),
    ));
    schema.add_const(ConstDef::new(
        "PRIMES",
        Type::set(Type::I16),
        ConstValue::List(vec![
            ConstValue::Integer(7),
            ConstValue::Integer(2),
            ConstValue::Integer(3),
        ]),
    ));

    schema.add_struct(
        StructDef::new("Work")
            .field(Field::new(1, "num1", Type::I32).with_default(ConstValue::Integer(0)))
            .field(Field::new(2, "num2", Type::I32))
            .field(Field::new(3, "op", Type::enumeration("Operation")))
            .field(Field::new(4, "comment", Type::String)),
    );
    schema.add_struct(
        StructDef::new("Point")
            .field(Field::new(1, "x", Type::I32).with_default(ConstValue::Integer(0)))
            .field(Field::new(2, "y", Type::I32).with_default(ConstValue::Integer(0))),
    );
    schema.add_struct(
        StructDef::new("PointV2")
            .field(Field::new(1, "x", Type::I32))
            .field(Field::new(2, "y", Type::I32))
            .field(Field::new(
                3,
                "extra",
                Type::list(Type::map(Type::String, Type::structure("Work"))),
            ))
            .field(Field::new(4, "label", Type::String)),
    );
    schema.add_struct(
        StructDef::new("PointWide")
            .field(Field::new(1, "x", Type::I64))
            .field(Field::new(2, "y", Type::I32)),
    );
    schema.add_struct(
        StructDef::new("Containers")
            .field(Field::new(1, "ints", Type::list(Type::I32)))
            .field(Field::new(2, "names", Type::set(Type::String)))
            .field(Field::new(
                3,
                "groups",
                Type::map(Type::String, Type::list(Type::structure("Point"))),
            ))
            .field(Field::new(
                4,
                "weights",
                Type::map(Type::I16, Type::set(Type::Double)),
            ))
            .field(Field::new(5, "matrix", Type::list(Type::list(my_integer))))
            .field(Field::new(6, "color", Type::enumeration("Color")))
            .field(Field::new(7, "flag", Type::Bool))
            .field(Field::new(8, "small", Type::Byte))
            .field(Field::new(9, "big", Type::I64))
            .field(Field::new(10, "ratio", Type::Double))
            .field(Field::new(11, "mood", Type::typedef("Mood", Type::String)))
            .field(
                Field::new(12, "origin", Type::structure("Point")).with_default(
                    ConstValue::structure([
                        ("x", ConstValue::Integer(1)),
                        ("y", ConstValue::Integer(2)),
                    ]),
                ),
            )
            .field(
                Field::new(13, "palette", Type::list(Type::enumeration("Color"))).with_default(
                    ConstValue::List(vec![ConstValue::Integer(0), ConstValue::Integer(6)]),
                ),
            ),
    );
    schema.add_struct(
        StructDef::exception("InvalidOperation")
            .field(Field::new(1, "whatOp", Type::I32))
            .field(Field::new(2, "why", Type::String)),
    );
    schema.add_struct(
        StructDef::new("SharedStruct")
            .field(Field::new(1, "key", Type::I32))
            .field(Field::new(2, "value", Type::String)),
    );

    schema.add_service(
        ServiceDef::new("SharedService").function(
            FunctionDef::new("getStruct", Type::structure("SharedStruct")).arg("key", Type::I32),
        ),
    );
    schema.add_service(
        ServiceDef::new("Calculator")
            .extends("SharedService")
            .function(FunctionDef::new("ping", Type::Void))
            .function(
                FunctionDef::new("add", Type::I32)
                    .arg("num1", Type::I32)
                    .arg("num2", Type::I32),
            )
            .function(
                FunctionDef::new("calculate", Type::I32)
                    .arg("logid", Type::I32)
                    .arg("w", Type::structure("Work"))
                    .throws("ouch", "InvalidOperation"),
            )
            .function(
                FunctionDef::new("reset", Type::Void).throws("ouch", "InvalidOperation"),
            )
            .function(FunctionDef::new("zip", Type::Void).oneway()),
    );
    schema.add_service(
        ServiceDef::new("ScientificCalculator")
            .extends("Calculator")
            .function(FunctionDef::new("sqrt", Type::Double).arg("value", Type::Double)),
    );
    // Function names that match the client's own methods.
    schema.add_service(
        ServiceDef::new("Factory")
            .function(FunctionDef::new("new", Type::I32).arg("seed", Type::I32))
            .function(
                FunctionDef::new("channelMut", Type::I32).arg_field(
                    Field::new(1, "batch", Type::I32).with_default(ConstValue::Integer(8)),
                ),
            )
            .function(FunctionDef::new("intoChannel", Type::Void).oneway()),
    );

    schema
}
