//! Generates Rust and XSD for a small calculator schema.
//!
//! Run with: `cargo run --example tutorial -- [output-dir]`
//!
//! Set `RUST_LOG=debug` to see every definition as it is emitted.

use ironidl::prelude::*;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn calculator_schema() -> Schema {
    let mut schema = Schema::new("tutorial");

    schema.add_typedef(TypedefDef::new("MyInteger", Type::I32));
    schema.add_enum(
        EnumDef::new("Operation")
            .value_of("ADD", 1)
            .value_of("SUBTRACT", 2)
            .value_of("MULTIPLY", 3)
            .value_of("DIVIDE", 4),
    );
    schema.add_const(ConstDef::new(
        "INT32CONSTANT",
        Type::I32,
        ConstValue::Integer(9853),
    ));
    schema.add_const(ConstDef::new(
        "MAPCONSTANT",
        Type::map(Type::String, Type::String),
        ConstValue::Map(vec![
            (ConstValue::string("hello"), ConstValue::string("world")),
            (ConstValue::string("goodnight"), ConstValue::string("moon")),
        ]),
    ));

    schema.add_struct(
        StructDef::new("Work")
            .field(Field::new(1, "num1", Type::I32).with_default(ConstValue::Integer(0)))
            .field(Field::new(2, "num2", Type::I32))
            .field(Field::new(3, "op", Type::enumeration("Operation")))
            .field(Field::new(4, "comment", Type::String).xsd_optional()),
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
            .function(FunctionDef::new("zip", Type::Void).oneway()),
    );

    schema
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let out_dir = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join("ironidl-tutorial"));

    let schema = calculator_schema();
    validate_schema(&schema)?;

    let rust_files = write_rust(&schema, &RustOptions::default(), &out_dir)?;

    let mut xsd = XsdEmitter::new(XsdOptions::default());
    let mut sink = DirectorySink::new(&out_dir);
    let xsd_files = Generator::new(&schema).generate_to(&mut xsd, &mut sink)?;

    tracing::info!(
        "Generated {} Rust and {} XSD files in {}",
        rust_files,
        xsd_files,
        out_dir.display()
    );
    for path in sink.written() {
        println!("{}", path.display());
    }
    Ok(())
}
