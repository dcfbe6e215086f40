//! Generation driver.
//!
//! Walks a schema top-down, feeding each definition to an [`Emitter`], and
//! manages the [`OutputSink`] lifecycle around the pass.

use crate::emitter::Emitter;
use crate::error::CodegenError;
use crate::output::{OutputSink, OutputUnit};
use ironidl_schema::Schema;

/// Drives emitters over one immutable schema.
pub struct Generator<'a> {
    schema: &'a Schema,
}

impl<'a> Generator<'a> {
    /// Creates a driver for `schema`.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Returns the schema being generated.
    #[must_use]
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    /// Runs one pass and returns the generated units.
    ///
    /// The first failing definition aborts the pass; its error is wrapped
    /// with the definition's kind and name.
    ///
    /// # Errors
    /// Returns the first `CodegenError` raised by the emitter.
    pub fn generate<E: Emitter + ?Sized>(
        &self,
        emitter: &mut E,
    ) -> Result<Vec<OutputUnit>, CodegenError> {
        let schema = self.schema;
        emitter.open(schema)?;

        for typedef in &schema.typedefs {
            tracing::debug!("[{}] typedef {}", emitter.name(), typedef.name);
            emitter
                .emit_typedef(schema, typedef)
                .map_err(|e| e.in_entity(format!("typedef {}", typedef.name)))?;
        }
        for enum_def in &schema.enums {
            tracing::debug!("[{}] enum {}", emitter.name(), enum_def.name);
            emitter
                .emit_enum(schema, enum_def)
                .map_err(|e| e.in_entity(format!("enum {}", enum_def.name)))?;
        }
        for constant in &schema.constants {
            tracing::debug!("[{}] const {}", emitter.name(), constant.name);
            emitter
                .emit_const(schema, constant)
                .map_err(|e| e.in_entity(format!("const {}", constant.name)))?;
        }
        for struct_def in &schema.structs {
            if struct_def.is_exception {
                tracing::debug!("[{}] exception {}", emitter.name(), struct_def.name);
                emitter
                    .emit_exception(schema, struct_def)
                    .map_err(|e| e.in_entity(format!("exception {}", struct_def.name)))?;
            } else {
                tracing::debug!("[{}] struct {}", emitter.name(), struct_def.name);
                emitter
                    .emit_struct(schema, struct_def)
                    .map_err(|e| e.in_entity(format!("struct {}", struct_def.name)))?;
            }
        }
        for service in &schema.services {
            tracing::debug!("[{}] service {}", emitter.name(), service.name);
            emitter
                .emit_service(schema, service)
                .map_err(|e| e.in_entity(format!("service {}", service.name)))?;
        }

        emitter.close(schema)
    }

    /// Runs one pass and hands the units to `sink`.
    ///
    /// Units reach the sink only after the whole pass succeeded. On any
    /// failure, generation or write, the sink is aborted.
    ///
    /// # Returns
    /// The number of units written.
    ///
    /// # Errors
    /// Returns the first `CodegenError` from generation or from the sink.
    pub fn generate_to<E, S>(&self, emitter: &mut E, sink: &mut S) -> Result<usize, CodegenError>
    where
        E: Emitter + ?Sized,
        S: OutputSink + ?Sized,
    {
        let units = match self.generate(emitter) {
            Ok(units) => units,
            Err(e) => {
                tracing::error!(
                    "[{}] generation of {} aborted: {}",
                    emitter.name(),
                    self.schema.name,
                    e
                );
                sink.abort();
                return Err(e);
            }
        };

        if let Err(e) = write_all(sink, &self.schema.name, &units) {
            tracing::error!(
                "[{}] writing {} failed: {}",
                emitter.name(),
                self.schema.name,
                e
            );
            sink.abort();
            return Err(e);
        }

        tracing::info!(
            "[{}] generated {} units for {}",
            emitter.name(),
            units.len(),
            self.schema.name
        );
        Ok(units.len())
    }
}

fn write_all<S: OutputSink + ?Sized>(
    sink: &mut S,
    schema: &str,
    units: &[OutputUnit],
) -> Result<(), CodegenError> {
    sink.begin(schema)?;
    for unit in units {
        sink.write_unit(unit)?;
    }
    sink.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemorySink;
    use ironidl_schema::{
        ConstDef, ConstValue, EnumDef, Field, ServiceDef, StructDef, Type, TypedefDef,
    };

    /// Records the traversal order.
    #[derive(Default)]
    struct TraceEmitter {
        events: Vec<String>,
        fail_on: Option<String>,
    }

    impl TraceEmitter {
        fn record(&mut self, event: String) -> Result<(), CodegenError> {
            if self.fail_on.as_deref() == Some(event.as_str()) {
                return Err(CodegenError::unsupported(event));
            }
            self.events.push(event);
            Ok(())
        }
    }

    impl Emitter for TraceEmitter {
        fn name(&self) -> &'static str {
            "trace"
        }

        fn open(&mut self, schema: &Schema) -> Result<(), CodegenError> {
            self.record(format!("open {}", schema.name))
        }

        fn emit_typedef(&mut self, _: &Schema, t: &TypedefDef) -> Result<(), CodegenError> {
            self.record(format!("typedef {}", t.name))
        }

        fn emit_enum(&mut self, _: &Schema, e: &EnumDef) -> Result<(), CodegenError> {
            self.record(format!("enum {}", e.name))
        }

        fn emit_const(&mut self, _: &Schema, c: &ConstDef) -> Result<(), CodegenError> {
            self.record(format!("const {}", c.name))
        }

        fn emit_struct(&mut self, _: &Schema, s: &StructDef) -> Result<(), CodegenError> {
            self.record(format!("struct {}", s.name))
        }

        fn emit_service(&mut self, _: &Schema, s: &ServiceDef) -> Result<(), CodegenError> {
            self.record(format!("service {}", s.name))
        }

        fn close(&mut self, _: &Schema) -> Result<Vec<OutputUnit>, CodegenError> {
            Ok(vec![OutputUnit::new("trace.txt", self.events.join("\n"))])
        }
    }

    fn schema() -> Schema {
        let mut schema = Schema::new("trace");
        schema.add_service(ServiceDef::new("Calculator"));
        schema.add_struct(StructDef::exception("Oops"));
        schema.add_struct(StructDef::new("Point").field(Field::new(1, "x", Type::I32)));
        schema.add_const(ConstDef::new("ONE", Type::I32, ConstValue::Integer(1)));
        schema.add_enum(EnumDef::new("Color").value("RED"));
        schema.add_typedef(TypedefDef::new("Id", Type::I64));
        schema
    }

    #[test]
    fn test_traversal_order() {
        let schema = schema();
        let mut emitter = TraceEmitter::default();
        let units = Generator::new(&schema).generate(&mut emitter).unwrap();
        assert_eq!(
            units[0].contents,
            "open trace\ntypedef Id\nenum Color\nconst ONE\nstruct Oops\nstruct Point\nservice Calculator"
        );
    }

    #[test]
    fn test_failure_aborts_sink() {
        let schema = schema();
        let mut emitter = TraceEmitter {
            fail_on: Some("struct Point".to_string()),
            ..TraceEmitter::default()
        };
        let mut sink = MemorySink::new();
        let err = Generator::new(&schema)
            .generate_to(&mut emitter, &mut sink)
            .unwrap_err();

        assert!(err.to_string().contains("while generating struct Point"));
        assert!(sink.units().is_empty());
        assert_eq!(sink.aborted(), 1);
        assert!(!emitter.events.iter().any(|e| e.starts_with("service")));
    }

    #[test]
    fn test_success_commits_sink() {
        let schema = schema();
        let mut emitter = TraceEmitter::default();
        let mut sink = MemorySink::new();
        let written = Generator::new(&schema)
            .generate_to(&mut emitter, &mut sink)
            .unwrap();
        assert_eq!(written, 1);
        assert!(sink.get("trace.txt").is_some());
        assert_eq!(sink.aborted(), 0);
    }
}
