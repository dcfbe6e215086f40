//! Service stub generation.
//!
//! This module provides, per service:
//! - Argument and result helper structs for every function
//! - The `<S>If` handler trait, with the parent's trait as supertrait
//! - `<S>Client`, which owns a channel or wraps the parent client
//! - `<S>Processor`, which dispatches by function name and falls back to
//!   the parent processor

use crate::error::CodegenError;
use crate::options::RustOptions;
use crate::rust::consts::ConstRenderer;
use crate::rust::structs::StructGenerator;
use crate::rust::types::rust_type;
use crate::writer::CodeWriter;
use ironidl_schema::names::{client_method_ident, field_ident, prefixed_ident, type_ident};
use ironidl_schema::{Field, FunctionDef, Schema, ServiceDef, StructDef};

/// Generator for service interfaces, clients and processors.
pub struct ServiceGenerator<'a> {
    schema: &'a Schema,
    options: &'a RustOptions,
}

/// Names shared by the pieces generated for one service.
struct ServiceNames {
    service: String,
    iface: String,
    client: String,
    processor: String,
}

impl ServiceNames {
    fn new(service: &ServiceDef) -> Self {
        let base = type_ident(&service.name);
        Self {
            service: service.name.clone(),
            iface: format!("{base}If"),
            client: format!("{base}Client"),
            processor: format!("{base}Processor"),
        }
    }

    fn args_def(&self, function: &FunctionDef) -> StructDef {
        let mut def = function.args.clone();
        def.name = format!("{}_{}_args", self.service, function.name);
        def
    }

    fn result_def(&self, function: &FunctionDef) -> StructDef {
        let mut def = StructDef::new(format!("{}_{}_result", self.service, function.name));
        if function.has_return() {
            def.add_field(Field::new(0, "success", function.return_type.clone()));
        }
        for field in &function.exceptions.fields {
            def.add_field(field.clone());
        }
        def
    }

    fn args_ident(&self, function: &FunctionDef) -> String {
        type_ident(&self.args_def(function).name)
    }

    fn result_ident(&self, function: &FunctionDef) -> String {
        type_ident(&format!("{}_{}_result", self.service, function.name))
    }
}

impl<'a> ServiceGenerator<'a> {
    /// Creates a new service generator.
    #[must_use]
    pub fn new(schema: &'a Schema, options: &'a RustOptions) -> Self {
        Self { schema, options }
    }

    /// Generates every piece of `service`.
    ///
    /// # Errors
    /// Returns `SchemaError::TypeNotFound` if the parent service does not
    /// exist, or any error from the helper struct generation.
    pub fn generate(&self, w: &mut CodeWriter, service: &ServiceDef) -> Result<(), CodegenError> {
        let parent = self.schema.parent_of(service)?.map(ServiceNames::new);
        let names = ServiceNames::new(service);

        self.generate_helpers(w, &names, service)?;
        self.generate_interface(w, &names, parent.as_ref(), service);
        self.generate_client(w, &names, parent.as_ref(), service)?;
        self.generate_processor(w, &names, parent.as_ref(), service)
    }

    fn generate_helpers(
        &self,
        w: &mut CodeWriter,
        names: &ServiceNames,
        service: &ServiceDef,
    ) -> Result<(), CodegenError> {
        let structs = StructGenerator::new(self.schema, self.options);
        for function in &service.functions {
            structs.generate(w, &names.args_def(function))?;
            if !function.oneway {
                structs.generate(w, &names.result_def(function))?;
            }
        }
        Ok(())
    }

    fn generate_interface(
        &self,
        w: &mut CodeWriter,
        names: &ServiceNames,
        parent: Option<&ServiceNames>,
        service: &ServiceDef,
    ) {
        if self.options.has_docs() {
            w.doc("///", &format!("Handler interface of service `{}`.", names.service));
        }
        match parent {
            Some(parent) => w.line(&format!("pub trait {}: {} {{", names.iface, parent.iface)),
            None => w.line(&format!("pub trait {} {{", names.iface)),
        }
        w.indent();
        for (i, function) in service.functions.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            if self.options.has_docs() && function.oneway {
                w.doc("///", "One-way: no reply is sent.");
            }
            w.line(&format!("{};", method_signature(function, "&mut self")));
        }
        w.dedent();
        w.line("}");
        w.blank();
    }

    fn generate_client(
        &self,
        w: &mut CodeWriter,
        names: &ServiceNames,
        parent: Option<&ServiceNames>,
        service: &ServiceDef,
    ) -> Result<(), CodegenError> {
        if self.options.has_docs() {
            w.doc("///", &format!("Client of service `{}`.", names.service));
        }
        w.line("#[derive(Debug)]");
        w.block::<CodegenError, _>(&format!("pub struct {}<I, O>", names.client), "", |w| {
            match parent {
                Some(parent) => w.line(&format!("parent: {}<I, O>,", parent.client)),
                None => w.line("channel: rt::ClientChannel<I, O>,"),
            }
            Ok(())
        })?;
        w.blank();

        let header = format!(
            "impl<I: rt::InputProtocol, O: rt::OutputProtocol> {}<I, O>",
            names.client
        );
        w.block::<CodegenError, _>(&header, "", |w| {
            if self.options.has_docs() {
                w.doc("///", "Creates a client reading replies from `input` and writing calls to `output`.");
            }
            w.block::<CodegenError, _>("pub fn new(input: I, output: O) -> Self", "", |w| {
                match parent {
                    Some(parent) => w.line(&format!(
                        "Self {{ parent: {}::new(input, output) }}",
                        parent.client
                    )),
                    None => w.line("Self { channel: rt::ClientChannel::new(input, output) }"),
                }
                Ok(())
            })?;

            if parent.is_none() {
                w.blank();
                w.block::<CodegenError, _>(
                    "pub fn channel_mut(&mut self) -> &mut rt::ClientChannel<I, O>",
                    "",
                    |w| {
                        w.line("&mut self.channel");
                        Ok(())
                    },
                )?;
            }

            w.blank();
            if self.options.has_docs() {
                w.doc("///", "Consumes the client and returns its channel.");
            }
            w.block::<CodegenError, _>(
                "pub fn into_channel(self) -> rt::ClientChannel<I, O>",
                "",
                |w| {
                    match parent {
                        Some(_) => w.line("self.parent.into_channel()"),
                        None => w.line("self.channel"),
                    }
                    Ok(())
                },
            )?;

            for function in &service.functions {
                w.blank();
                self.generate_client_call(w, function)?;
                w.blank();
                self.generate_send(w, names, function)?;
                if !function.oneway {
                    w.blank();
                    self.generate_recv(w, names, function)?;
                }
            }
            Ok(())
        })?;
        w.blank();

        if let Some(parent) = parent {
            generate_deref(w, &names.client, &parent.client);
        }
        Ok(())
    }

    fn generate_client_call(
        &self,
        w: &mut CodeWriter,
        function: &FunctionDef,
    ) -> Result<(), CodegenError> {
        let method = field_ident(&function.name);
        let call_args = arg_names(function).join(", ");
        let send = prefixed_ident("send", &function.name);
        let recv = prefixed_ident("recv", &function.name);
        let signature = method_signature(function, "&mut self").replacen(
            &format!("fn {method}("),
            &format!("fn {}(", client_method_ident(&function.name)),
            1,
        );
        w.block::<CodegenError, _>(
            &format!("pub {signature}"),
            "",
            |w| {
                if function.oneway {
                    w.line(&format!("self.{send}({call_args})"));
                } else {
                    w.line(&format!("self.{send}({call_args})?;"));
                    w.line(&format!("self.{recv}()"));
                }
                Ok(())
            },
        )
    }

    fn generate_send(
        &self,
        w: &mut CodeWriter,
        names: &ServiceNames,
        function: &FunctionDef,
    ) -> Result<(), CodegenError> {
        let params = arg_params(function);
        let header = format!(
            "pub fn {}(&mut self{}) -> rt::Result<()>",
            prefixed_ident("send", &function.name),
            params
                .iter()
                .map(|p| format!(", {p}"))
                .collect::<String>()
        );
        let args_ident = names.args_ident(function);
        let kind = if function.oneway { "Oneway" } else { "Call" };

        w.block::<CodegenError, _>(&header, "", |w| {
            if function.args.fields.is_empty() {
                w.line(&format!("let args = {args_ident}::default();"));
            } else {
                w.block::<CodegenError, _>(&format!("let args = {args_ident}"), ";", |w| {
                    for name in arg_names(function) {
                        w.line(&format!("{name}: Some({name}),"));
                    }
                    Ok(())
                })?;
            }
            w.line("let seq_id = self.channel_mut().next_seq_id();");
            w.line("let output = self.channel_mut().output_mut();");
            w.line(&format!(
                "output.write_message_begin(&rt::MessageHeader::new({:?}, rt::MessageKind::{kind}, seq_id))?;",
                function.name
            ));
            w.line("args.write(output)?;");
            w.line("output.write_message_end()?;");
            w.line("output.flush()");
            Ok(())
        })
    }

    fn generate_recv(
        &self,
        w: &mut CodeWriter,
        names: &ServiceNames,
        function: &FunctionDef,
    ) -> Result<(), CodegenError> {
        let header = format!(
            "pub fn {}(&mut self) -> rt::Result<{}>",
            prefixed_ident("recv", &function.name),
            rust_type(&function.return_type)
        );
        let result_ident = names.result_ident(function);

        w.block::<CodegenError, _>(&header, "", |w| {
            w.line("let input = self.channel_mut().input_mut();");
            w.line("let header = input.read_message_begin()?;");
            w.block::<CodegenError, _>("if header.kind == rt::MessageKind::Exception", "", |w| {
                w.line("let x = rt::ApplicationException::read(input)?;");
                w.line("input.read_message_end()?;");
                w.line("return Err(rt::Error::Application(x));");
                Ok(())
            })?;
            generate_reject_reply(
                w,
                "header.kind != rt::MessageKind::Reply",
                "InvalidMessageType",
                &format!("{} failed: unexpected {{:?}} message", function.name),
                "header.kind",
            )?;
            generate_reject_reply(
                w,
                &format!("header.name != {:?}", function.name),
                "WrongMethodName",
                &format!("{} failed: reply is for {{}}", function.name),
                "header.name",
            )?;
            if function.has_return() || !function.exceptions.is_empty() {
                w.line(&format!("let result = {result_ident}::read_new(input)?;"));
            } else {
                w.line(&format!("{result_ident}::read_new(input)?;"));
            }
            w.line("input.read_message_end()?;");

            if function.has_return() {
                w.block::<CodegenError, _>("if let Some(success) = result.success", "", |w| {
                    w.line("return Ok(success);");
                    Ok(())
                })?;
            }
            for field in &function.exceptions.fields {
                let ident = field_ident(&field.name);
                w.block::<CodegenError, _>(&format!("if let Some({ident}) = result.{ident}"), "", |w| {
                    w.line(&format!("return Err(rt::Error::user({ident}));"));
                    Ok(())
                })?;
            }

            if function.has_return() {
                w.line("Err(rt::Error::Application(rt::ApplicationException::new(");
                w.indent();
                w.line("rt::ApplicationExceptionKind::MissingResult,");
                w.line(&format!("{:?},", format!("{} failed: unknown result", function.name)));
                w.dedent();
                w.line(")))");
            } else {
                w.line("Ok(())");
            }
            Ok(())
        })
    }

    fn generate_processor(
        &self,
        w: &mut CodeWriter,
        names: &ServiceNames,
        parent: Option<&ServiceNames>,
        service: &ServiceDef,
    ) -> Result<(), CodegenError> {
        if self.options.has_docs() {
            w.doc("///", &format!("Processor dispatching calls of service `{}` to a handler.", names.service));
        }
        w.line("#[derive(Debug)]");
        w.block::<CodegenError, _>(&format!("pub struct {}<H>", names.processor), "", |w| {
            w.line("handler: H,");
            Ok(())
        })?;
        w.blank();

        w.block::<CodegenError, _>(
            &format!("impl<H: {}> {}<H>", names.iface, names.processor),
            "",
            |w| {
                if self.options.has_docs() {
                    w.doc("///", "Functions this service declares, excluding inherited ones.");
                }
                let methods = service
                    .functions
                    .iter()
                    .map(|f| format!("{:?}", f.name))
                    .collect::<Vec<_>>()
                    .join(", ");
                w.line(&format!("pub const METHODS: &'static [&'static str] = &[{methods}];"));
                w.blank();
                w.block::<CodegenError, _>("pub fn new(handler: H) -> Self", "", |w| {
                    w.line("Self { handler }");
                    Ok(())
                })?;
                w.blank();
                w.block::<CodegenError, _>("pub fn handler(&self) -> &H", "", |w| {
                    w.line("&self.handler");
                    Ok(())
                })?;
                w.blank();
                w.block::<CodegenError, _>("pub fn handler_mut(&mut self) -> &mut H", "", |w| {
                    w.line("&mut self.handler");
                    Ok(())
                })?;
                w.blank();
                w.block::<CodegenError, _>("pub fn into_handler(self) -> H", "", |w| {
                    w.line("self.handler");
                    Ok(())
                })?;
                w.blank();
                self.generate_dispatch_call(w, parent, service)?;
                for function in &service.functions {
                    w.blank();
                    self.generate_process_function(w, names, function)?;
                }
                Ok(())
            },
        )?;
        w.blank();

        w.block::<CodegenError, _>(
            &format!("impl<H: {}> rt::Processor for {}<H>", names.iface, names.processor),
            "",
            |w| {
                w.line("fn dispatch(");
                w.indent();
                w.line("&mut self,");
                w.line("header: &rt::MessageHeader,");
                w.line("input: &mut dyn rt::InputProtocol,");
                w.line("output: &mut dyn rt::OutputProtocol,");
                w.dedent();
                w.block::<CodegenError, _>(") -> rt::Result<bool>", "", |w| {
                    w.line("Self::dispatch_call(&mut self.handler, header, input, output)");
                    Ok(())
                })
            },
        )?;
        w.blank();
        Ok(())
    }

    fn generate_dispatch_call(
        &self,
        w: &mut CodeWriter,
        parent: Option<&ServiceNames>,
        service: &ServiceDef,
    ) -> Result<(), CodegenError> {
        if self.options.has_docs() {
            w.doc(
                "///",
                "Runs the function named by `header`, or returns `Ok(false)` without\nconsuming input if neither this service nor an ancestor declares it.",
            );
        }
        w.line("pub fn dispatch_call(");
        w.indent();
        w.line("handler: &mut H,");
        w.line("header: &rt::MessageHeader,");
        w.line("input: &mut dyn rt::InputProtocol,");
        w.line("output: &mut dyn rt::OutputProtocol,");
        w.dedent();

        let fallback = match parent {
            Some(parent) => format!(
                "{}::<H>::dispatch_call(handler, header, input, output)",
                parent.processor
            ),
            None => "Ok(false)".to_string(),
        };

        w.block::<CodegenError, _>(") -> rt::Result<bool>", "", |w| {
            if service.functions.is_empty() {
                if parent.is_none() {
                    w.line("let _ = (handler, header, input, output);");
                }
                w.line(&fallback);
                return Ok(());
            }
            w.block::<CodegenError, _>("match header.name.as_str()", "", |w| {
                for function in &service.functions {
                    w.line(&format!(
                        "{:?} => Self::{}(handler, header.seq_id, input, output)?,",
                        function.name,
                        prefixed_ident("process", &function.name)
                    ));
                }
                w.line(&format!("_ => return {fallback},"));
                Ok(())
            })?;
            w.line("Ok(true)");
            Ok(())
        })
    }

    fn generate_process_function(
        &self,
        w: &mut CodeWriter,
        names: &ServiceNames,
        function: &FunctionDef,
    ) -> Result<(), CodegenError> {
        let method = field_ident(&function.name);
        let (seq_id, output) = if function.oneway {
            ("_seq_id", "_output")
        } else {
            ("seq_id", "output")
        };
        w.line(&format!("fn {}(", prefixed_ident("process", &function.name)));
        w.indent();
        w.line("handler: &mut H,");
        w.line(&format!("{seq_id}: i32,"));
        w.line("input: &mut dyn rt::InputProtocol,");
        w.line(&format!("{output}: &mut dyn rt::OutputProtocol,"));
        w.dedent();

        let renderer = ConstRenderer::new(self.schema);
        let mut call_args = Vec::with_capacity(function.args.fields.len());
        for field in &function.args.fields {
            let ident = field_ident(&field.name);
            call_args.push(match &field.default {
                Some(value) => format!(
                    "args.{ident}.unwrap_or_else(|| {})",
                    renderer.render(&field.ty, value)?
                ),
                None => format!("args.{ident}.unwrap_or_default()"),
            });
        }
        let call = format!("handler.{method}({})", call_args.join(", "));

        w.block::<CodegenError, _>(") -> rt::Result<()>", "", |w| {
            if function.args.fields.is_empty() {
                w.line(&format!("{}::read_new(input)?;", names.args_ident(function)));
            } else {
                w.line(&format!("let args = {}::read_new(input)?;", names.args_ident(function)));
            }
            w.line("input.read_message_end()?;");

            if function.oneway {
                if function.has_return() {
                    w.line(&format!("{call}?;"));
                    w.line("Ok(())");
                } else {
                    w.line(&call);
                }
                return Ok(());
            }

            let result_ident = names.result_ident(function);
            let exceptions = &function.exceptions.fields;
            if exceptions.is_empty() {
                if function.has_return() {
                    w.line(&format!("let mut result = {result_ident}::absent();"));
                    w.line(&format!("result.success = Some({call}?);"));
                } else {
                    w.line(&format!("let result = {result_ident}::absent();"));
                    w.line(&format!("{call}?;"));
                }
            } else {
                w.line(&format!("let mut result = {result_ident}::absent();"));
                w.block::<CodegenError, _>(&format!("match {call}"), "", |w| {
                    if function.has_return() {
                        w.line("Ok(success) => result.success = Some(success),");
                    } else {
                        w.line("Ok(()) => {}");
                    }
                    w.block::<CodegenError, _>("Err(err) =>", "", |w| {
                        w.line("let pending = Some(err);");
                        for field in exceptions {
                            w.line(&format!(
                                "let pending = pending.and_then(|err| rt::capture(err, &mut result.{}));",
                                field_ident(&field.name)
                            ));
                        }
                        w.block::<CodegenError, _>("if let Some(err) = pending", "", |w| {
                            w.line("return Err(err);");
                            Ok(())
                        })
                    })
                })?;
            }

            w.line(&format!(
                "output.write_message_begin(&rt::MessageHeader::new({:?}, rt::MessageKind::Reply, seq_id))?;",
                function.name
            ));
            w.line("result.write(output)?;");
            w.line("output.write_message_end()?;");
            w.line("output.flush()");
            Ok(())
        })
    }
}

/// Emits a guard that drains the reply body and fails with an application
/// exception of `kind` when `condition` holds.
fn generate_reject_reply(
    w: &mut CodeWriter,
    condition: &str,
    kind: &str,
    message: &str,
    detail: &str,
) -> Result<(), CodegenError> {
    w.block::<CodegenError, _>(&format!("if {condition}"), "", |w| {
        w.line("input.skip(rt::WireKind::Struct)?;");
        w.line("input.read_message_end()?;");
        w.line("return Err(rt::Error::Application(rt::ApplicationException::new(");
        w.indent();
        w.line(&format!("rt::ApplicationExceptionKind::{kind},"));
        w.line(&format!("format!({message:?}, {detail}),"));
        w.dedent();
        w.line(")));");
        Ok(())
    })
}

fn arg_names(function: &FunctionDef) -> Vec<String> {
    function
        .args
        .fields
        .iter()
        .map(|f| field_ident(&f.name))
        .collect()
}

fn arg_params(function: &FunctionDef) -> Vec<String> {
    function
        .args
        .fields
        .iter()
        .map(|f| format!("{}: {}", field_ident(&f.name), rust_type(&f.ty)))
        .collect()
}

fn method_signature(function: &FunctionDef, receiver: &str) -> String {
    let mut params = vec![receiver.to_string()];
    params.extend(arg_params(function));
    format!(
        "fn {}({}) -> rt::Result<{}>",
        field_ident(&function.name),
        params.join(", "),
        rust_type(&function.return_type)
    )
}

fn generate_deref(w: &mut CodeWriter, client: &str, parent_client: &str) {
    w.line(&format!("impl<I, O> ::std::ops::Deref for {client}<I, O> {{"));
    w.indent();
    w.line(&format!("type Target = {parent_client}<I, O>;"));
    w.blank();
    w.line("fn deref(&self) -> &Self::Target {");
    w.line("    &self.parent");
    w.line("}");
    w.dedent();
    w.line("}");
    w.blank();
    w.line(&format!("impl<I, O> ::std::ops::DerefMut for {client}<I, O> {{"));
    w.indent();
    w.line("fn deref_mut(&mut self) -> &mut Self::Target {");
    w.line("    &mut self.parent");
    w.line("}");
    w.dedent();
    w.line("}");
    w.blank();
}
