//! XSD element writing.
//!
//! This module provides the XSD type naming rules and the writers for
//! typedef simple types, struct complex types and field elements.

use crate::error::CodegenError;
use ironidl_schema::{Field, StructDef, Type, TypedefDef};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

/// Namespace URI bound to the `xsd` prefix.
pub const XSD_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema";

/// Returns the XSD type name referenced for `ty`.
///
/// Typedefs keep their own name, base types map to `xsd:*` builtins, enums
/// are `xsd:int`, structs use their name, and other containers are named
/// `container`.
#[must_use]
pub fn type_name(ty: &Type) -> String {
    match ty {
        Type::Typedef { name, .. } => name.clone(),
        Type::Void => "void".to_string(),
        Type::String => "xsd:string".to_string(),
        Type::Bool => "xsd:boolean".to_string(),
        Type::Byte => "xsd:byte".to_string(),
        Type::I16 => "xsd:short".to_string(),
        Type::I32 | Type::Enum(_) => "xsd:int".to_string(),
        Type::I64 => "xsd:long".to_string(),
        Type::Double => "xsd:decimal".to_string(),
        Type::Struct(name) | Type::Exception(name) => name.clone(),
        Type::List(_) | Type::Set(_) | Type::Map(_, _) => "container".to_string(),
    }
}

/// Occurrence and nullability of one element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Occurs {
    /// Emits `minOccurs="0"`.
    pub optional: bool,
    /// Emits `nillable="true"`.
    pub nillable: bool,
    /// Repeated list element: `minOccurs="0" maxOccurs="unbounded"`.
    pub list_element: bool,
}

/// Thin wrapper over a `quick-xml` writer producing indented XSD.
pub struct XsdWriter {
    writer: Writer<Vec<u8>>,
}

impl XsdWriter {
    /// Creates a writer indenting nested elements by `indent` spaces.
    #[must_use]
    pub fn new(indent: usize) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', indent),
        }
    }

    /// Writes the XML declaration.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn declaration(&mut self) -> Result<(), CodegenError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Writes a comment.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn comment(&mut self, text: &str) -> Result<(), CodegenError> {
        self.writer
            .write_event(Event::Comment(BytesText::from_escaped(format!(" {text} "))))?;
        Ok(())
    }

    /// Opens an element.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), CodegenError> {
        self.writer.write_event(Event::Start(element(name, attrs)))?;
        Ok(())
    }

    /// Writes a self-closing element.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<(), CodegenError> {
        self.writer.write_event(Event::Empty(element(name, attrs)))?;
        Ok(())
    }

    /// Closes an element.
    ///
    /// # Errors
    /// Returns an error if the underlying writer fails.
    pub fn end(&mut self, name: &str) -> Result<(), CodegenError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Consumes the writer and returns the document text.
    ///
    /// # Errors
    /// Returns a generation error if the output is not valid UTF-8.
    pub fn into_string(self) -> Result<String, CodegenError> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(|e| CodegenError::generation(e.to_string()))
    }
}

fn element<'a>(name: &'a str, attrs: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(name);
    for attr in attrs {
        start.push_attribute(*attr);
    }
    start
}

/// Writes a typedef as an `xsd:simpleType` restriction.
///
/// # Errors
/// Returns an error if the underlying writer fails.
pub fn write_typedef(w: &mut XsdWriter, typedef: &TypedefDef) -> Result<(), CodegenError> {
    let base = type_name(&typedef.target);
    w.start("xsd:simpleType", &[("name", typedef.name.as_str())])?;
    match &typedef.string_enum {
        Some(values) if typedef.target.resolve() == &Type::String => {
            w.start("xsd:restriction", &[("base", base.as_str())])?;
            for value in values {
                w.empty("xsd:enumeration", &[("value", value.as_str())])?;
            }
            w.end("xsd:restriction")?;
        }
        _ => w.empty("xsd:restriction", &[("base", base.as_str())])?,
    }
    w.end("xsd:simpleType")
}

/// Writes a struct or exception as an `xsd:complexType`.
///
/// `xsd_all` structs use `xsd:all` and make every element optional.
///
/// # Errors
/// Returns an error if the underlying writer fails.
pub fn write_struct(w: &mut XsdWriter, def: &StructDef) -> Result<(), CodegenError> {
    let group = if def.xsd_all { "xsd:all" } else { "xsd:sequence" };
    w.start("xsd:complexType", &[("name", def.name.as_str())])?;
    w.start(group, &[])?;
    for field in &def.fields {
        let occurs = Occurs {
            optional: field.xsd.optional || def.xsd_all,
            nillable: field.xsd.nillable,
            list_element: false,
        };
        write_element(w, &field.name, &field.ty, field.xsd.attrs.as_deref(), occurs)?;
    }
    w.end(group)?;
    w.end("xsd:complexType")
}

/// Writes one element declaration.
///
/// Void and list types produce an element with an inline complex type; a
/// list becomes a repeated sequence of its element type plus a boolean
/// `list` attribute. Other types reference their XSD type by name, or
/// extend it when attributes are attached.
///
/// # Errors
/// Returns an error if the underlying writer fails.
pub fn write_element(
    w: &mut XsdWriter,
    name: &str,
    ty: &Type,
    attrs: Option<&[Field]>,
    occurs: Occurs,
) -> Result<(), CodegenError> {
    let mut element_attrs: Vec<(&str, &str)> = vec![("name", name)];
    let type_ref = type_name(ty);
    let resolved = ty.resolve();
    let is_list = matches!(resolved, Type::List(_));

    if !resolved.is_void() && !is_list && attrs.is_none() {
        element_attrs.push(("type", type_ref.as_str()));
        push_occurs(&mut element_attrs, occurs);
        return w.empty("xsd:element", &element_attrs);
    }

    push_occurs(&mut element_attrs, occurs);
    w.start("xsd:element", &element_attrs)?;

    match resolved {
        Type::Void if attrs.is_none() => w.empty("xsd:complexType", &[])?,
        Type::Void | Type::List(_) => {
            w.start("xsd:complexType", &[])?;
            if let Type::List(elem) = resolved {
                w.start(
                    "xsd:sequence",
                    &[("minOccurs", "0"), ("maxOccurs", "unbounded")],
                )?;
                let sub_name = list_element_name(name, elem);
                let sub_occurs = Occurs {
                    list_element: true,
                    ..Occurs::default()
                };
                write_element(w, &sub_name, elem, None, sub_occurs)?;
                w.end("xsd:sequence")?;
                w.empty("xsd:attribute", &[("name", "list"), ("type", "xsd:boolean")])?;
            }
            write_attributes(w, attrs)?;
            w.end("xsd:complexType")?;
        }
        _ => {
            w.start("xsd:complexType", &[])?;
            w.start("xsd:complexContent", &[])?;
            w.start("xsd:extension", &[("base", type_ref.as_str())])?;
            write_attributes(w, attrs)?;
            w.end("xsd:extension")?;
            w.end("xsd:complexContent")?;
            w.end("xsd:complexType")?;
        }
    }
    w.end("xsd:element")
}

/// Writes the XSD prologue and opens `xsd:schema`.
///
/// # Errors
/// Returns an error if the underlying writer fails.
pub fn write_schema_start(w: &mut XsdWriter, namespace: Option<&str>) -> Result<(), CodegenError> {
    w.declaration()?;
    let mut attrs: Vec<(&str, &str)> = vec![("xmlns:xsd", XSD_NAMESPACE)];
    if let Some(ns) = namespace.filter(|ns| !ns.is_empty()) {
        attrs.push(("targetNamespace", ns));
        attrs.push(("xmlns", ns));
        attrs.push(("elementFormDefault", "qualified"));
    }
    w.start("xsd:schema", &attrs)
}

fn list_element_name(name: &str, elem: &Type) -> String {
    match elem {
        Type::Typedef { .. } | Type::Struct(_) | Type::Exception(_) => type_name(elem),
        _ => format!("{name}_elt"),
    }
}

fn push_occurs(attrs: &mut Vec<(&str, &str)>, occurs: Occurs) {
    if occurs.optional || occurs.list_element {
        attrs.push(("minOccurs", "0"));
    }
    if occurs.list_element {
        attrs.push(("maxOccurs", "unbounded"));
    }
    if occurs.nillable {
        attrs.push(("nillable", "true"));
    }
}

fn write_attributes(w: &mut XsdWriter, attrs: Option<&[Field]>) -> Result<(), CodegenError> {
    for attr in attrs.unwrap_or_default() {
        w.empty(
            "xsd:attribute",
            &[("name", attr.name.as_str()), ("type", type_name(&attr.ty).as_str())],
        )?;
    }
    Ok(())
}
