//! # IronIDL Codegen
//!
//! Code generation backends for IronIDL schemas.
//!
//! This crate provides:
//! - The [`Emitter`] trait and the [`Generator`] driver
//! - Output sinks that publish units only after a successful pass
//! - A Rust emitter producing codecs, client stubs and processors
//! - An XSD emitter producing one structural schema per service
//!
//! # Example
//!
//! ```ignore
//! use ironidl_codegen::{RustOptions, generate_rust};
//!
//! let units = generate_rust(&schema, &RustOptions::default())?;
//! for unit in &units {
//!     println!("{}: {} bytes", unit.path, unit.contents.len());
//! }
//! ```

pub mod emitter;
pub mod error;
pub mod generator;
pub mod options;
pub mod output;
pub mod rust;
pub mod writer;
pub mod xsd;

pub use emitter::Emitter;
pub use error::CodegenError;
pub use generator::Generator;
pub use options::{RustOptions, XsdOptions};
pub use output::{DirectorySink, MemorySink, OutputSink, OutputUnit};
pub use rust::RustEmitter;
pub use writer::CodeWriter;
pub use xsd::XsdEmitter;

use ironidl_schema::Schema;
use std::path::Path;

/// Generates Rust units for a schema.
///
/// # Errors
/// Returns the first error raised while generating.
pub fn generate_rust(schema: &Schema, options: &RustOptions) -> Result<Vec<OutputUnit>, CodegenError> {
    let mut emitter = RustEmitter::new(options.clone());
    Generator::new(schema).generate(&mut emitter)
}

/// Generates XSD documents for a schema.
///
/// # Errors
/// Returns the first error raised while generating.
pub fn generate_xsd(schema: &Schema, options: &XsdOptions) -> Result<Vec<OutputUnit>, CodegenError> {
    let mut emitter = XsdEmitter::new(options.clone());
    Generator::new(schema).generate(&mut emitter)
}

/// Generates Rust units for a schema into `dir`.
///
/// Nothing is left behind in `dir` if generation or writing fails.
///
/// # Returns
/// The number of files written.
///
/// # Errors
/// Returns the first generation or IO error.
pub fn write_rust(
    schema: &Schema,
    options: &RustOptions,
    dir: impl AsRef<Path>,
) -> Result<usize, CodegenError> {
    let mut emitter = RustEmitter::new(options.clone());
    let mut sink = DirectorySink::new(dir.as_ref());
    Generator::new(schema).generate_to(&mut emitter, &mut sink)
}
