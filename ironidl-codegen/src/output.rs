//! Output units and sinks.
//!
//! A generation pass produces a list of [`OutputUnit`]s in memory. Only
//! once the whole schema generated successfully are the units handed to an
//! [`OutputSink`]; a failing pass calls [`OutputSink::abort`] instead, so a
//! sink never publishes partial output.

use crate::error::CodegenError;
use std::fs;
use std::path::{Path, PathBuf};

/// One generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Path relative to the output root, such as `calculator.rs`.
    pub path: String,
    /// File contents.
    pub contents: String,
}

impl OutputUnit {
    /// Creates a new unit.
    #[must_use]
    pub fn new(path: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }
}

/// Destination for the units of one schema.
pub trait OutputSink {
    /// Starts output for a schema.
    ///
    /// # Errors
    /// Returns an error if the destination cannot be prepared.
    fn begin(&mut self, schema: &str) -> Result<(), CodegenError>;

    /// Writes one unit.
    ///
    /// # Errors
    /// Returns an error if the unit cannot be written.
    fn write_unit(&mut self, unit: &OutputUnit) -> Result<(), CodegenError>;

    /// Completes output for the schema.
    ///
    /// # Errors
    /// Returns an error if the output cannot be finalized.
    fn finish(&mut self) -> Result<(), CodegenError>;

    /// Discards everything written since [`OutputSink::begin`].
    fn abort(&mut self);
}

/// Sink collecting units in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    units: Vec<OutputUnit>,
    pending: Vec<OutputUnit>,
    aborted: usize,
}

impl MemorySink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every unit of every finished schema.
    #[must_use]
    pub fn units(&self) -> &[OutputUnit] {
        &self.units
    }

    /// Looks up a finished unit by path.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&OutputUnit> {
        self.units.iter().find(|u| u.path == path)
    }

    /// Returns how many passes were aborted.
    #[must_use]
    pub fn aborted(&self) -> usize {
        self.aborted
    }

    /// Consumes the sink and returns its finished units.
    #[must_use]
    pub fn into_units(self) -> Vec<OutputUnit> {
        self.units
    }
}

impl OutputSink for MemorySink {
    fn begin(&mut self, _schema: &str) -> Result<(), CodegenError> {
        self.pending.clear();
        Ok(())
    }

    fn write_unit(&mut self, unit: &OutputUnit) -> Result<(), CodegenError> {
        self.pending.push(unit.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CodegenError> {
        self.units.append(&mut self.pending);
        Ok(())
    }

    fn abort(&mut self) {
        self.pending.clear();
        self.aborted += 1;
    }
}

/// Sink writing units as files under a root directory.
#[derive(Debug)]
pub struct DirectorySink {
    root: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Creates a sink rooted at `root`. The directory is created on [`OutputSink::begin`].
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: Vec::new(),
        }
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the files written by the current pass.
    #[must_use]
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl OutputSink for DirectorySink {
    fn begin(&mut self, schema: &str) -> Result<(), CodegenError> {
        fs::create_dir_all(&self.root)?;
        self.written.clear();
        tracing::debug!("Writing schema {} to {}", schema, self.root.display());
        Ok(())
    }

    fn write_unit(&mut self, unit: &OutputUnit) -> Result<(), CodegenError> {
        let path = self.root.join(&unit.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &unit.contents)?;
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<(), CodegenError> {
        tracing::debug!("Wrote {} files to {}", self.written.len(), self.root.display());
        Ok(())
    }

    fn abort(&mut self) {
        for path in self.written.drain(..) {
            if let Err(e) = fs::remove_file(&path) {
                tracing::warn!("Failed to remove {}: {}", path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_commit() {
        let mut sink = MemorySink::new();
        sink.begin("tutorial").unwrap();
        sink.write_unit(&OutputUnit::new("types.rs", "// types"))
            .unwrap();
        assert!(sink.units().is_empty());
        sink.finish().unwrap();
        assert_eq!(sink.units().len(), 1);
        assert_eq!(sink.get("types.rs").unwrap().contents, "// types");
    }

    #[test]
    fn test_memory_sink_abort() {
        let mut sink = MemorySink::new();
        sink.begin("tutorial").unwrap();
        sink.write_unit(&OutputUnit::new("types.rs", "// types"))
            .unwrap();
        sink.abort();
        sink.finish().unwrap();
        assert!(sink.units().is_empty());
        assert_eq!(sink.aborted(), 1);
    }

    #[test]
    fn test_directory_sink_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path().join("gen"));
        sink.begin("tutorial").unwrap();
        sink.write_unit(&OutputUnit::new("mod.rs", "pub mod types;\n"))
            .unwrap();
        sink.finish().unwrap();

        let contents = fs::read_to_string(dir.path().join("gen/mod.rs")).unwrap();
        assert_eq!(contents, "pub mod types;\n");
        assert_eq!(sink.written().len(), 1);
    }

    #[test]
    fn test_directory_sink_abort_removes_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut sink = DirectorySink::new(dir.path());
        sink.begin("tutorial").unwrap();
        sink.write_unit(&OutputUnit::new("types.rs", "// partial"))
            .unwrap();
        assert!(dir.path().join("types.rs").exists());
        sink.abort();
        assert!(!dir.path().join("types.rs").exists());
        assert!(sink.written().is_empty());
    }
}
