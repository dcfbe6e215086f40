//! Indented text writer for one generated output unit.
//!
//! Each writer owns its temporary-name counter, so names produced by
//! [`CodeWriter::tmp`] are unique within one unit and independent of every
//! other unit or generation pass.

/// Line-oriented writer with indentation and a scoped temporary counter.
#[derive(Debug, Clone)]
pub struct CodeWriter {
    output: String,
    indent_level: usize,
    indent_string: String,
    tmp_counter: usize,
}

impl CodeWriter {
    /// Creates a writer indenting with four spaces.
    #[must_use]
    pub fn new() -> Self {
        Self::with_indent_spaces(4)
    }

    /// Creates a writer with the given indentation width.
    #[must_use]
    pub fn with_indent_spaces(spaces: usize) -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            indent_string: " ".repeat(spaces),
            tmp_counter: 0,
        }
    }

    /// Writes one indented line.
    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.output.push('\n');
            return;
        }
        for _ in 0..self.indent_level {
            self.output.push_str(&self.indent_string);
        }
        self.output.push_str(text);
        self.output.push('\n');
    }

    /// Writes an empty line.
    pub fn blank(&mut self) {
        self.output.push('\n');
    }

    /// Writes each line of a doc comment with the given prefix.
    pub fn doc(&mut self, prefix: &str, text: &str) {
        for line in text.lines() {
            if line.is_empty() {
                self.line(prefix);
            } else {
                self.line(&format!("{prefix} {line}"));
            }
        }
    }

    /// Increases indentation.
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decreases indentation.
    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Writes `header {`, the body one level deeper, and `}` plus `suffix`.
    ///
    /// # Errors
    /// Propagates any error returned by `body`.
    pub fn block<E, F>(&mut self, header: &str, suffix: &str, body: F) -> Result<(), E>
    where
        F: FnOnce(&mut Self) -> Result<(), E>,
    {
        if header.is_empty() {
            self.line("{");
        } else {
            self.line(&format!("{header} {{"));
        }
        self.indent();
        let result = body(self);
        self.dedent();
        self.line(&format!("}}{suffix}"));
        result
    }

    /// Returns a fresh temporary name such as `_elem3`.
    pub fn tmp(&mut self, prefix: &str) -> String {
        let name = format!("{prefix}{}", self.tmp_counter);
        self.tmp_counter += 1;
        name
    }

    /// Returns the current indentation level.
    #[must_use]
    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Returns the text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.output
    }

    /// Consumes the writer and returns its text.
    #[must_use]
    pub fn into_string(self) -> String {
        self.output
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
