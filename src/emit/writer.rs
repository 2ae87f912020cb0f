//! Output writer with indentation tracking
//!
//! Builds the generated C text line by line.

/// Spaces per indentation level in generated C
const INDENT_WIDTH: usize = 4;

/// Writer that tracks indentation and builds C output
pub struct CWriter {
    /// The output buffer
    output: String,
    /// Current indentation level
    indent_level: usize,
    /// Whether we're at the start of a line
    at_line_start: bool,
}

impl CWriter {
    pub fn new() -> Self {
        Self {
            output: String::new(),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Get the generated output
    pub fn finish(self) -> String {
        self.output
    }

    /// Increase indentation level
    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Decrease indentation level
    pub fn dedent(&mut self) {
        if self.indent_level > 0 {
            self.indent_level -= 1;
        }
    }

    fn write_indent(&mut self) {
        if self.at_line_start {
            self.output.push_str(&" ".repeat(self.indent_level * INDENT_WIDTH));
            self.at_line_start = false;
        }
    }

    /// Write a string (with auto-indent)
    pub fn write(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        self.write_indent();
        self.output.push_str(s);
    }

    /// Write a string and newline
    pub fn writeln(&mut self, s: &str) {
        self.write(s);
        self.newline();
    }

    /// Write just a newline
    pub fn newline(&mut self) {
        self.output.push('\n');
        self.at_line_start = true;
    }

    /// Ensure exactly one blank line before the next section
    pub fn blank_line(&mut self) {
        if self.output.is_empty() || self.output.ends_with("\n\n") {
            return;
        }
        if !self.at_line_start {
            self.newline();
        }
        self.newline();
    }

    /// Write `header {`, the indented body, then `footer`
    pub fn block(&mut self, header: &str, footer: &str, body: impl FnOnce(&mut Self)) {
        self.writeln(&format!("{header} {{"));
        self.indent();
        body(self);
        self.dedent();
        self.writeln(footer);
    }
}

impl Default for CWriter {
    fn default() -> Self {
        Self::new()
    }
}
