//! Source scanner for builtin declarations
//!
//! The scanner is a filter, not a parser: it walks a source file line by line and picks out single-line
//! declarations of the shape
//!
//! ```text
//! <ret> fun_<Class>_<method>(<params>)
//! <ret> prop_<Class>_<method>(<params>)
//! ```
//!
//! anchored at the start of the line. Everything else (including multi-line declarations) is skipped silently, so
//! annotated declarations can live inside arbitrary C sources.

use std::path::{Path, PathBuf};

use protogen_abi::DeclKindId;
use protogen_abi::kinds::DECL_KINDS;
use regex::Regex;

/// A source file read into memory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub text: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: text.into(),
        }
    }

    /// Path as shown in diagnostics.
    pub fn display_name(&self) -> String {
        self.path.display().to_string()
    }

    /// File name without directories, as echoed into the generated output.
    pub fn base_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.display_name())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// One matched declaration line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// 1-based line number
    pub line: usize,
    /// Matched text, from the return type through the closing parenthesis
    pub prototype: String,
    pub return_type: String,
    /// Dispatcher symbol, e.g. `fun_Buffer_alloc`
    pub dispatcher: String,
    pub kind: DeclKindId,
    pub class_name: String,
    pub method: String,
    /// Everything between the parentheses
    pub raw_params: String,
}

impl Declaration {
    /// Parameter list split on commas, each entry trimmed.
    ///
    /// An empty list yields a single empty entry, so a missing ctx parameter is still reported.
    pub fn params(&self) -> Vec<&str> {
        self.raw_params.split(',').map(str::trim).collect()
    }

    /// C forward declaration of the dispatcher.
    pub fn forward_declaration(&self) -> String {
        format!("{};", self.prototype)
    }
}

/// Compiled declaration grammar.
#[derive(Debug, Clone)]
pub struct DeclPattern {
    re: Regex,
}

impl DeclPattern {
    pub fn new() -> Self {
        let re = Regex::new(&Self::source()).expect("INVARIANT: declaration grammar is a valid regex");
        Self { re }
    }

    /// Regex source of the grammar.
    ///
    /// Identifier classes are ASCII-only; class names exclude `_` so the first underscore after the class ends it.
    pub fn source() -> String {
        let prefixes: Vec<&str> = DECL_KINDS.iter().map(|k| k.prefix()).collect();
        format!(
            r"^([A-Za-z0-9_]+) (({})_([A-Za-z0-9]+)_([A-Za-z0-9_]+))\((.*)\)",
            prefixes.join("|")
        )
    }

    /// Match one physical line.
    pub fn match_line(&self, line: &str, line_no: usize) -> Option<Declaration> {
        let caps = self.re.captures(line)?;
        let kind = DeclKindId::from_prefix(&caps[3])?;
        Some(Declaration {
            line: line_no,
            prototype: caps[0].to_string(),
            return_type: caps[1].to_string(),
            dispatcher: caps[2].to_string(),
            kind,
            class_name: caps[4].to_string(),
            method: caps[5].to_string(),
            raw_params: caps[6].to_string(),
        })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.re.is_match(line)
    }
}

impl Default for DeclPattern {
    fn default() -> Self {
        Self::new()
    }
}

/// Lazy iterator over the declarations of one source text.
pub struct Scanner<'a> {
    pattern: &'a DeclPattern,
    lines: std::str::Lines<'a>,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(pattern: &'a DeclPattern, text: &'a str) -> Self {
        Self {
            pattern,
            lines: text.lines(),
            line: 0,
        }
    }

    /// Line number of the most recently read line (0 before the first).
    pub fn line(&self) -> usize {
        self.line
    }
}

impl Iterator for Scanner<'_> {
    type Item = Declaration;

    fn next(&mut self) -> Option<Declaration> {
        for text in self.lines.by_ref() {
            self.line += 1;
            if let Some(decl) = self.pattern.match_line(text, self.line) {
                return Some(decl);
            }
            tracing::trace!(line = self.line, "skipped");
        }
        None
    }
}
