//! Shared builder for generated PHP sources.
//!
//! All class renderers funnel through [`PhpFile`]: it owns the strict-types
//! header, the deduplicated and sorted import block, class-level attributes,
//! and the single trailing newline every emitted file ends with.

use std::collections::BTreeSet;

/// One PHP source file under construction.
pub struct PhpFile {
    namespace: String,
    imports: BTreeSet<String>,
    attributes: Vec<String>,
    declaration: String,
    lines: Vec<String>,
}

impl PhpFile {
    /// `declaration` is the full class line, e.g. `final class FooController extends AbstractRestController`.
    pub fn new(namespace: impl Into<String>, declaration: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            imports: BTreeSet::new(),
            attributes: Vec::new(),
            declaration: declaration.into(),
            lines: Vec::new(),
        }
    }

    pub fn import(&mut self, fqcn: impl Into<String>) -> &mut Self {
        self.imports.insert(fqcn.into());
        self
    }

    pub fn imports<I, S>(&mut self, fqcns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for fqcn in fqcns {
            self.imports.insert(fqcn.into());
        }
        self
    }

    /// A class-level attribute line, rendered verbatim above the declaration.
    pub fn attribute(&mut self, line: impl Into<String>) -> &mut Self {
        self.attributes.push(line.into());
        self
    }

    /// One line of class body, already indented.
    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    pub fn extend<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.lines.push(line.into());
        }
        self
    }

    /// Assemble the file. Trailing blank body lines are dropped so the
    /// closing brace always follows the last real line, and the output ends
    /// with exactly one newline.
    pub fn render(&self) -> String {
        let mut out = Vec::new();
        out.push("<?php".to_string());
        out.push(String::new());
        out.push("declare(strict_types=1);".to_string());
        out.push(String::new());
        out.push(format!("namespace {};", self.namespace));
        out.push(String::new());

        for import in &self.imports {
            out.push(format!("use {};", import));
        }
        if !self.imports.is_empty() {
            out.push(String::new());
        }

        out.extend(self.attributes.iter().cloned());
        out.push(self.declaration.clone());
        out.push("{".to_string());

        let mut body: Vec<String> = self.lines.clone();
        while body.last().is_some_and(|line| line.trim().is_empty()) {
            body.pop();
        }
        out.extend(body);

        out.push("}".to_string());

        let mut rendered = out.join("\n");
        rendered.truncate(rendered.trim_end().len());
        rendered.push('\n');
        rendered
    }
}

/// Quote a raw option value the way the generated column options expect:
/// booleans and numbers stay bare, strings are single-quoted with escaping.
pub fn format_php_value(value: &suluforge_core::OptionValue) -> String {
    use suluforge_core::OptionValue;

    match value {
        OptionValue::Bool(true) => "true".to_string(),
        OptionValue::Bool(false) => "false".to_string(),
        OptionValue::Int(value) => value.to_string(),
        OptionValue::Float(value) => value.to_string(),
        OptionValue::String(value) => {
            format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
        }
    }
}
