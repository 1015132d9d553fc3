//! CodeFile abstraction for structured module generation.
//!
//! Organizes a file into a header comment, imports, body, and exports.
//! Each section is rendered in order with blank lines in between.

use apigen_codegen::{CodeBuilder, CodeFragment, Indent, Renderable};

use crate::ast::{Export, Import};

/// A structured representation of a TypeScript or JavaScript file.
///
/// # Example
///
/// ```
/// use apigen_codegen_typescript::{CodeFile, RawCode, ast::{Export, Import}};
///
/// let code = CodeFile::new()
///     .import(Import::new("./types").named("Pet").type_only())
///     .add(RawCode::new("const pets: Pet[] = [];"))
///     .export(Export::all("./pets"))
///     .render();
/// assert!(code.starts_with("import type { Pet } from './types';\n\n"));
/// ```
#[derive(Default)]
pub struct CodeFile {
    header: Vec<String>,
    imports: Vec<CodeFragment>,
    body: Vec<Vec<CodeFragment>>,
    exports: Vec<Export>,
}

impl CodeFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a `//` comment line at the very top.
    pub fn header(mut self, line: impl Into<String>) -> Self {
        self.header.push(line.into());
        self
    }

    /// Add an import statement. Imports without names are skipped.
    pub fn import(mut self, import: Import) -> Self {
        if !import.is_empty() {
            self.imports.extend(import.to_fragments());
        }
        self
    }

    /// Add an import line verbatim.
    pub fn raw_import(mut self, line: impl Into<String>) -> Self {
        let line = line.into();
        if !line.trim().is_empty() {
            self.imports.push(CodeFragment::Line(line));
        }
        self
    }

    /// Add a body element (any Renderable).
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Renderable>(mut self, node: R) -> Self {
        self.body.push(node.to_fragments());
        self
    }

    /// Add multiple body elements.
    pub fn add_all<R: Renderable>(mut self, nodes: impl IntoIterator<Item = R>) -> Self {
        for node in nodes {
            self.body.push(node.to_fragments());
        }
        self
    }

    /// Add a `//` comment as its own body element.
    pub fn section(mut self, title: impl Into<String>) -> Self {
        self.body.push(vec![CodeFragment::Comment(title.into())]);
        self
    }

    pub fn export(mut self, export: Export) -> Self {
        self.exports.push(export);
        self
    }

    pub fn exports(mut self, exports: impl IntoIterator<Item = Export>) -> Self {
        self.exports.extend(exports);
        self
    }

    /// Render the file with TypeScript indentation (2 spaces).
    pub fn render(&self) -> String {
        self.render_with_indent(Indent::TYPESCRIPT)
    }

    /// Render the file with custom indentation.
    pub fn render_with_indent(&self, indent: Indent) -> String {
        let mut builder = CodeBuilder::new(indent);
        let mut sections = 0;

        if !self.header.is_empty() {
            for line in &self.header {
                builder.push_comment(line);
            }
            sections += 1;
        }

        if !self.imports.is_empty() {
            if sections > 0 {
                builder.push_blank();
            }
            for fragment in &self.imports {
                builder.apply_fragment(fragment.clone());
            }
            sections += 1;
        }

        for fragments in &self.body {
            if sections > 0 {
                builder.push_blank();
            }
            for fragment in fragments {
                builder.apply_fragment(fragment.clone());
            }
            sections += 1;
        }

        if !self.exports.is_empty() {
            if sections > 0 {
                builder.push_blank();
            }
            for export in &self.exports {
                builder.emit(export);
            }
        }

        builder.build()
    }

    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.imports.is_empty()
            && self.body.is_empty()
            && self.exports.is_empty()
    }
}

/// A raw code fragment that implements Renderable.
#[derive(Debug, Clone)]
pub struct RawCode(String);

impl RawCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    /// Create a raw code fragment from multiple lines.
    pub fn lines(lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(
            lines
                .into_iter()
                .map(Into::into)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

impl Renderable for RawCode {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.0
            .lines()
            .map(|line| CodeFragment::Line(line.to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file() {
        let file = CodeFile::new();
        assert!(file.is_empty());
        assert_eq!(file.render(), "");
    }

    #[test]
    fn test_raw_import_kept_verbatim() {
        let file = CodeFile::new()
            .raw_import("import request from '@/lib/http'")
            .raw_import("  ");
        assert_eq!(file.render(), "import request from '@/lib/http'\n");
    }

    #[test]
    fn test_sections_are_separated() {
        let file = CodeFile::new()
            .header("generated")
            .raw_import("import { request } from './utils/request';")
            .section("types")
            .add(RawCode::new("const a = 1;"))
            .add(RawCode::lines(["const b = 2;", "const c = 3;"]))
            .export(Export::default_object(["a"]));

        assert_eq!(
            file.render(),
            "// generated\n\nimport { request } from './utils/request';\n\n// types\n\nconst a = 1;\n\nconst b = 2;\nconst c = 3;\n\nexport default {\n  a,\n};\n"
        );
    }

    #[test]
    fn test_nameless_import_is_skipped() {
        let file = CodeFile::new().import(Import::new("./types").type_only());
        assert!(file.is_empty());
    }
}
