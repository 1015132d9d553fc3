//! Renders code fragments into indented source text.

use super::{CodeFragment, Indent, Renderable};

/// Accumulates rendered fragments with a running indentation level.
///
/// # Example
///
/// ```
/// use apigen_codegen::{CodeBuilder, CodeFragment};
///
/// let mut builder = CodeBuilder::typescript();
/// builder.apply_fragment(CodeFragment::block(
///     "export const getPets = async () => {",
///     vec![CodeFragment::line("return request({ url: '/pets', method: 'GET' });")],
///     Some("};".to_string()),
/// ));
///
/// assert_eq!(
///     builder.build(),
///     "export const getPets = async () => {\n  return request({ url: '/pets', method: 'GET' });\n};\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CodeBuilder {
    depth: usize,
    indent: Indent,
    out: String,
}

impl CodeBuilder {
    pub fn new(indent: Indent) -> Self {
        Self {
            depth: 0,
            indent,
            out: String::new(),
        }
    }

    pub fn typescript() -> Self {
        Self::new(Indent::TYPESCRIPT)
    }

    pub fn push_blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    /// One `// ...` line per line of `text`.
    pub fn push_comment(&mut self, text: &str) -> &mut Self {
        for line in text.lines() {
            self.line(&format!("// {}", line));
        }
        self
    }

    /// Render every fragment of `node`.
    pub fn emit(&mut self, node: &impl Renderable) -> &mut Self {
        for fragment in node.to_fragments() {
            self.apply_fragment(fragment);
        }
        self
    }

    pub fn apply_fragment(&mut self, fragment: CodeFragment) {
        match fragment {
            CodeFragment::Line(text) => self.line(&text),
            CodeFragment::Blank => {
                self.push_blank();
            }
            CodeFragment::Raw(text) => self.out.push_str(&text),
            CodeFragment::Block {
                header,
                body,
                close,
            } => {
                self.line(&header);
                self.nested(body);
                if let Some(close) = close {
                    self.line(&close);
                }
            }
            CodeFragment::Indent(body) => self.nested(body),
            CodeFragment::Sequence(fragments) => {
                for fragment in fragments {
                    self.apply_fragment(fragment);
                }
            }
            CodeFragment::JsDoc(text) => self.jsdoc(&text),
            CodeFragment::Comment(text) => {
                self.push_comment(&text);
            }
        }
    }

    pub fn build(self) -> String {
        self.out
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    fn nested(&mut self, body: Vec<CodeFragment>) {
        self.depth += 1;
        for fragment in body {
            self.apply_fragment(fragment);
        }
        self.depth -= 1;
    }

    /// Embedded newlines are re-indented at the current depth. Empty lines
    /// carry no trailing whitespace.
    fn line(&mut self, text: &str) {
        for line in text.split('\n') {
            if !line.is_empty() {
                self.pad();
                self.out.push_str(line);
            }
            self.out.push('\n');
        }
    }

    /// `/** text */` for one line, a starred block otherwise.
    fn jsdoc(&mut self, text: &str) {
        let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        if lines.len() <= 1 {
            self.line(&format!("/** {} */", escape_comment(text.trim())));
            return;
        }

        self.line("/**");
        for line in lines {
            if line.is_empty() {
                self.line(" *");
            } else {
                self.line(&format!(" * {}", escape_comment(line)));
            }
        }
        self.line(" */");
    }

    fn pad(&mut self) {
        for _ in 0..self.depth {
            self.out.push_str(self.indent.as_str());
        }
    }
}

impl Default for CodeBuilder {
    fn default() -> Self {
        Self::typescript()
    }
}

/// Keep user text from closing the comment early.
fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/")
}
