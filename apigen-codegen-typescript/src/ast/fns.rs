//! Function builder covering both declaration and arrow forms.

use apigen_codegen::{CodeFragment, Renderable};

/// A function parameter. JavaScript output leaves the type off.
#[derive(Debug, Clone)]
pub struct Param {
    pub name: String,
    pub ty: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: Some(ty.into()),
        }
    }

    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: None,
        }
    }

    fn render(&self) -> String {
        match &self.ty {
            Some(ty) => format!("{}: {}", self.name, ty),
            None => self.name.clone(),
        }
    }
}

/// How the function is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FnStyle {
    /// `function name() {}`
    Declaration,
    /// `const name = () => {};`
    Arrow,
}

/// Builder for functions.
#[derive(Debug, Clone)]
pub struct Fn {
    name: String,
    doc: Option<String>,
    exported: bool,
    is_async: bool,
    style: FnStyle,
    params: Vec<Param>,
    return_type: Option<String>,
    body: Vec<CodeFragment>,
}

impl Fn {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            exported: true,
            is_async: false,
            style: FnStyle::Declaration,
            params: Vec::new(),
            return_type: None,
            body: Vec::new(),
        }
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn async_(mut self, is_async: bool) -> Self {
        self.is_async = is_async;
        self
    }

    pub fn style(mut self, style: FnStyle) -> Self {
        self.style = style;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn returns(mut self, ty: Option<impl Into<String>>) -> Self {
        self.return_type = ty.map(Into::into);
        self
    }

    /// Append body fragments.
    pub fn body(mut self, fragments: impl IntoIterator<Item = CodeFragment>) -> Self {
        self.body.extend(fragments);
        self
    }

    /// Add a line to the function body.
    pub fn body_line(mut self, line: impl Into<String>) -> Self {
        self.body.push(CodeFragment::Line(line.into()));
        self
    }

    fn signature(&self) -> (String, &'static str) {
        let export = if self.exported { "export " } else { "" };
        let async_kw = if self.is_async { "async " } else { "" };
        let params = self
            .params
            .iter()
            .map(Param::render)
            .collect::<Vec<_>>()
            .join(", ");
        let ret = self
            .return_type
            .as_ref()
            .map(|ty| format!(": {}", ty))
            .unwrap_or_default();

        match self.style {
            FnStyle::Declaration => (
                format!(
                    "{}{}function {}({}){} {{",
                    export, async_kw, self.name, params, ret
                ),
                "}",
            ),
            FnStyle::Arrow => (
                format!(
                    "{}const {} = {}({}){} => {{",
                    export, self.name, async_kw, params, ret
                ),
                "};",
            ),
        }
    }
}

impl Renderable for Fn {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }

        let (header, close) = self.signature();
        fragments.push(CodeFragment::Block {
            header,
            body: self.body.clone(),
            close: Some(close.to_string()),
        });

        fragments
    }
}
