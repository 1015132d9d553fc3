//! TypeScript interface builder.

use apigen_codegen::{CodeFragment, Renderable};

/// A field in a TypeScript interface.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Property key, already quoted when it is not an identifier
    pub name: String,
    /// Type expression; may span several lines
    pub ty: String,
    pub doc: Option<String>,
    pub optional: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            doc: None,
            optional: false,
        }
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn optional_if(mut self, optional: bool) -> Self {
        self.optional = optional;
        self
    }

    pub(crate) fn to_fragments(&self) -> Vec<CodeFragment> {
        let mut fragments = Vec::with_capacity(2);
        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }
        let optional = if self.optional { "?" } else { "" };
        fragments.push(CodeFragment::Line(format!(
            "{}{}: {};",
            self.name, optional, self.ty
        )));
        fragments
    }
}

/// Builder for TypeScript interfaces.
#[derive(Debug, Clone, PartialEq)]
pub struct Interface {
    name: String,
    doc: Option<String>,
    fields: Vec<Field>,
    exported: bool,
}

impl Interface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            fields: Vec::new(),
            exported: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn doc(mut self, doc: Option<impl Into<String>>) -> Self {
        self.doc = doc.map(Into::into);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = Field>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Make this interface private (not exported).
    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }

    pub(crate) fn set_exported(&mut self, exported: bool) {
        self.exported = exported;
    }
}

impl Renderable for Interface {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let export = if self.exported { "export " } else { "" };
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }

        if self.fields.is_empty() {
            fragments.push(CodeFragment::Line(format!(
                "{}interface {} {{}}",
                export, self.name
            )));
        } else {
            fragments.push(CodeFragment::Block {
                header: format!("{}interface {} {{", export, self.name),
                body: self.fields.iter().flat_map(Field::to_fragments).collect(),
                close: Some("}".to_string()),
            });
        }

        fragments
    }
}
