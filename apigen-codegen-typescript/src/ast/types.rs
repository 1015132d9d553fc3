//! Type aliases and the declaration sum type.

use apigen_codegen::{CodeFragment, Renderable};

use super::Interface;

/// Builder for TypeScript type aliases.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    name: String,
    doc: Option<String>,
    ty: String,
    exported: bool,
}

impl TypeAlias {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            ty: ty.into(),
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

    pub fn private(mut self) -> Self {
        self.exported = false;
        self
    }
}

impl Renderable for TypeAlias {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let export = if self.exported { "export " } else { "" };
        let mut fragments = Vec::new();

        if let Some(doc) = &self.doc {
            fragments.push(CodeFragment::JsDoc(doc.clone()));
        }
        fragments.push(CodeFragment::Line(format!(
            "{}type {} = {};",
            export, self.name, self.ty
        )));

        fragments
    }
}

/// A named type declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Interface(Interface),
    Alias(TypeAlias),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Interface(node) => node.name(),
            Declaration::Alias(node) => node.name(),
        }
    }

    /// Same declaration without the `export` keyword.
    pub fn private(self) -> Self {
        match self {
            Declaration::Interface(mut node) => {
                node.set_exported(false);
                Declaration::Interface(node)
            }
            Declaration::Alias(node) => Declaration::Alias(node.private()),
        }
    }
}

impl From<Interface> for Declaration {
    fn from(node: Interface) -> Self {
        Declaration::Interface(node)
    }
}

impl From<TypeAlias> for Declaration {
    fn from(node: TypeAlias) -> Self {
        Declaration::Alias(node)
    }
}

impl Renderable for Declaration {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Declaration::Interface(node) => node.to_fragments(),
            Declaration::Alias(node) => node.to_fragments(),
        }
    }
}
