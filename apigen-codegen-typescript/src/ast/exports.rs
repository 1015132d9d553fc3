//! Export statement builder.

use apigen_codegen::{CodeFragment, Renderable};

/// Builder for export statements.
#[derive(Debug, Clone)]
pub enum Export {
    /// `export * from "./module";`
    All { from: String },
    /// `export { default as alias } from "./module";`
    DefaultAs { from: String, alias: String },
    /// `export default { a, b };`
    DefaultObject { names: Vec<String> },
}

impl Export {
    pub fn all(from: impl Into<String>) -> Self {
        Export::All { from: from.into() }
    }

    pub fn default_as(from: impl Into<String>, alias: impl Into<String>) -> Self {
        Export::DefaultAs {
            from: from.into(),
            alias: alias.into(),
        }
    }

    pub fn default_object(names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Export::DefaultObject {
            names: names.into_iter().map(Into::into).collect(),
        }
    }
}

impl Renderable for Export {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        match self {
            Export::All { from } => vec![CodeFragment::Line(format!("export * from \"{}\";", from))],
            Export::DefaultAs { from, alias } => vec![CodeFragment::Line(format!(
                "export {{ default as {} }} from \"{}\";",
                alias, from
            ))],
            Export::DefaultObject { names } if names.is_empty() => {
                vec![CodeFragment::Line("export default {};".to_string())]
            }
            Export::DefaultObject { names } => vec![CodeFragment::Block {
                header: "export default {".to_string(),
                body: names
                    .iter()
                    .map(|name| CodeFragment::Line(format!("{},", name)))
                    .collect(),
                close: Some("};".to_string()),
            }],
        }
    }
}
