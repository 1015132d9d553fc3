//! TypeScript import builder.

use apigen_codegen::{CodeFragment, Renderable};

/// Builder for import statements.
///
/// Specifiers are single-quoted, matching the default import template.
#[derive(Debug, Clone)]
pub struct Import {
    from: String,
    named: Vec<String>,
    type_only: bool,
}

impl Import {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            named: Vec::new(),
            type_only: false,
        }
    }

    /// Import a named export.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.named.push(name.into());
        self
    }

    /// Import several named exports.
    pub fn names(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.named.extend(names.into_iter().map(Into::into));
        self
    }

    /// Make this a type-only import (`import type { ... }`).
    pub fn type_only(mut self) -> Self {
        self.type_only = true;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    fn statement(&self) -> String {
        let type_kw = if self.type_only { "type " } else { "" };
        if self.named.is_empty() {
            format!("import '{}';", self.from)
        } else {
            format!(
                "import {}{{ {} }} from '{}';",
                type_kw,
                self.named.join(", "),
                self.from
            )
        }
    }
}

impl Renderable for Import {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::Line(self.statement())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(import: &Import) -> String {
        import.render()
    }

    #[test]
    fn test_named_import() {
        let i = Import::new("../utils/request").named("request");
        assert_eq!(render(&i), "import { request } from '../utils/request';\n");
    }

    #[test]
    fn test_type_only_import() {
        let i = Import::new("./types")
            .names(["GetPetsRequest", "GetPetsResponse"])
            .type_only();
        assert_eq!(
            render(&i),
            "import type { GetPetsRequest, GetPetsResponse } from './types';\n"
        );
    }

    #[test]
    fn test_side_effect_import() {
        let i = Import::new("./polyfill");
        assert!(i.is_empty());
        assert_eq!(render(&i), "import './polyfill';\n");
    }
}
