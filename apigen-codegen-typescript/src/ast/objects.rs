//! JavaScript object literal builder.

use apigen_codegen::CodeFragment;

#[derive(Debug, Clone)]
enum Value {
    Raw(String),
    Object(JsObject),
}

/// Builder for multi-line object literals.
#[derive(Debug, Clone, Default)]
pub struct JsObject {
    properties: Vec<(String, Value)>,
}

impl JsObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property with a raw expression value (will not be quoted).
    pub fn raw(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), Value::Raw(value.into())));
        self
    }

    /// Add a property with a single-quoted string value.
    pub fn string(self, key: impl Into<String>, value: &str) -> Self {
        let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
        self.raw(key, format!("'{}'", escaped))
    }

    /// Add a property with a nested object value.
    pub fn object(mut self, key: impl Into<String>, value: JsObject) -> Self {
        self.properties.push((key.into(), Value::Object(value)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// One fragment per property, each followed by a comma.
    pub fn property_fragments(&self) -> Vec<CodeFragment> {
        self.properties
            .iter()
            .map(|(key, value)| match value {
                Value::Raw(expr) => CodeFragment::Line(format!("{}: {},", key, expr)),
                Value::Object(object) if object.is_empty() => {
                    CodeFragment::Line(format!("{}: {{}},", key))
                }
                Value::Object(object) => CodeFragment::Block {
                    header: format!("{}: {{", key),
                    body: object.property_fragments(),
                    close: Some("},".to_string()),
                },
            })
            .collect()
    }

    /// The literal placed between `open` and `close`, e.g. `request({` ... `});`.
    pub fn wrapped(&self, open: &str, close: &str) -> CodeFragment {
        if self.is_empty() {
            return CodeFragment::Line(format!("{}{{}}{}", open, close));
        }
        CodeFragment::Block {
            header: format!("{}{{", open),
            body: self.property_fragments(),
            close: Some(format!("}}{}", close)),
        }
    }
}
