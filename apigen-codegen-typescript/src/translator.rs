//! Schema nodes to TypeScript type expressions.

use apigen_codegen::{GenerationContext, Stage};
use apigen_core::NamingStyle;
use apigen_spec::{Document, PrimitiveType, Schema, SchemaKind, ref_name};
use indexmap::IndexMap;
use serde_json::Value;

use crate::naming::property_key;

/// The type every unresolvable or unsupported node degrades to.
pub const FALLBACK_TYPE: &str = "any";

/// Translates schema nodes against one document.
///
/// References are never followed: a `$ref` becomes the formatted name of the
/// referenced schema, so cyclic schemas translate in bounded time.
#[derive(Debug, Clone, Copy)]
pub struct TypeTranslator<'a> {
    doc: &'a Document,
    type_naming: NamingStyle,
    include_comments: bool,
}

impl<'a> TypeTranslator<'a> {
    pub fn new(doc: &'a Document, type_naming: NamingStyle, include_comments: bool) -> Self {
        Self {
            doc,
            type_naming,
            include_comments,
        }
    }

    /// Formatted name of a component schema.
    pub fn type_name(&self, name: &str) -> String {
        self.type_naming.apply(name)
    }

    /// The formatted name a `$ref` pointer resolves to, if the target exists.
    pub fn resolve_reference(&self, pointer: &str) -> Option<String> {
        let name = ref_name(pointer);
        self.doc.schema(&name).map(|_| self.type_name(&name))
    }

    /// Translate a schema into a type expression.
    ///
    /// Unresolved references and combinators degrade to [`FALLBACK_TYPE`] and
    /// leave a warning in `ctx`.
    pub fn translate(&self, schema: &Schema, ctx: &mut GenerationContext, location: &str) -> String {
        match &schema.kind {
            SchemaKind::Reference(pointer) => match self.resolve_reference(pointer) {
                Some(name) => name,
                None => {
                    ctx.warn(
                        Stage::Types,
                        format!("unresolved reference `{}`, using `{}`", pointer, FALLBACK_TYPE),
                        Some(location),
                    );
                    FALLBACK_TYPE.to_string()
                }
            },
            SchemaKind::Primitive(ty) => primitive(*ty).to_string(),
            SchemaKind::Enum { values, .. } => enum_union(values),
            SchemaKind::Array(items) => {
                let item = match items {
                    Some(items) => self.translate(items, ctx, location),
                    None => FALLBACK_TYPE.to_string(),
                };
                if item.contains(" | ") && !item.starts_with('{') {
                    format!("({})[]", item)
                } else {
                    format!("{}[]", item)
                }
            }
            SchemaKind::Object {
                properties,
                required,
                additional_properties,
            } => {
                if !properties.is_empty() {
                    self.object_literal(properties, required, ctx, location)
                } else if let Some(extra) = additional_properties {
                    format!("Record<string, {}>", self.translate(extra, ctx, location))
                } else {
                    format!("Record<string, {}>", FALLBACK_TYPE)
                }
            }
            SchemaKind::Combinator { kind, .. } => {
                ctx.warn(
                    Stage::Types,
                    format!("`{}` is not merged, using `{}`", kind, FALLBACK_TYPE),
                    Some(location),
                );
                FALLBACK_TYPE.to_string()
            }
            SchemaKind::Any(Some(ty)) if ty == "null" => "null".to_string(),
            SchemaKind::Any(_) => FALLBACK_TYPE.to_string(),
        }
    }

    pub fn comments_enabled(&self) -> bool {
        self.include_comments
    }

    /// Comment text for a property: its title, else its description.
    pub fn field_doc(&self, schema: &Schema) -> Option<String> {
        if !self.include_comments {
            return None;
        }
        schema.label().map(str::to_string)
    }

    /// An inline `{ ... }` type, one property per line.
    fn object_literal(
        &self,
        properties: &IndexMap<String, Schema>,
        required: &[String],
        ctx: &mut GenerationContext,
        location: &str,
    ) -> String {
        let mut out = String::from("{\n");
        for (name, schema) in properties {
            if let Some(doc) = self.field_doc(schema) {
                let doc = doc.split_whitespace().collect::<Vec<_>>().join(" ");
                out.push_str(&format!("  /** {} */\n", doc.replace("*/", "*\\/")));
            }
            let optional = if required.contains(name) { "" } else { "?" };
            let ty = self.translate(schema, ctx, location);
            out.push_str(&format!(
                "  {}{}: {};\n",
                property_key(name),
                optional,
                ty.replace('\n', "\n  ")
            ));
        }
        out.push('}');
        out
    }
}

fn primitive(ty: PrimitiveType) -> &'static str {
    match ty {
        PrimitiveType::String => "string",
        PrimitiveType::Number | PrimitiveType::Integer => "number",
        PrimitiveType::Boolean => "boolean",
    }
}

/// Union of literal types. Values that have no literal type make the whole
/// union fall back.
fn enum_union(values: &[Value]) -> String {
    let mut literals: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let literal = match value {
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => value.to_string(),
            Value::Array(_) | Value::Object(_) => return FALLBACK_TYPE.to_string(),
        };
        if !literals.contains(&literal) {
            literals.push(literal);
        }
    }
    if literals.is_empty() {
        return FALLBACK_TYPE.to_string();
    }
    literals.join(" | ")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document() -> Document {
        Document::parse(
            r##"
openapi: 3.0.0
info: { title: T, version: "1" }
paths: {}
components:
  schemas:
    pet_owner:
      type: object
      properties:
        pets: { type: array, items: { $ref: "#/components/schemas/pet_owner" } }
    legacy/Tag:
      type: string
"##,
        )
        .unwrap()
    }

    fn schema(value: serde_json::Value) -> Schema {
        serde_json::from_value(value).unwrap()
    }

    fn translate(value: serde_json::Value) -> (String, GenerationContext) {
        let doc = document();
        let translator = TypeTranslator::new(&doc, NamingStyle::PascalCase, true);
        let mut ctx = GenerationContext::new();
        let out = translator.translate(&schema(value), &mut ctx, "test");
        (out, ctx)
    }

    #[test]
    fn test_primitives() {
        assert_eq!(translate(json!({"type": "string"})).0, "string");
        assert_eq!(translate(json!({"type": "integer"})).0, "number");
        assert_eq!(translate(json!({"type": "boolean"})).0, "boolean");
        assert_eq!(translate(json!({})).0, "any");
    }

    #[test]
    fn test_enums() {
        assert_eq!(
            translate(json!({"type": "string", "enum": ["a", "b\"c", "a"]})).0,
            r#""a" | "b\"c""#
        );
        assert_eq!(translate(json!({"enum": [1, 2, true]})).0, "1 | 2 | true");
    }

    #[test]
    fn test_reference_is_formatted_not_inlined() {
        let (out, ctx) = translate(json!({"$ref": "#/components/schemas/pet_owner"}));
        assert_eq!(out, "PetOwner");
        assert!(!ctx.has_warnings());
    }

    #[test]
    fn test_escaped_reference_resolves() {
        let (out, ctx) = translate(json!({"$ref": "#/components/schemas/legacy~1Tag"}));
        assert_eq!(out, "LegacyTag");
        assert!(!ctx.has_warnings());
    }

    #[test]
    fn test_dangling_reference_falls_back() {
        let (out, ctx) = translate(json!({"$ref": "#/components/schemas/Missing"}));
        assert_eq!(out, "any");
        assert_eq!(ctx.warning_count(), 1);
    }

    #[test]
    fn test_arrays() {
        assert_eq!(translate(json!({"type": "array"})).0, "any[]");
        assert_eq!(
            translate(json!({"type": "array", "items": {"$ref": "#/components/schemas/pet_owner"}})).0,
            "PetOwner[]"
        );
        assert_eq!(
            translate(json!({"type": "array", "items": {"enum": ["x", "y"]}})).0,
            r#"("x" | "y")[]"#
        );
    }

    #[test]
    fn test_object_literal_prefers_title() {
        let (out, _) = translate(json!({
            "type": "object",
            "required": ["name"],
            "properties": {
                "name": {"type": "string", "title": "Pet Name", "description": "The pet's given name"},
                "x-id": {"type": "object", "properties": {"n": {"type": "number"}}}
            }
        }));
        assert_eq!(
            out,
            "{\n  /** Pet Name */\n  name: string;\n  \"x-id\"?: {\n    n?: number;\n  };\n}"
        );
    }

    #[test]
    fn test_maps() {
        assert_eq!(translate(json!({"type": "object"})).0, "Record<string, any>");
        assert_eq!(
            translate(json!({"type": "object", "additionalProperties": {"type": "integer"}})).0,
            "Record<string, number>"
        );
    }

    #[test]
    fn test_combinator_falls_back_with_warning() {
        let (out, ctx) = translate(json!({"allOf": [{"type": "string"}]}));
        assert_eq!(out, "any");
        assert!(ctx.warnings().next().unwrap().message.contains("allOf"));
    }
}
