//! Recursive schema model.
//!
//! A [`Schema`] is a closed tagged variant over the shapes the generator
//! understands. It deserializes from (and serializes back to) the JSON Schema
//! subset used by OpenAPI 3.0/3.1 through an internal raw representation, so
//! every node is rebuilt with defaulted sub-fields on the way in.

use std::{borrow::Cow, fmt};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive JSON Schema types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    String,
    Number,
    Integer,
    Boolean,
}

impl PrimitiveType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimitiveType::String => "string",
            PrimitiveType::Number => "number",
            PrimitiveType::Integer => "integer",
            PrimitiveType::Boolean => "boolean",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "string" => Some(PrimitiveType::String),
            "number" => Some(PrimitiveType::Number),
            "integer" => Some(PrimitiveType::Integer),
            "boolean" => Some(PrimitiveType::Boolean),
            _ => None,
        }
    }
}

impl fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Schema combinator keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombinatorKind {
    AllOf,
    AnyOf,
    OneOf,
}

impl CombinatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CombinatorKind::AllOf => "allOf",
            CombinatorKind::AnyOf => "anyOf",
            CombinatorKind::OneOf => "oneOf",
        }
    }
}

impl fmt::Display for CombinatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The shape of a schema node.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaKind {
    /// `$ref` pointer to a named schema. Never followed structurally.
    Reference(String),
    /// string / number / integer / boolean
    Primitive(PrimitiveType),
    /// A closed set of literal values, optionally typed.
    Enum {
        base: Option<PrimitiveType>,
        values: Vec<Value>,
    },
    /// Array with an optional item schema.
    Array(Option<Box<Schema>>),
    /// Object with ordered properties.
    Object {
        properties: IndexMap<String, Schema>,
        required: Vec<String>,
        additional_properties: Option<Box<Schema>>,
    },
    /// allOf / anyOf / oneOf, kept unmerged.
    Combinator {
        kind: CombinatorKind,
        branches: Vec<Schema>,
    },
    /// Anything else. Keeps the declared `type` (e.g. `"null"`, `"file"`) if there was one.
    Any(Option<String>),
}

/// A schema node with its descriptive metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawSchema", into = "RawSchema")]
pub struct Schema {
    pub kind: SchemaKind,
    pub title: Option<String>,
    pub description: Option<String>,
    pub format: Option<String>,
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            kind,
            title: None,
            description: None,
            format: None,
        }
    }

    pub fn reference(pointer: impl Into<String>) -> Self {
        Self::new(SchemaKind::Reference(pointer.into()))
    }

    pub fn primitive(ty: PrimitiveType) -> Self {
        Self::new(SchemaKind::Primitive(ty))
    }

    pub fn array(items: Schema) -> Self {
        Self::new(SchemaKind::Array(Some(Box::new(items))))
    }

    pub fn object(
        properties: impl IntoIterator<Item = (String, Schema)>,
        required: impl IntoIterator<Item = String>,
    ) -> Self {
        Self::new(SchemaKind::Object {
            properties: properties.into_iter().collect(),
            required: required.into_iter().collect(),
            additional_properties: None,
        })
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Human-readable label: the title if present, else the description.
    pub fn label(&self) -> Option<&str> {
        self.title
            .as_deref()
            .or(self.description.as_deref())
            .filter(|s| !s.trim().is_empty())
    }

    /// Properties of an object node, if it declares any.
    pub fn properties(&self) -> Option<(&IndexMap<String, Schema>, &[String])> {
        match &self.kind {
            SchemaKind::Object {
                properties,
                required,
                ..
            } if !properties.is_empty() => Some((properties, required)),
            _ => None,
        }
    }

    /// Name of every schema referenced from this node, without following references.
    pub fn references(&self) -> Vec<Cow<'_, str>> {
        let mut out = Vec::new();
        self.collect_references(&mut out);
        out
    }

    fn collect_references<'a>(&'a self, out: &mut Vec<Cow<'a, str>>) {
        match &self.kind {
            SchemaKind::Reference(pointer) => out.push(ref_name(pointer)),
            SchemaKind::Array(Some(items)) => items.collect_references(out),
            SchemaKind::Object {
                properties,
                additional_properties,
                ..
            } => {
                for schema in properties.values() {
                    schema.collect_references(out);
                }
                if let Some(extra) = additional_properties {
                    extra.collect_references(out);
                }
            }
            SchemaKind::Combinator { branches, .. } => {
                for branch in branches {
                    branch.collect_references(out);
                }
            }
            SchemaKind::Array(None)
            | SchemaKind::Primitive(_)
            | SchemaKind::Enum { .. }
            | SchemaKind::Any(_) => {}
        }
    }
}

/// The referenced schema name: the last segment of a `$ref` pointer.
///
/// `#/components/schemas/Pet` -> `Pet`. JSON pointer escapes are decoded.
pub fn ref_name(pointer: &str) -> Cow<'_, str> {
    let segment = pointer.rsplit('/').next().unwrap_or(pointer);
    if segment.contains('~') {
        Cow::Owned(unescape_pointer_segment(segment))
    } else {
        Cow::Borrowed(segment)
    }
}

/// Decode `~1` and `~0` escapes in a JSON pointer segment.
pub fn unescape_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}

// ============================================================================
// Raw (wire) representation
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum TypeField {
    Single(String),
    Multiple(Vec<String>),
}

impl TypeField {
    /// The first non-null type (OpenAPI 3.1 allows `["string", "null"]`).
    fn primary(self) -> Option<String> {
        match self {
            TypeField::Single(ty) => Some(ty),
            TypeField::Multiple(types) => {
                let fallback = types.first().cloned();
                types.into_iter().find(|t| t != "null").or(fallback)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum AdditionalProperties {
    Flag(bool),
    Schema(Box<Schema>),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSchema {
    #[serde(rename = "$ref", default, skip_serializing_if = "Option::is_none")]
    reference: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    ty: Option<TypeField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    format: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Option::is_none")]
    enumeration: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    items: Option<Box<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    properties: Option<IndexMap<String, Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    required: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    additional_properties: Option<AdditionalProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    all_of: Option<Vec<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    any_of: Option<Vec<Schema>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    one_of: Option<Vec<Schema>>,
}

fn non_empty<T>(list: Option<Vec<T>>) -> Option<Vec<T>> {
    list.filter(|l| !l.is_empty())
}

impl From<RawSchema> for Schema {
    fn from(raw: RawSchema) -> Self {
        let ty = raw.ty.and_then(TypeField::primary);

        let combinator = non_empty(raw.all_of)
            .map(|b| (CombinatorKind::AllOf, b))
            .or_else(|| non_empty(raw.any_of).map(|b| (CombinatorKind::AnyOf, b)))
            .or_else(|| non_empty(raw.one_of).map(|b| (CombinatorKind::OneOf, b)));

        let kind = if let Some(pointer) = raw.reference {
            SchemaKind::Reference(pointer)
        } else if let Some((kind, branches)) = combinator {
            SchemaKind::Combinator { kind, branches }
        } else if let Some(values) = non_empty(raw.enumeration) {
            SchemaKind::Enum {
                base: ty.as_deref().and_then(PrimitiveType::parse),
                values,
            }
        } else {
            match ty.as_deref() {
                Some("array") => SchemaKind::Array(raw.items),
                Some("object") => object_kind(raw.properties, raw.required, raw.additional_properties),
                Some(other) => match PrimitiveType::parse(other) {
                    Some(primitive) => SchemaKind::Primitive(primitive),
                    None => SchemaKind::Any(Some(other.to_string())),
                },
                None if raw.properties.is_some() => {
                    object_kind(raw.properties, raw.required, raw.additional_properties)
                }
                None if raw.items.is_some() => SchemaKind::Array(raw.items),
                None => SchemaKind::Any(None),
            }
        };

        Schema {
            kind,
            title: raw.title,
            description: raw.description,
            format: raw.format,
        }
    }
}

fn object_kind(
    properties: Option<IndexMap<String, Schema>>,
    required: Option<Vec<String>>,
    additional: Option<AdditionalProperties>,
) -> SchemaKind {
    let mut required = required.unwrap_or_default();
    let mut seen = std::collections::HashSet::new();
    required.retain(|name| seen.insert(name.clone()));

    SchemaKind::Object {
        properties: properties.unwrap_or_default(),
        required,
        additional_properties: match additional {
            Some(AdditionalProperties::Schema(schema)) => Some(schema),
            Some(AdditionalProperties::Flag(_)) | None => None,
        },
    }
}

impl From<Schema> for RawSchema {
    fn from(schema: Schema) -> Self {
        let mut raw = RawSchema {
            title: schema.title,
            description: schema.description,
            format: schema.format,
            ..RawSchema::default()
        };

        match schema.kind {
            SchemaKind::Reference(pointer) => raw.reference = Some(pointer),
            SchemaKind::Primitive(primitive) => {
                raw.ty = Some(TypeField::Single(primitive.as_str().to_string()));
            }
            SchemaKind::Enum { base, values } => {
                raw.ty = base.map(|b| TypeField::Single(b.as_str().to_string()));
                raw.enumeration = Some(values);
            }
            SchemaKind::Array(items) => {
                raw.ty = Some(TypeField::Single("array".to_string()));
                raw.items = items;
            }
            SchemaKind::Object {
                properties,
                required,
                additional_properties,
            } => {
                raw.ty = Some(TypeField::Single("object".to_string()));
                raw.properties = Some(properties).filter(|p| !p.is_empty());
                raw.required = Some(required).filter(|r| !r.is_empty());
                raw.additional_properties = additional_properties.map(AdditionalProperties::Schema);
            }
            SchemaKind::Combinator { kind, branches } => match kind {
                CombinatorKind::AllOf => raw.all_of = Some(branches),
                CombinatorKind::AnyOf => raw.any_of = Some(branches),
                CombinatorKind::OneOf => raw.one_of = Some(branches),
            },
            SchemaKind::Any(ty) => raw.ty = ty.map(TypeField::Single),
        }

        raw
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn parse(value: Value) -> Schema {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_reference() {
        let schema = parse(json!({ "$ref": "#/components/schemas/Pet" }));
        assert_eq!(
            schema.kind,
            SchemaKind::Reference("#/components/schemas/Pet".to_string())
        );
        assert_eq!(schema.references(), vec!["Pet"]);
    }

    #[test]
    fn test_string_enum() {
        let schema = parse(json!({ "type": "string", "enum": ["available", "sold"] }));
        match schema.kind {
            SchemaKind::Enum { base, values } => {
                assert_eq!(base, Some(PrimitiveType::String));
                assert_eq!(values, vec![json!("available"), json!("sold")]);
            }
            other => panic!("expected enum, got {:?}", other),
        }
    }

    #[test]
    fn test_nullable_type_list() {
        let schema = parse(json!({ "type": ["null", "integer"] }));
        assert_eq!(schema.kind, SchemaKind::Primitive(PrimitiveType::Integer));
    }

    #[test]
    fn test_object_without_type() {
        let schema = parse(json!({
            "properties": { "name": { "type": "string" } },
            "required": ["name", "name"]
        }));
        let (properties, required) = schema.properties().unwrap();
        assert_eq!(properties.len(), 1);
        assert_eq!(required, ["name".to_string()]);
    }

    #[test]
    fn test_combinator_keeps_branches() {
        let schema = parse(json!({
            "oneOf": [{ "$ref": "#/components/schemas/Cat" }, { "$ref": "#/components/schemas/Dog" }]
        }));
        match &schema.kind {
            SchemaKind::Combinator { kind, branches } => {
                assert_eq!(*kind, CombinatorKind::OneOf);
                assert_eq!(branches.len(), 2);
            }
            other => panic!("expected combinator, got {:?}", other),
        }
        assert_eq!(schema.references(), vec!["Cat", "Dog"]);
    }

    #[test]
    fn test_label_prefers_title() {
        let schema = parse(json!({
            "type": "string",
            "title": "Pet Name",
            "description": "The pet's given name"
        }));
        assert_eq!(schema.label(), Some("Pet Name"));

        let described = Schema::primitive(PrimitiveType::String).with_description("Owner");
        assert_eq!(described.label(), Some("Owner"));
        assert_eq!(described.with_title("Name").label(), Some("Name"));
    }

    #[test]
    fn test_serialize_is_stable() {
        let original = parse(json!({
            "type": "object",
            "properties": {
                "tags": { "type": "array", "items": { "$ref": "#/components/schemas/Tag" } },
                "extra": { "additionalProperties": { "type": "integer" }, "type": "object" }
            },
            "required": ["tags"]
        }));
        let reparsed = parse(serde_json::to_value(&original).unwrap());
        assert_eq!(original, reparsed);
    }

    #[test]
    fn test_ref_name() {
        assert_eq!(ref_name("#/components/schemas/Pet"), "Pet");
        assert_eq!(ref_name("Pet"), "Pet");
        assert_eq!(unescape_pointer_segment("a~1b~0c"), "a/b~c");
    }

    #[test]
    fn test_ref_name_decodes_escapes() {
        assert_eq!(ref_name("#/components/schemas/a~1b"), "a/b");
        assert_eq!(ref_name("#/components/schemas/Pet~0v2"), "Pet~v2");

        let schema = parse(json!({
            "type": "array",
            "items": { "$ref": "#/components/schemas/pets~1Pet" }
        }));
        assert_eq!(schema.references(), vec!["pets/Pet"]);
    }
}
