//! Normalization passes.
//!
//! Component references for parameters, request bodies and responses are
//! inlined on the raw value before typed deserialization. Everything else
//! runs on the typed [`Document`].

use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::document::{DEFAULT_TAG, Document, HttpMethod, Operation, Parameter, Tag};

const MAX_OPERATION_ID_LEN: usize = 50;
/// Guards against `$ref` chains that point back at themselves.
const MAX_REF_DEPTH: usize = 16;

/// Inline `#/components/{parameters,requestBodies,responses}/*` references.
///
/// Entries whose reference cannot be resolved are dropped.
pub(crate) fn resolve_component_refs(root: &mut Value) {
    let components = root
        .get("components")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();
    let resolver = ComponentResolver {
        components: &components,
    };

    let Some(paths) = root.get_mut("paths").and_then(Value::as_object_mut) else {
        return;
    };

    for (path, item) in paths.iter_mut() {
        let Some(item) = item.as_object_mut() else {
            continue;
        };

        if let Some(params) = item.get_mut("parameters") {
            resolver.resolve_list(params, "parameters", path);
        }

        for method in HttpMethod::ALL {
            let Some(op) = item
                .get_mut(method.as_str())
                .and_then(Value::as_object_mut)
            else {
                continue;
            };
            let location = format!("{} {}", method.as_upper(), path);

            if let Some(params) = op.get_mut("parameters") {
                resolver.resolve_list(params, "parameters", &location);
            }

            if let Some(body) = op.get_mut("requestBody") {
                if !resolver.resolve_in_place(body, "requestBodies", &location) {
                    op.remove("requestBody");
                }
            }

            if let Some(responses) = op.get_mut("responses").and_then(Value::as_object_mut) {
                responses.retain(|status, response| {
                    resolver.resolve_in_place(response, "responses", &format!("{} {}", location, status))
                });
            }
        }
    }
}

struct ComponentResolver<'a> {
    components: &'a Map<String, Value>,
}

impl ComponentResolver<'_> {
    fn resolve_list(&self, list: &mut Value, section: &str, location: &str) {
        if let Some(items) = list.as_array_mut() {
            items.retain_mut(|item| self.resolve_in_place(item, section, location));
        }
    }

    /// Replace `value` with its referenced component. Returns `false` if it should be dropped.
    fn resolve_in_place(&self, value: &mut Value, section: &str, location: &str) -> bool {
        for _ in 0..MAX_REF_DEPTH {
            let Some(pointer) = value.get("$ref").and_then(Value::as_str) else {
                return true;
            };

            match self.lookup(pointer, section) {
                Some(target) => *value = target.clone(),
                None => {
                    warn!(%location, reference = %pointer, "dropping unresolvable {} reference", section);
                    return false;
                }
            }
        }

        warn!(%location, "dropping {} reference chain that does not terminate", section);
        false
    }

    fn lookup(&self, pointer: &str, section: &str) -> Option<&Value> {
        let prefix = format!("#/components/{}/", section);
        let name = pointer.strip_prefix(&prefix)?;
        let name = crate::schema::unescape_pointer_segment(name);
        self.components.get(section)?.get(&name)
    }
}

/// Fill defaulted fields so later stages never branch on absence.
pub(crate) fn normalize_document(mut doc: Document) -> Document {
    for (path, item) in doc.paths.iter_mut() {
        let shared = std::mem::take(&mut item.parameters);

        for method in HttpMethod::ALL {
            if let Some(op) = item.slot_mut(method).as_mut() {
                merge_parameters(op, &shared);
                normalize_operation(op);
                debug!(method = %method, %path, operation_id = %op.operation_id, "normalized operation");
            }
        }
    }

    if doc.tags.is_empty() {
        doc.tags = collect_operation_tags(&doc).into_iter().map(Tag::new).collect();
    }

    doc
}

fn normalize_operation(op: &mut Operation) {
    if op.operation_id.is_empty() {
        op.operation_id = generate_operation_id(&op.summary, &op.description);
    }
    if op.tags.is_empty() {
        op.tags.push(DEFAULT_TAG.to_string());
    }
}

/// Path-level parameters are appended unless the operation redefines them.
fn merge_parameters(op: &mut Operation, shared: &[Parameter]) {
    for param in shared {
        let overridden = op
            .parameters
            .iter()
            .any(|p| p.name == param.name && p.location == param.location);
        if !overridden {
            op.parameters.push(param.clone());
        }
    }
}

/// Derive an operation id from the first non-empty of `summary` and `description`.
///
/// Lower-cased, runs of non-alphanumerics collapse to `_`, trimmed and cut
/// to 50 characters.
pub fn generate_operation_id(summary: &str, description: &str) -> String {
    let source = [summary, description]
        .into_iter()
        .find(|s| !s.is_empty())
        .unwrap_or("operation");

    let mut id = String::with_capacity(source.len());
    let mut pending_separator = false;
    for c in source.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_separator && !id.is_empty() {
                id.push('_');
            }
            pending_separator = false;
            id.push(c);
        } else {
            pending_separator = true;
        }
    }

    id.chars().take(MAX_OPERATION_ID_LEN).collect()
}

/// Unique operation tags across all methods, in first-seen order.
pub(crate) fn collect_operation_tags(doc: &Document) -> Vec<String> {
    let mut seen = HashSet::new();
    doc.operations()
        .flat_map(|(_, _, op)| op.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::document::ParameterLocation;

    #[test]
    fn test_generate_operation_id() {
        assert_eq!(generate_operation_id("List all pets", ""), "list_all_pets");
        assert_eq!(
            generate_operation_id("", "  Find pet -- by ID!  "),
            "find_pet_by_id"
        );
        assert_eq!(generate_operation_id("", ""), "operation");
        assert_eq!(generate_operation_id("获取宠物", ""), "");
    }

    #[test]
    fn test_generate_operation_id_truncates() {
        let summary = "word ".repeat(30);
        let id = generate_operation_id(&summary, "");
        assert_eq!(id.len(), 50);
        assert!(id.starts_with("word_word"));
    }

    #[test]
    fn test_resolve_component_refs() {
        let mut root = json!({
            "paths": {
                "/pets": {
                    "parameters": [{ "$ref": "#/components/parameters/Limit" }],
                    "post": {
                        "requestBody": { "$ref": "#/components/requestBodies/NewPet" },
                        "responses": {
                            "200": { "$ref": "#/components/responses/Ok" },
                            "500": { "$ref": "#/components/responses/Missing" }
                        }
                    }
                }
            },
            "components": {
                "parameters": { "Limit": { "name": "limit", "in": "query" } },
                "requestBodies": { "NewPet": { "content": {} } },
                "responses": { "Ok": { "description": "ok" } }
            }
        });

        resolve_component_refs(&mut root);

        let item = &root["paths"]["/pets"];
        assert_eq!(item["parameters"][0]["name"], "limit");
        assert_eq!(item["post"]["requestBody"], json!({ "content": {} }));
        assert_eq!(item["post"]["responses"]["200"]["description"], "ok");
        assert!(item["post"]["responses"].get("500").is_none());
    }

    #[test]
    fn test_unresolvable_request_body_is_dropped() {
        let mut root = json!({
            "paths": {
                "/pets": { "put": { "requestBody": { "$ref": "#/components/requestBodies/Nope" } } }
            }
        });
        resolve_component_refs(&mut root);
        assert!(root["paths"]["/pets"]["put"].get("requestBody").is_none());
    }

    #[test]
    fn test_operation_parameter_overrides_path_parameter() {
        let doc: Document = serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/pets/{id}": {
                    "parameters": [
                        { "name": "id", "in": "path", "required": true },
                        { "name": "trace", "in": "header" }
                    ],
                    "get": {
                        "parameters": [{ "name": "id", "in": "path", "required": true, "description": "own" }]
                    }
                }
            }
        }))
        .unwrap();

        let doc = normalize_document(doc);
        let item = &doc.paths["/pets/{id}"];
        let op = item.get.as_ref().unwrap();

        assert!(item.parameters.is_empty());
        assert_eq!(op.parameters.len(), 2);
        assert_eq!(op.parameters[0].description.as_deref(), Some("own"));
        assert_eq!(op.parameters[1].location, ParameterLocation::Header);
    }

    #[test]
    fn test_tags_synthesized_in_first_seen_order() {
        let doc: Document = serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": {
                "/a": { "get": { "tags": ["store"] }, "head": { "tags": ["meta"] } },
                "/b": { "post": { "tags": ["pets", "store"] }, "delete": {} }
            }
        }))
        .unwrap();

        let doc = normalize_document(doc);
        let names: Vec<_> = doc.tags.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["store", "meta", "pets", "default"]);
    }

    #[test]
    fn test_declared_tags_are_kept() {
        let doc: Document = serde_json::from_value(json!({
            "openapi": "3.0.0",
            "info": { "title": "t", "version": "1" },
            "paths": { "/a": { "get": { "tags": ["store"] } } },
            "tags": [{ "name": "pets", "description": "Pet operations" }]
        }))
        .unwrap();

        let doc = normalize_document(doc);
        assert_eq!(doc.tags.len(), 1);
        assert_eq!(doc.tags[0].name, "pets");
    }
}
