//! Partition operations into groups by primary tag.

use std::collections::HashSet;

use apigen_spec::{DEFAULT_TAG, Document, HttpMethod, Operation};
use indexmap::IndexMap;
use tracing::debug;

/// One operation together with where it is bound.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupedOperation<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
}

impl GroupedOperation<'_> {
    /// `GET /pets/{id}`, used as a diagnostic location.
    pub fn location(&self) -> String {
        format!("{} {}", self.method.as_upper(), self.path)
    }
}

/// Operations keyed by group tag, in first-seen order.
pub type OperationGroups<'a> = IndexMap<String, Vec<GroupedOperation<'a>>>;

/// Group operations by their primary tag.
///
/// Only get/post/put/delete/patch produce client functions. Each
/// (method, path) pair is grouped at most once, and an operation with
/// several tags goes to the first one only.
pub fn group_operations(doc: &Document) -> OperationGroups<'_> {
    let mut groups: OperationGroups<'_> = IndexMap::new();
    let mut seen: HashSet<(HttpMethod, &str)> = HashSet::new();

    for (path, item) in &doc.paths {
        for method in HttpMethod::CODEGEN {
            let Some(operation) = item.get(method) else {
                continue;
            };
            if !seen.insert((method, path.as_str())) {
                continue;
            }

            groups
                .entry(operation.primary_tag().to_string())
                .or_default()
                .push(GroupedOperation {
                    path,
                    method,
                    operation,
                });
        }
    }

    debug!(
        operations = seen.len(),
        groups = groups.len(),
        "grouped operations"
    );
    groups
}

/// Drop groups filtered out by configuration.
///
/// With a non-empty `output_tags` only listed groups are kept. Groups in
/// `exclude_tags` are removed. The `default` group always survives.
pub fn retain_groups<'a>(
    mut groups: OperationGroups<'a>,
    output_tags: &[String],
    exclude_tags: &[String],
) -> OperationGroups<'a> {
    groups.retain(|tag, _| {
        if tag == DEFAULT_TAG {
            return true;
        }
        let included = output_tags.is_empty() || output_tags.iter().any(|t| t == tag);
        let excluded = exclude_tags.iter().any(|t| t == tag);
        included && !excluded
    });
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document() -> Document {
        Document::parse(
            r#"
openapi: 3.0.0
info: { title: Pets, version: "1" }
paths:
  /pets:
    get: { tags: [pets, shelters] }
    post: { tags: [pets] }
    head: { tags: [pets] }
  /shelters:
    get: { tags: [shelters] }
  /health:
    get: {}
    options: {}
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_primary_tag_only() {
        let doc = document();
        let groups = group_operations(&doc);

        let tags: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(tags, ["pets", "shelters", "default"]);
        assert_eq!(groups["pets"].len(), 2);
        assert_eq!(groups["shelters"].len(), 1);
        assert_eq!(groups["shelters"][0].path, "/shelters");
    }

    #[test]
    fn test_skips_non_codegen_methods() {
        let doc = document();
        let groups = group_operations(&doc);
        assert!(
            groups
                .values()
                .flatten()
                .all(|op| HttpMethod::CODEGEN.contains(&op.method))
        );
        assert_eq!(groups["default"].len(), 1);
    }

    #[test]
    fn test_grouping_is_idempotent() {
        let doc = document();
        assert_eq!(group_operations(&doc), group_operations(&doc));
    }

    #[test]
    fn test_retain_keeps_default() {
        let doc = document();
        let groups = retain_groups(group_operations(&doc), &["shelters".to_string()], &[]);
        let tags: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(tags, ["shelters", "default"]);
    }

    #[test]
    fn test_retain_excludes() {
        let doc = document();
        let groups = retain_groups(
            group_operations(&doc),
            &[],
            &["pets".to_string(), "default".to_string()],
        );
        let tags: Vec<_> = groups.keys().map(String::as_str).collect();
        assert_eq!(tags, ["shelters", "default"]);
    }

    #[test]
    fn test_location() {
        let doc = document();
        let groups = group_operations(&doc);
        assert_eq!(groups["pets"][1].location(), "POST /pets");
    }
}
