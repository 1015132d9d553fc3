//! Tag queries over a normalized document.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{
    document::{DEFAULT_TAG, Document, HttpMethod, PathItem},
    normalize::collect_operation_tags,
};

/// Build a new document holding only the operations selected by tag.
///
/// An operation is kept when one of its tags is in `include` (or `include` is
/// empty) and its primary tag is not in `exclude`. Operations whose primary
/// tag is `default` are always kept. Paths left without operations are removed.
pub fn filter_by_tags(doc: &Document, include: &[String], exclude: &[String]) -> Document {
    let include: HashSet<&str> = include.iter().map(String::as_str).collect();
    let exclude: HashSet<&str> = exclude.iter().map(String::as_str).collect();

    let mut paths = IndexMap::new();
    for (path, item) in &doc.paths {
        let mut filtered = PathItem::default();

        for (method, op) in item.operations() {
            let primary = op.primary_tag();
            let keep = primary == DEFAULT_TAG
                || ((include.is_empty() || op.tags.iter().any(|t| include.contains(t.as_str())))
                    && !exclude.contains(primary));
            if keep {
                *filtered.slot_mut(method) = Some(op.clone());
            }
        }

        if !filtered.is_empty() {
            paths.insert(path.clone(), filtered);
        }
    }

    Document {
        paths,
        ..doc.clone()
    }
}

/// Tag names in display order: declared tags first, then tags found only on operations.
pub fn available_tags(doc: &Document) -> Vec<String> {
    let mut seen = HashSet::new();
    doc.tags
        .iter()
        .map(|t| t.name.clone())
        .chain(collect_operation_tags(doc))
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Operation counts for a document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStatistics {
    pub total_paths: usize,
    pub total_operations: usize,
    pub by_method: IndexMap<HttpMethod, usize>,
    pub by_tag: IndexMap<String, usize>,
}

/// Count paths and operations, per method and per tag.
///
/// An operation with several tags counts once for each of them.
pub fn path_statistics(doc: &Document) -> PathStatistics {
    let mut stats = PathStatistics {
        total_paths: doc.paths.len(),
        ..Default::default()
    };

    for (_, method, op) in doc.operations() {
        stats.total_operations += 1;
        *stats.by_method.entry(method).or_default() += 1;
        for tag in &op.tags {
            *stats.by_tag.entry(tag.clone()).or_default() += 1;
        }
    }

    stats
}
