//! Reading documents from JSON or YAML text.

use std::{path::Path, str::FromStr};

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::{
    document::Document,
    error::{Error, Result, SourceContext},
    normalize, validate,
};

impl Document {
    /// Parse, validate and normalize a document from text (JSON or YAML).
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_with_filename(text, "openapi")
    }

    /// Like [`Document::parse`], naming the source in error reports.
    pub fn parse_with_filename(text: &str, filename: &str) -> Result<Self> {
        let ctx = SourceContext::new(text, filename);
        let value = read_value(&ctx)?;
        Self::from_value(value)
    }

    /// Read a document from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse_with_filename(&content, &path.display().to_string())
    }

    /// Validate and normalize an already-structured document.
    pub fn from_value(mut value: Value) -> Result<Self> {
        validate::validate(&value)?;
        coerce_scalars(&mut value);
        normalize::resolve_component_refs(&mut value);

        let doc: Document = serde_path_to_error::deserialize(value).map_err(|e| {
            let path = e.path().to_string();
            Error::structure(path, e.into_inner().to_string())
        })?;

        debug!(
            title = %doc.info.title,
            paths = doc.paths.len(),
            "parsed document"
        );
        Ok(normalize::normalize_document(doc))
    }
}

impl FromStr for Document {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Turn text into a raw value, trying both serializations.
///
/// Text that looks structured (`{` or `[` after trimming) is tried as JSON
/// first, anything else as YAML first. The other format is the fallback.
pub fn read_value(ctx: &SourceContext) -> Result<Value> {
    let text = ctx.src();
    let trimmed = text.trim_start_matches('\u{feff}').trim();

    let json = || serde_json::from_str::<Value>(trimmed);
    let yaml = || serde_yaml::from_str::<serde_yaml::Value>(trimmed).map(yaml_to_json);

    let result = if trimmed.starts_with('{') || trimmed.starts_with('[') {
        json().or_else(|json_err| yaml().map_err(|yaml_err| (json_err, yaml_err)))
    } else {
        yaml().or_else(|yaml_err| json().map_err(|json_err| (json_err, yaml_err)))
    };

    result.map_err(|(json_err, yaml_err)| {
        let span = ctx.span_at(json_err.line(), json_err.column());
        ctx.parse_error(
            format!("not valid JSON ({}) or YAML ({})", json_err, yaml_err),
            span,
        )
    })
}

/// Convert YAML into JSON, stringifying non-string mapping keys (`200:` is a number in YAML).
fn yaml_to_json(value: serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;

    match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Number(i.into())
            } else if let Some(u) = n.as_u64() {
                Value::Number(u.into())
            } else {
                n.as_f64()
                    .and_then(Number::from_f64)
                    .map(Value::Number)
                    .unwrap_or(Value::Null)
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(items.into_iter().map(yaml_to_json).collect()),
        Yaml::Mapping(mapping) => {
            let mut map = Map::with_capacity(mapping.len());
            for (key, value) in mapping {
                map.insert(yaml_key(key), yaml_to_json(value));
            }
            Value::Object(map)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value),
    }
}

fn yaml_key(key: serde_yaml::Value) -> String {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => s,
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::Null => "null".to_string(),
        other => match yaml_to_json(other) {
            Value::String(s) => s,
            json => json.to_string(),
        },
    }
}

/// Version-like scalars written without quotes become strings.
fn coerce_scalars(root: &mut Value) {
    if let Some(version) = root.get_mut("openapi") {
        *version = Value::String(validate::version_string(version));
    }
    if let Some(info) = root.get_mut("info").and_then(Value::as_object_mut) {
        for field in ["title", "version"] {
            if let Some(value) = info.get_mut(field) {
                *value = Value::String(validate::version_string(value));
            }
        }
    }
}
