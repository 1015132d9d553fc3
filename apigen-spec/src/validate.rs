//! Structural sanity checks on a raw document, run before typed deserialization.

use serde_json::Value;

use crate::error::{Error, Result};

/// Minor versions the generator understands.
const SUPPORTED_PREFIXES: [&str; 2] = ["3.0.", "3.1."];

/// Validate the top-level shape of a document.
///
/// Checks run in a fixed order and stop at the first failure:
/// object, `openapi` present, 3.x, 3.0.x/3.1.x, `info` with title and version, `paths`.
pub fn validate(value: &Value) -> Result<()> {
    let Some(root) = value.as_object() else {
        return Err(Error::validation(
            "document must be a JSON or YAML object",
            None,
        ));
    };

    let Some(version) = root.get("openapi") else {
        return Err(Error::validation_with_help(
            "missing required field `openapi`",
            Some("openapi"),
            "Swagger 2.0 documents must be converted to OpenAPI 3 first",
        ));
    };
    let version = version_string(version);

    if !version.starts_with("3.") {
        return Err(Error::validation(
            format!("unsupported OpenAPI version `{}`: only OpenAPI 3.x is supported", version),
            Some("openapi"),
        ));
    }

    if !SUPPORTED_PREFIXES.iter().any(|p| version.starts_with(p)) {
        return Err(Error::validation(
            format!("unsupported OpenAPI version `{}`: expected 3.0.x or 3.1.x", version),
            Some("openapi"),
        ));
    }

    let Some(info) = root.get("info").and_then(Value::as_object) else {
        return Err(Error::validation(
            "missing required field `info`",
            Some("info"),
        ));
    };

    for field in ["title", "version"] {
        let present = info
            .get(field)
            .map(|v| !version_string(v).trim().is_empty())
            .unwrap_or(false);
        if !present {
            return Err(Error::validation(
                format!("`info.{}` must be a non-empty string", field),
                Some("info"),
            ));
        }
    }

    if !root.get("paths").is_some_and(Value::is_object) {
        return Err(Error::validation(
            "missing required field `paths`",
            Some("paths"),
        ));
    }

    Ok(())
}

/// Scalars written without quotes in YAML (`openapi: 3.1`, `version: 1`) arrive as numbers.
pub(crate) fn version_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn message(value: Value) -> String {
        validate(&value).unwrap_err().to_string()
    }

    #[test]
    fn test_valid_document() {
        let doc = json!({
            "openapi": "3.0.3",
            "info": { "title": "Pets", "version": "1.0.0" },
            "paths": {}
        });
        assert!(validate(&doc).is_ok());
    }

    #[test]
    fn test_not_an_object() {
        assert!(message(json!(null)).contains("must be"));
        assert!(message(json!(["openapi"])).contains("must be"));
    }

    #[test]
    fn test_missing_openapi() {
        let err = validate(&json!({ "swagger": "2.0" })).unwrap_err();
        assert!(err.to_string().contains("`openapi`"));
        match *err {
            Error::Validation { field, help, .. } => {
                assert_eq!(field.as_deref(), Some("openapi"));
                assert!(help.is_some());
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_version_checks_are_distinct() {
        let major = message(json!({ "openapi": "2.0", "info": {}, "paths": {} }));
        let minor = message(json!({ "openapi": "3.2.0", "info": {}, "paths": {} }));
        assert!(major.contains("only OpenAPI 3.x"));
        assert!(minor.contains("3.0.x or 3.1.x"));
        assert_ne!(major, minor);
    }

    #[test]
    fn test_info_fields() {
        assert!(message(json!({ "openapi": "3.1.0", "paths": {} })).contains("`info`"));
        assert!(
            message(json!({
                "openapi": "3.1.0",
                "info": { "title": "", "version": "1" },
                "paths": {}
            }))
            .contains("info.title")
        );
        assert!(
            message(json!({
                "openapi": "3.1.0",
                "info": { "title": "Pets" },
                "paths": {}
            }))
            .contains("info.version")
        );
    }

    #[test]
    fn test_missing_paths() {
        let msg = message(json!({
            "openapi": "3.0.0",
            "info": { "title": "Pets", "version": "1" }
        }));
        assert!(msg.contains("`paths`"));
    }

    #[test]
    fn test_first_failure_wins() {
        // Both `info` and `paths` are missing; `info` is checked first.
        let msg = message(json!({ "openapi": "3.0.0" }));
        assert!(msg.contains("`info`"));
    }

    #[test]
    fn test_numeric_versions() {
        assert_eq!(version_string(&json!(3.1)), "3.1");
        let doc = json!({
            "openapi": "3.1.0",
            "info": { "title": "Pets", "version": 2 },
            "paths": {}
        });
        assert!(validate(&doc).is_ok());
    }
}
