//! TypeScript-specific naming conventions.

use apigen_codegen::NamingConvention;

fn escape_ts_reserved(name: &str) -> String {
    format!("_{}", name)
}

/// TypeScript naming conventions.
pub const TS_NAMING: NamingConvention = NamingConvention {
    reserved_words: &[
        // JavaScript reserved words
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "let",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        // Strict-mode and TypeScript type keywords that cannot name a binding or type
        "await",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "static",
        "any",
        "boolean",
        "never",
        "number",
        "object",
        "string",
        "symbol",
        "undefined",
        "unknown",
    ],
    escape_reserved: escape_ts_reserved,
};

/// Whether `name` can be written as a bare property key or after `.`.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// A property key, double-quoted when it is not an identifier.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        quote(name)
    }
}

/// Read `name` from `object` with dot or bracket access.
pub fn property_access(object: &str, name: &str) -> String {
    if is_identifier(name) {
        format!("{}.{}", object, name)
    } else {
        format!("{}[{}]", object, quote(name))
    }
}

/// A double-quoted string literal.
pub fn quote(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ts_reserved_words() {
        assert!(TS_NAMING.is_reserved("delete"));
        assert!(TS_NAMING.is_reserved("interface"));
        assert!(!TS_NAMING.is_reserved("getPets"));
    }

    #[test]
    fn test_ts_escape_reserved() {
        assert_eq!(TS_NAMING.safe_name("delete"), "_delete");
        assert_eq!(TS_NAMING.safe_name("post"), "post");
    }

    #[test]
    fn test_property_key() {
        assert_eq!(property_key("petId"), "petId");
        assert_eq!(property_key("$ref"), "$ref");
        assert_eq!(property_key("X-Trace-Id"), "\"X-Trace-Id\"");
        assert_eq!(property_key("2fa"), "\"2fa\"");
        assert_eq!(property_key("宠物"), "\"宠物\"");
    }

    #[test]
    fn test_property_access() {
        assert_eq!(property_access("params", "limit"), "params.limit");
        assert_eq!(
            property_access("params", "page-size"),
            "params[\"page-size\"]"
        );
    }

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("a\"b"), "\"a\\\"b\"");
    }
}
