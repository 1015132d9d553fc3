//! Names derived from paths and tags.

use std::collections::HashSet;

use apigen_core::{NamingStyle, contains_cjk};
use apigen_spec::HttpMethod;

/// Reserved-word handling for a target language.
#[derive(Debug, Clone, Copy)]
pub struct NamingConvention {
    /// Words that cannot be used as bare identifiers
    pub reserved_words: &'static [&'static str],
    /// Escape a reserved word (e.g., "delete" -> "_delete")
    pub escape_reserved: fn(&str) -> String,
}

impl NamingConvention {
    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved_words.contains(&name)
    }

    /// Get a safe name, escaping if necessary.
    pub fn safe_name(&self, name: &str) -> String {
        if self.is_reserved(name) {
            (self.escape_reserved)(name)
        } else {
            name.to_string()
        }
    }
}

/// Unformatted function name for an operation: the method followed by every
/// path segment that is not a `{placeholder}`.
///
/// `GET /pets/{id}` -> `get_pets`, `POST /` -> `post`.
pub fn function_base_name(method: HttpMethod, path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|s| !s.is_empty() && !s.starts_with('{'))
        .collect();

    if segments.is_empty() {
        method.as_str().to_string()
    } else {
        format!("{}_{}", method.as_str(), segments.join("_"))
    }
}

/// Every identifier generated for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationNames {
    /// Unformatted base name, after collision suffixing
    pub base: String,
    pub function: String,
    pub request_type: String,
    pub response_type: String,
    pub data_type: String,
}

impl OperationNames {
    pub fn new(base: impl Into<String>, functions: NamingStyle, types: NamingStyle) -> Self {
        let base = base.into();
        Self {
            function: functions.apply(&base),
            request_type: types.apply(&format!("{}_request", base)),
            response_type: types.apply(&format!("{}_response", base)),
            data_type: types.apply(&format!("{}_response_data", base)),
            base,
        }
    }
}

/// Hands out unique names for one pass.
///
/// A name that formats to one already handed out gets a `_2`, `_3`, ...
/// suffix on its unformatted base.
#[derive(Debug, Default)]
pub struct NameRegistry {
    used: HashSet<String>,
}

impl NameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `base`. Returns the unformatted name to use and whether it had to be renamed.
    pub fn claim(&mut self, base: &str, style: NamingStyle) -> (String, bool) {
        if self.used.insert(style.apply(base)) {
            return (base.to_string(), false);
        }

        let mut n = 2;
        loop {
            let candidate = format!("{}_{}", base, n);
            if self.used.insert(style.apply(&candidate)) {
                return (candidate, true);
            }
            n += 1;
        }
    }

    pub fn contains(&self, formatted: &str) -> bool {
        self.used.contains(formatted)
    }
}

/// Where a group's module lives in the output tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath {
    /// File stem, or folder name for nested modules
    pub stem: String,
    /// CJK tags become `<tag>/index.<ext>` instead of `<tag>.<ext>`
    pub nested: bool,
}

impl ModulePath {
    /// Module location for a tag.
    ///
    /// Latin tags are lower-kebab-cased (`Pet Store` -> `pet-store`). Tags
    /// containing CJK characters are kept readable: only whitespace and
    /// characters unsafe in file names are replaced with `_`.
    pub fn for_tag(tag: &str) -> Self {
        if contains_cjk(tag) {
            let stem: String = tag
                .trim()
                .chars()
                .map(|c| {
                    if c.is_whitespace() || matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') {
                        '_'
                    } else {
                        c
                    }
                })
                .collect();
            return Self { stem, nested: true };
        }

        let mut stem = String::with_capacity(tag.len());
        for c in tag.to_lowercase().chars() {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                stem.push(c);
            } else if !stem.is_empty() && !stem.ends_with('-') {
                stem.push('-');
            }
        }
        while stem.ends_with('-') {
            stem.pop();
        }
        if stem.is_empty() {
            stem.push_str("group");
        }

        Self {
            stem,
            nested: false,
        }
    }

    /// Same location with a numeric suffix, used when two tags map to one file.
    pub fn with_suffix(&self, n: usize) -> Self {
        let separator = if self.nested { "_" } else { "-" };
        Self {
            stem: format!("{}{}{}", self.stem, separator, n),
            nested: self.nested,
        }
    }

    /// Output path with the given extension.
    pub fn file_path(&self, extension: &str) -> String {
        if self.nested {
            format!("{}/index.{}", self.stem, extension)
        } else {
            format!("{}.{}", self.stem, extension)
        }
    }

    /// Specifier used to import the module from the output root.
    ///
    /// Without an extension the nested form keeps its `/index` segment
    /// (`./宠物/index`), so it resolves under every module resolution mode.
    pub fn import_path(&self, extension: Option<&str>) -> String {
        let base = if self.nested {
            format!("./{}/index", self.stem)
        } else {
            format!("./{}", self.stem)
        };
        match extension {
            Some(ext) => format!("{}.{}", base, ext),
            None => base,
        }
    }

    /// Relative path from this module back to the output root.
    pub fn root_prefix(&self) -> &'static str {
        if self.nested { "../" } else { "./" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_base_name() {
        assert_eq!(function_base_name(HttpMethod::Get, "/pets/{id}"), "get_pets");
        assert_eq!(
            function_base_name(HttpMethod::Delete, "/stores/{storeId}/pets/{id}"),
            "delete_stores_pets"
        );
        assert_eq!(function_base_name(HttpMethod::Post, "/"), "post");
    }

    #[test]
    fn test_operation_names() {
        let names = OperationNames::new("get_pets", NamingStyle::CamelCase, NamingStyle::PascalCase);
        assert_eq!(names.function, "getPets");
        assert_eq!(names.request_type, "GetPetsRequest");
        assert_eq!(names.response_type, "GetPetsResponse");
        assert_eq!(names.data_type, "GetPetsResponseData");

        let snake = OperationNames::new("get_pets", NamingStyle::SnakeCase, NamingStyle::SnakeCase);
        assert_eq!(snake.function, "get_pets");
        assert_eq!(snake.request_type, "get_pets_request");
    }

    #[test]
    fn test_registry_suffixes_collisions() {
        let mut registry = NameRegistry::new();
        assert_eq!(
            registry.claim("get_pets", NamingStyle::CamelCase),
            ("get_pets".to_string(), false)
        );
        assert_eq!(
            registry.claim("get_pets", NamingStyle::CamelCase),
            ("get_pets_2".to_string(), true)
        );
        // `get_Pets` formats to the same identifiers as `get_pets`
        assert_eq!(
            registry.claim("get_Pets", NamingStyle::CamelCase),
            ("get_Pets_3".to_string(), true)
        );
        assert!(registry.contains("getPets3"));
    }

    #[test]
    fn test_module_path_latin() {
        let path = ModulePath::for_tag("Pet Store");
        assert_eq!(path.stem, "pet-store");
        assert_eq!(path.file_path("ts"), "pet-store.ts");
        assert_eq!(path.root_prefix(), "./");
        assert_eq!(path.import_path(None), "./pet-store");
        assert_eq!(path.import_path(Some("js")), "./pet-store.js");

        assert_eq!(ModulePath::for_tag("--User_API v2--").stem, "user-api-v2");
        assert_eq!(ModulePath::for_tag("!!!").stem, "group");
    }

    #[test]
    fn test_module_path_cjk() {
        let path = ModulePath::for_tag("宠物 管理/v1");
        assert!(path.nested);
        assert_eq!(path.stem, "宠物_管理_v1");
        assert_eq!(path.file_path("js"), "宠物_管理_v1/index.js");
        assert_eq!(path.root_prefix(), "../");
        assert_eq!(path.import_path(None), "./宠物_管理_v1/index");
    }

    #[test]
    fn test_module_path_suffix() {
        assert_eq!(ModulePath::for_tag("pets").with_suffix(2).file_path("ts"), "pets-2.ts");
    }
}
