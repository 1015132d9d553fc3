//! Generator configuration.
//!
//! [`GeneratorConfig`] is the immutable snapshot every generation stage reads.
//! User input arrives as a [`PartialConfig`] (from `apigen.toml`, a JSON file
//! or CLI flags) and is merged over the defaults field by field.

use std::{fmt, path::Path, str::FromStr};

use apigen_core::NamingStyle;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, SourceContext};

/// Output grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[default]
    TypeScript,
    JavaScript,
}

impl Dialect {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dialect::TypeScript => "typescript",
            Dialect::JavaScript => "javascript",
        }
    }

    /// Source file extension for generated modules.
    pub fn extension(&self) -> &'static str {
        match self {
            Dialect::TypeScript => "ts",
            Dialect::JavaScript => "js",
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dialect {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "typescript" | "ts" => Ok(Dialect::TypeScript),
            "javascript" | "js" => Ok(Dialect::JavaScript),
            _ => Err(format!(
                "unknown language '{}', expected 'typescript' or 'javascript'",
                s
            )),
        }
    }
}

/// How group modules expose their functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportStyle {
    /// `export const getPets = ...`
    #[default]
    Named,
    /// `export default { getPets, ... }`
    Default,
}

impl ExportStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStyle::Named => "named",
            ExportStyle::Default => "default",
        }
    }
}

impl fmt::Display for ExportStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ExportStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "named" => Ok(ExportStyle::Named),
            "default" => Ok(ExportStyle::Default),
            _ => Err(format!(
                "unknown export style '{}', expected 'named' or 'default'",
                s
            )),
        }
    }
}

pub const DEFAULT_REQUEST_UTIL_PATH: &str = "../utils/request";
pub const DEFAULT_IMPORT_TEMPLATE: &str = "import { request } from '../utils/request';";

/// Complete configuration for one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorConfig {
    pub code_language: Dialect,
    /// Groups to emit. Empty means every group.
    pub output_tags: Vec<String>,
    /// Groups never to emit. `default` is exempt.
    pub exclude_tags: Vec<String>,
    pub function_naming: NamingStyle,
    pub type_naming: NamingStyle,
    pub generate_index: bool,
    pub generate_utils: bool,
    pub separate_types: bool,
    pub use_async: bool,
    pub include_comments: bool,
    pub export_style: ExportStyle,
    /// Inserted verbatim at the top of every group module.
    pub import_template: String,
    pub request_util_path: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            code_language: Dialect::TypeScript,
            output_tags: Vec::new(),
            exclude_tags: Vec::new(),
            function_naming: NamingStyle::CamelCase,
            type_naming: NamingStyle::PascalCase,
            generate_index: true,
            generate_utils: true,
            separate_types: true,
            use_async: true,
            include_comments: true,
            export_style: ExportStyle::Named,
            import_template: DEFAULT_IMPORT_TEMPLATE.to_string(),
            request_util_path: DEFAULT_REQUEST_UTIL_PATH.to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Overlay user values. Absent values keep what is already set.
    pub fn merge(self, partial: PartialConfig) -> Self {
        Self {
            code_language: partial.code_language.unwrap_or(self.code_language),
            output_tags: partial.output_tags.unwrap_or(self.output_tags),
            exclude_tags: partial.exclude_tags.unwrap_or(self.exclude_tags),
            function_naming: partial.function_naming.unwrap_or(self.function_naming),
            type_naming: partial.type_naming.unwrap_or(self.type_naming),
            generate_index: partial.generate_index.unwrap_or(self.generate_index),
            generate_utils: partial.generate_utils.unwrap_or(self.generate_utils),
            separate_types: partial.separate_types.unwrap_or(self.separate_types),
            use_async: partial.use_async.unwrap_or(self.use_async),
            include_comments: partial.include_comments.unwrap_or(self.include_comments),
            export_style: partial.export_style.unwrap_or(self.export_style),
            import_template: partial.import_template.unwrap_or(self.import_template),
            request_util_path: partial.request_util_path.unwrap_or(self.request_util_path),
        }
    }

    /// The defaults with `partial` applied.
    pub fn from_partial(partial: PartialConfig) -> Self {
        Self::default().merge(partial)
    }

    /// The import line placed at the top of group modules.
    ///
    /// Falls back to importing `request` from `requestUtilPath` when the
    /// template is blank.
    pub fn import_line(&self) -> String {
        if self.import_template.trim().is_empty() {
            format!("import {{ request }} from '{}';", self.request_util_path)
        } else {
            self.import_template.clone()
        }
    }
}

/// User-supplied configuration. `None` (or `null` in a file) means "not set".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code_language: Option<Dialect>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude_tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_naming: Option<NamingStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_naming: Option<NamingStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_index: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_utils: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub separate_types: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_async: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_comments: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_style: Option<ExportStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_util_path: Option<String>,
}

impl PartialConfig {
    /// Stack `other` on top of `self`; values set in `other` win.
    pub fn layer(self, other: PartialConfig) -> Self {
        Self {
            code_language: other.code_language.or(self.code_language),
            output_tags: other.output_tags.or(self.output_tags),
            exclude_tags: other.exclude_tags.or(self.exclude_tags),
            function_naming: other.function_naming.or(self.function_naming),
            type_naming: other.type_naming.or(self.type_naming),
            generate_index: other.generate_index.or(self.generate_index),
            generate_utils: other.generate_utils.or(self.generate_utils),
            separate_types: other.separate_types.or(self.separate_types),
            use_async: other.use_async.or(self.use_async),
            include_comments: other.include_comments.or(self.include_comments),
            export_style: other.export_style.or(self.export_style),
            import_template: other.import_template.or(self.import_template),
            request_util_path: other.request_util_path.or(self.request_util_path),
        }
    }

    /// Load a config file. `.json` files are read as JSON, everything else as TOML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let filename = path.display().to_string();

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content, &filename)
        } else {
            Self::from_toml_str(&content, &filename)
        }
    }

    pub fn from_toml_str(content: &str, filename: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            let ctx = SourceContext::new(content, filename);
            let span = e.span().map(|range| (range.start, range.len()).into());
            ctx.config_error(e.message(), span)
        })
    }

    pub fn from_json_str(content: &str, filename: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            let ctx = SourceContext::new(content, filename);
            let span = ctx.span_at(e.line(), e.column());
            ctx.config_error(e.to_string(), span)
        })
    }
}

/// Contents written by `apigen init`.
pub const CONFIG_TEMPLATE: &str = r#"# apigen configuration

# Output language: "typescript" or "javascript"
codeLanguage = "typescript"

# Only generate these tags (empty = all). Untagged operations are always kept.
outputTags = []
excludeTags = []

# "camelCase", "snake_case" or "PascalCase"
functionNaming = "camelCase"
typeNaming = "PascalCase"

generateIndex = true
generateUtils = true
separateTypes = true
useAsync = true
includeComments = true

# "named" or "default"
exportStyle = "named"

importTemplate = "import { request } from '../utils/request';"
requestUtilPath = "../utils/request"
"#;
