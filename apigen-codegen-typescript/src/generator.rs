//! One generation pass from document to file set.

use apigen_codegen::{
    Diagnostic, FileTreeNode, GenerationContext, ModuleEmitter, build_tree, group_operations,
    plan_modules, retain_groups,
};
use apigen_core::GeneratedFile;
use apigen_spec::{Dialect, Document, GeneratorConfig, filter_by_tags};
use serde::Serialize;
use tracing::{debug, info};

use crate::{typed::TypeScriptEmitter, untyped::JavaScriptEmitter};

/// Output of a generation pass.
///
/// Serializes to the `{files, structure}` contract; diagnostics travel
/// alongside but are not part of it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateResult {
    pub files: Vec<GeneratedFile>,
    pub structure: Vec<FileTreeNode>,
    #[serde(skip)]
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerateResult {
    pub fn file(&self, path: &str) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }
}

/// Generate client modules for a parsed document.
///
/// Never fails: anything the emitters cannot express degrades to a fallback
/// and is reported in [`GenerateResult::diagnostics`].
pub fn generate(doc: &Document, config: &GeneratorConfig) -> GenerateResult {
    let filtered;
    let doc = if config.output_tags.is_empty() && config.exclude_tags.is_empty() {
        doc
    } else {
        filtered = filter_by_tags(doc, &config.output_tags, &config.exclude_tags);
        debug!(paths = filtered.paths.len(), "filtered document by tag");
        &filtered
    };

    let mut ctx = GenerationContext::new();
    let groups = retain_groups(group_operations(doc), &config.output_tags, &config.exclude_tags);
    let plans = plan_modules(groups, config, &mut ctx);

    let files = match config.code_language {
        Dialect::TypeScript => TypeScriptEmitter::new(doc, config).emit(&plans, &mut ctx),
        Dialect::JavaScript => JavaScriptEmitter::new(doc, config).emit(&plans, &mut ctx),
    };
    let structure = build_tree(&files);

    info!(
        dialect = %config.code_language,
        modules = plans.len(),
        files = files.len(),
        warnings = ctx.warning_count(),
        "generated client"
    );

    GenerateResult {
        files,
        structure,
        diagnostics: ctx.into_diagnostics(),
    }
}

/// Parse `text` as JSON or YAML and generate from it.
///
/// A document that fails to parse or validate yields the error and no files.
pub fn generate_from_str(text: &str, config: &GeneratorConfig) -> apigen_spec::Result<GenerateResult> {
    let doc = Document::parse(text)?;
    Ok(generate(&doc, config))
}
