//! Generate operation - client modules from a document.

use std::path::Path;

use apigen_codegen_typescript::GenerateResult;
use apigen_core::{Overwrite, WriteResult};
use apigen_spec::{Document, GeneratorConfig};
use eyre::{Context, Result};
use tracing::{info, warn};

use crate::reports::{GenerateReport, GenerationResult, PreviewResult, WrittenResult};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Output directory for generated files.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Leave files that already exist untouched.
    pub keep_existing: bool,
}

fn run(doc: &Document, config: &GeneratorConfig) -> GenerateResult {
    let result = apigen_codegen_typescript::generate(doc, config);
    for diagnostic in result.warnings() {
        warn!(location = ?diagnostic.location, stage = %diagnostic.stage, "{}", diagnostic.message);
    }
    result
}

/// Execute the generate operation.
pub fn generate(doc: &Document, config: &GeneratorConfig, opts: GenerateOptions) -> Result<GenerateReport> {
    let result = run(doc, config);
    let warning_count = result.warnings().count();
    let module_count = module_count_of(&result, config);

    let output = if opts.dry_run {
        GenerationResult::Preview(PreviewResult { files: result.files })
    } else {
        let overwrite = if opts.keep_existing {
            Overwrite::IfMissing
        } else {
            Overwrite::Always
        };

        let mut written = Vec::new();
        let mut skipped = Vec::new();
        for file in &result.files {
            let outcome = file
                .write(opts.output_dir, overwrite)
                .wrap_err_with(|| format!("Failed to write {}", file.path))?;
            match outcome {
                WriteResult::Written => written.push(file.path.clone()),
                WriteResult::Skipped => skipped.push(file.path.clone()),
            }
        }
        info!(
            written = written.len(),
            skipped = skipped.len(),
            output = %opts.output_dir.display(),
            "wrote client"
        );

        GenerationResult::Written(WrittenResult {
            output_dir: opts.output_dir.to_path_buf(),
            written,
            skipped,
        })
    };

    Ok(GenerateReport {
        title: doc.info.title.clone(),
        version: doc.info.version.clone(),
        language: config.code_language,
        module_count,
        warning_count,
        result: output,
    })
}

/// The `{files, structure}` output as pretty-printed JSON.
pub fn generate_json(doc: &Document, config: &GeneratorConfig) -> Result<String> {
    let result = run(doc, config);
    serde_json::to_string_pretty(&result).wrap_err("Failed to serialize output")
}

/// Group modules among the generated files: everything except the fixed
/// support files.
fn module_count_of(result: &GenerateResult, config: &GeneratorConfig) -> usize {
    let ext = config.code_language.extension();
    let fixed = [
        format!("index.{}", ext),
        format!("utils/request.{}", ext),
        "types.ts".to_string(),
        "types.d.ts".to_string(),
    ];
    result
        .files
        .iter()
        .filter(|f| !fixed.contains(&f.path))
        .count()
}
