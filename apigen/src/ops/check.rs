//! Check operation - document validation and a generation dry run.

use std::path::Path;

use apigen_codegen::Severity;
use apigen_spec::{Document, GeneratorConfig, available_tags, path_statistics};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// The document has already parsed and validated at this point; this runs
/// generation in memory to surface its diagnostics.
pub fn check(doc: &Document, config: &GeneratorConfig, input: &Path) -> CheckReport {
    let result = apigen_codegen_typescript::generate(doc, config);

    let mut warnings = Vec::new();
    let mut infos = Vec::new();
    for diag in &result.diagnostics {
        let msg = if let Some(loc) = &diag.location {
            format!("{}\n  --> {}", diag.message, loc)
        } else {
            diag.message.clone()
        };

        match diag.severity {
            Severity::Warning => warnings.push(msg),
            Severity::Info => infos.push(msg),
        }
    }

    CheckReport {
        input: input.to_path_buf(),
        title: doc.info.title.clone(),
        version: doc.info.version.clone(),
        openapi: doc.openapi.clone(),
        stats: path_statistics(doc),
        tags: available_tags(doc),
        files: result.files.into_iter().map(|f| f.path).collect(),
        warnings,
        infos,
    }
}

#[cfg(test)]
mod tests {
    use apigen_codegen::testing::PETSTORE_YAML;

    use super::*;
    use crate::reports::{BufferOutput, Report};

    #[test]
    fn test_report() {
        let doc = Document::parse(PETSTORE_YAML).unwrap();
        let report = check(&doc, &GeneratorConfig::default(), Path::new("petstore.yaml"));

        assert_eq!(report.tags, ["pets", "store"]);
        assert_eq!(report.stats.total_operations, 4);
        assert_eq!(
            report.warnings,
            ["function name `getPets` is already used, renamed to `getPets2`\n  --> GET /pets/{id}"]
        );
        assert!(report.has_warnings());

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert!(out.stdout.contains(&"✓ petstore.yaml is valid".to_string()));
        assert!(out.stdout.contains(&"  Petstore v1.0.0 (OpenAPI 3.0.3)".to_string()));
        assert!(out.stdout.contains(&"  3 paths, 4 operations".to_string()));
        assert!(out.stdout.contains(&"  - pets (3 operations)".to_string()));
        assert!(out.stdout.contains(&"  - store (2 operations)".to_string()));
        assert_eq!(out.stderr.len(), 1);
    }
}
