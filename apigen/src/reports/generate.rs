//! Generate command report data structures.

use std::path::PathBuf;

use apigen_core::GeneratedFile;
use apigen_spec::Dialect;

use super::output::{Output, Report};

/// Report data from client generation.
#[derive(Debug)]
pub struct GenerateReport {
    /// API title from the document.
    pub title: String,

    /// API version from the document.
    pub version: String,

    pub language: Dialect,

    /// Number of group modules emitted.
    pub module_count: usize,

    /// Number of warning diagnostics.
    pub warning_count: usize,

    /// Files written or previewed.
    pub result: GenerationResult,
}

/// Result of code generation.
#[derive(Debug)]
pub enum GenerationResult {
    /// Files were written to disk.
    Written(WrittenResult),
    /// Dry-run preview.
    Preview(PreviewResult),
}

/// Result when files were written to disk.
#[derive(Debug)]
pub struct WrittenResult {
    pub output_dir: PathBuf,
    /// Paths written, relative to the output directory.
    pub written: Vec<String>,
    /// Paths left alone because they already existed.
    pub skipped: Vec<String>,
}

/// Result of a dry-run preview.
#[derive(Debug)]
pub struct PreviewResult {
    /// Files that would be generated.
    pub files: Vec<GeneratedFile>,
}

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            GenerationResult::Written(written) => self.render_written(out, written),
            GenerationResult::Preview(preview) => self.render_preview(out, preview),
        }
    }
}

impl GenerateReport {
    fn render_written(&self, out: &mut dyn Output, written: &WrittenResult) {
        out.preformatted(&format!("{} v{}", self.title, self.version));
        out.newline();

        out.key_value("Language", self.language.as_str());
        out.key_value("Modules", &self.module_count.to_string());
        out.key_value("Generated", &written.output_dir.display().to_string());
        for path in &written.written {
            out.added_item(path);
        }

        if !written.skipped.is_empty() {
            out.newline();
            out.section("Kept existing");
            for path in &written.skipped {
                out.list_item(path);
            }
        }

        self.render_warning_count(out);
    }

    fn render_preview(&self, out: &mut dyn Output, preview: &PreviewResult) {
        for file in &preview.files {
            out.divider(&file.path);
            out.preformatted(&file.content);
        }

        out.divider("Summary");
        out.preformatted(&format!("{} files would be generated", preview.files.len()));
        self.render_warning_count(out);
    }

    fn render_warning_count(&self, out: &mut dyn Output) {
        if self.warning_count > 0 {
            out.newline();
            out.warning(&format!(
                "{} warning{} (run `apigen check` for details)",
                self.warning_count,
                if self.warning_count == 1 { "" } else { "s" }
            ));
        }
    }
}
