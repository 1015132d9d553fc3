//! Check command report data structures.

use std::path::PathBuf;

use apigen_spec::PathStatistics;

use super::output::{Output, Report};

/// Report data from document validation.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the document.
    pub input: PathBuf,
    pub title: String,
    pub version: String,
    pub openapi: String,
    pub stats: PathStatistics,
    /// Tags in display order.
    pub tags: Vec<String>,
    /// Files a generation run would produce.
    pub files: Vec<String>,
    /// Warning messages from generation.
    pub warnings: Vec<String>,
    /// Info messages from generation.
    pub infos: Vec<String>,
}

impl CheckReport {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

fn plural(n: usize, word: &str) -> String {
    format!("{} {}{}", n, word, if n == 1 { "" } else { "s" })
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(&format!("warning: {}", warning));
        }
        for info in &self.infos {
            out.preformatted(&format!("info: {}", info));
        }
        if !self.warnings.is_empty() || !self.infos.is_empty() {
            out.newline();
        }

        out.preformatted(&format!("✓ {} is valid", self.input.display()));
        out.newline();
        out.preformatted(&format!(
            "  {} v{} (OpenAPI {})",
            self.title, self.version, self.openapi
        ));
        out.preformatted(&format!(
            "  {}, {}",
            plural(self.stats.total_paths, "path"),
            plural(self.stats.total_operations, "operation")
        ));
        for (method, count) in &self.stats.by_method {
            out.key_value_indented(&method.as_upper(), &count.to_string());
        }

        if !self.tags.is_empty() {
            out.newline();
            out.section(&format!("Tags ({})", self.tags.len()));
            for tag in &self.tags {
                let count = self.stats.by_tag.get(tag).copied().unwrap_or(0);
                out.list_item(&format!("{} ({})", tag, plural(count, "operation")));
            }
        }

        out.newline();
        out.section(&format!("Files ({})", self.files.len()));
        for file in &self.files {
            out.list_item(file);
        }
    }
}
