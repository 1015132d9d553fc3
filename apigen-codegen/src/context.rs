//! Per-pass generation state.

use std::collections::HashSet;

use crate::diagnostic::{Diagnostic, Severity, Stage};

/// State owned by one generation pass.
///
/// Holds the set of named types already emitted into the current output
/// unit and the diagnostics collected so far. A fresh context is created for
/// every pass, so concurrent passes never share it.
#[derive(Debug, Default)]
pub struct GenerationContext {
    declared: HashSet<String>,
    diagnostics: Vec<Diagnostic>,
}

impl GenerationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a named type. Returns `false` if it was already declared.
    pub fn declare(&mut self, name: &str) -> bool {
        self.declared.insert(name.to_string())
    }

    /// Forget declared types when a new output unit (file) starts.
    pub fn reset_declared(&mut self) {
        self.declared.clear();
    }

    pub fn warn(&mut self, stage: Stage, message: impl Into<String>, location: Option<&str>) {
        let mut diagnostic = Diagnostic::warning(stage, message);
        if let Some(location) = location {
            diagnostic = diagnostic.at(location);
        }
        self.add_diagnostic(diagnostic);
    }

    pub fn info(&mut self, stage: Stage, message: impl Into<String>, location: Option<&str>) {
        let mut diagnostic = Diagnostic::info(stage, message);
        if let Some(location) = location {
            diagnostic = diagnostic.at(location);
        }
        self.add_diagnostic(diagnostic);
    }

    /// Add a diagnostic, skipping exact duplicates.
    pub fn add_diagnostic(&mut self, diagnostic: Diagnostic) {
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic);
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity.is_warning())
            .count()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d.severity, Severity::Warning))
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_once() {
        let mut ctx = GenerationContext::new();
        assert!(ctx.declare("Pet"));
        assert!(!ctx.declare("Pet"));

        ctx.reset_declared();
        assert!(ctx.declare("Pet"));
    }

    #[test]
    fn test_diagnostics() {
        let mut ctx = GenerationContext::new();
        ctx.warn(Stage::Types, "unresolved reference `Owner`", Some("Pet.owner"));
        ctx.warn(Stage::Types, "unresolved reference `Owner`", Some("Pet.owner"));
        ctx.info(Stage::Types, "no 200 response schema", None);

        assert!(ctx.has_warnings());
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.diagnostics().len(), 2);
        assert_eq!(ctx.warnings().count(), 1);
    }
}
