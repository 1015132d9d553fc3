//! Non-fatal conditions collected during a generation pass.
//!
//! Unresolved references, unsupported combinators and missing response
//! schemas degrade to a fallback and are recorded here instead of aborting.

use serde::Serialize;

/// Severity level for a diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Output was produced with a fallback the user should look at.
    Warning,
    /// Informational note about the output.
    Info,
}

impl Severity {
    pub fn is_warning(&self) -> bool {
        matches!(self, Severity::Warning)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// Pipeline stage that produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Group,
    Naming,
    Types,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Group => "group",
            Stage::Naming => "naming",
            Stage::Types => "types",
        };
        write!(f, "{}", name)
    }
}

/// A diagnostic message from a generation stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub stage: Stage,
    pub message: String,
    /// Where in the document the condition was found (e.g. `GET /pets/{id}`).
    pub location: Option<String>,
}

impl Diagnostic {
    pub fn warning(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            stage,
            message: message.into(),
            location: None,
        }
    }

    pub fn info(stage: Stage, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            stage,
            message: message.into(),
            location: None,
        }
    }

    /// Add a location to this diagnostic.
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]: {}", self.severity, self.stage, self.message)?;
        if let Some(loc) = &self.location {
            write!(f, " (at {})", loc)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_with_location() {
        let diag = Diagnostic::warning(Stage::Types, "unresolved reference `Pet`").at("GET /pets");
        assert!(diag.severity.is_warning());
        assert_eq!(diag.location.as_deref(), Some("GET /pets"));
        assert_eq!(
            diag.to_string(),
            "warning [types]: unresolved reference `Pet` (at GET /pets)"
        );
    }

    #[test]
    fn test_serializes_lowercase() {
        let diag = Diagnostic::info(Stage::Group, "tag `Index` maps to an existing module");
        let json = serde_json::to_value(&diag).unwrap();
        assert_eq!(json["severity"], "info");
        assert_eq!(json["stage"], "group");
    }
}
