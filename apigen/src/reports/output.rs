//! Output trait for rendering reports to different formats.

/// Target output for reports.
///
/// Reports describe *what* to output through the provided semantic methods;
/// implementations only decide where a finished line goes.
pub trait Output {
    /// Write one line of regular output.
    fn line(&mut self, text: &str);

    /// Write one line of diagnostic output.
    fn error_line(&mut self, text: &str);

    /// Start a new section with a heading.
    fn section(&mut self, name: &str) {
        self.line(&format!("{}:", name));
    }

    fn key_value(&mut self, key: &str, value: &str) {
        self.line(&format!("{}: {}", key, value));
    }

    fn key_value_indented(&mut self, key: &str, value: &str) {
        self.line(&format!("  {}: {}", key, value));
    }

    fn list_item(&mut self, text: &str) {
        self.line(&format!("  - {}", text));
    }

    /// Render an added item (e.g., a written file).
    fn added_item(&mut self, text: &str) {
        self.line(&format!("  + {}", text));
    }

    fn warning(&mut self, msg: &str) {
        self.error_line(msg);
    }

    /// Render a separator/divider with a label.
    fn divider(&mut self, label: &str) {
        self.line(&format!("── {} ──", label));
    }

    /// Render a block of preformatted text.
    fn preformatted(&mut self, text: &str) {
        self.line(text);
    }

    fn newline(&mut self) {
        self.line("");
    }
}

/// A report that can render itself to an output.
pub trait Report {
    /// Render this report to the given output.
    fn render(&self, out: &mut dyn Output);
}

/// Stdout for output, stderr for warnings.
#[derive(Default)]
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for TerminalOutput {
    fn line(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error_line(&mut self, text: &str) {
        eprintln!("{}", text);
    }
}

/// Collects rendered lines in memory.
#[cfg(test)]
#[derive(Default)]
pub struct BufferOutput {
    pub stdout: Vec<String>,
    pub stderr: Vec<String>,
}

#[cfg(test)]
impl Output for BufferOutput {
    fn line(&mut self, text: &str) {
        self.stdout.push(text.to_string());
    }

    fn error_line(&mut self, text: &str) {
        self.stderr.push(text.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warnings_go_to_stderr() {
        let mut out = BufferOutput::default();
        out.section("Files");
        out.added_item("pets.ts");
        out.warning("1 warning");
        assert_eq!(out.stdout, ["Files:", "  + pets.ts"]);
        assert_eq!(out.stderr, ["1 warning"]);
    }
}
