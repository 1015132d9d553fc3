use std::{
    fmt,
    path::{Path, PathBuf},
};

use eyre::Result;
use serde::Serialize;

/// The kind of artifact a generated file holds.
///
/// Only used to tag files for downstream consumers (MIME types, syntax
/// highlighting); the generator itself never branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    TypeScript,
    JavaScript,
    Json,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::TypeScript => "typescript",
            FileKind::JavaScript => "javascript",
            FileKind::Json => "json",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A file produced by one generation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedFile {
    /// Slash-separated path relative to the output root
    pub path: String,
    /// Full file content
    pub content: String,
    /// Artifact kind
    pub kind: FileKind,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
        }
    }

    /// Resolve this file's location under `base`.
    pub fn target(&self, base: &Path) -> PathBuf {
        self.path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(base.to_path_buf(), |acc, segment| acc.join(segment))
    }

    /// Write the file below `base` according to the overwrite rule.
    pub fn write(&self, base: &Path, overwrite: Overwrite) -> Result<WriteResult> {
        let path = self.target(base);

        match overwrite {
            Overwrite::Always => {
                write_file(&path, &self.content)?;
                Ok(WriteResult::Written)
            }
            Overwrite::IfMissing => {
                if path.exists() {
                    Ok(WriteResult::Skipped)
                } else {
                    write_file(&path, &self.content)?;
                    Ok(WriteResult::Written)
                }
            }
        }
    }
}

/// Write `content` to `path`, creating parent directories as needed.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File was skipped (already exists)
    Skipped,
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overwrite {
    /// Always overwrite
    #[default]
    Always,
    /// Only create if file doesn't exist
    IfMissing,
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("c").join("test.ts");

        write_file(&path, "nested").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "nested");
    }

    #[test]
    fn test_target_splits_slash_path() {
        let file = GeneratedFile::new("utils/request.ts", "", FileKind::TypeScript);
        let base = Path::new("out");
        assert_eq!(
            file.target(base),
            base.join("utils").join("request.ts")
        );
    }

    #[test]
    fn test_write_always_overwrites() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("index.ts"), "original").unwrap();

        let file = GeneratedFile::new("index.ts", "updated", FileKind::TypeScript);
        let result = file.write(temp.path(), Overwrite::Always).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("index.ts")).unwrap(),
            "updated"
        );
    }

    #[test]
    fn test_write_if_missing_creates_new() {
        let temp = TempDir::new().unwrap();

        let file = GeneratedFile::new("宠物/index.ts", "content", FileKind::TypeScript);
        let result = file.write(temp.path(), Overwrite::IfMissing).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(
            fs::read_to_string(temp.path().join("宠物").join("index.ts")).unwrap(),
            "content"
        );
    }

    #[test]
    fn test_write_if_missing_skips_existing() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("pets.ts"), "original").unwrap();

        let file = GeneratedFile::new("pets.ts", "should not write", FileKind::TypeScript);
        let result = file.write(temp.path(), Overwrite::IfMissing).unwrap();

        assert_eq!(result, WriteResult::Skipped);
        assert_eq!(
            fs::read_to_string(temp.path().join("pets.ts")).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let file = GeneratedFile::new("index.js", "", FileKind::JavaScript);
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["kind"], "javascript");
    }
}
