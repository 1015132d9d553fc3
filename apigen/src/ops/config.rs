//! Configuration resolution - file, then CLI overrides, over the defaults.

use std::path::Path;

use apigen_spec::{GeneratorConfig, PartialConfig};
use tracing::debug;

pub const DEFAULT_CONFIG_FILE: &str = "apigen.toml";

/// Resolve the configuration for one run.
///
/// An explicit `path` must exist. Without one, `apigen.toml` in `search_dir`
/// is used when present.
pub fn load_config(
    path: Option<&Path>,
    search_dir: &Path,
    overrides: PartialConfig,
) -> apigen_spec::Result<GeneratorConfig> {
    let from_file = match path {
        Some(path) => Some(PartialConfig::from_file(path)?),
        None => {
            let candidate = search_dir.join(DEFAULT_CONFIG_FILE);
            if candidate.is_file() {
                Some(PartialConfig::from_file(&candidate)?)
            } else {
                None
            }
        }
    };

    debug!(from_file = from_file.is_some(), "resolved configuration");
    let partial = from_file.unwrap_or_default().layer(overrides);
    Ok(GeneratorConfig::from_partial(partial))
}

#[cfg(test)]
mod tests {
    use apigen_spec::Dialect;
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_defaults_without_file() {
        let dir = TempDir::new().unwrap();
        let config = load_config(None, dir.path(), PartialConfig::default()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_discovered_file_then_overrides() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_FILE),
            "codeLanguage = \"javascript\"\nuseAsync = false\n",
        )
        .unwrap();

        let overrides = PartialConfig {
            use_async: Some(true),
            ..Default::default()
        };
        let config = load_config(None, dir.path(), overrides).unwrap();
        assert_eq!(config.code_language, Dialect::JavaScript);
        assert!(config.use_async);
    }

    #[test]
    fn test_explicit_json_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("apigen.json");
        std::fs::write(&path, r#"{ "separateTypes": false }"#).unwrap();

        let config = load_config(Some(&path), dir.path(), PartialConfig::default()).unwrap();
        assert!(!config.separate_types);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(Some(&missing), dir.path(), PartialConfig::default()).is_err());
    }
}
