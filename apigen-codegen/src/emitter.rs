//! Dialect-independent emission driver.

use apigen_core::GeneratedFile;
use apigen_spec::{Dialect, GeneratorConfig};
use tracing::debug;

use crate::{context::GenerationContext, plan::ModulePlan};

/// A target dialect's module emitter.
///
/// Implementors render the individual files; [`ModuleEmitter::emit`] decides
/// which files exist and in what order: type declarations, request helper,
/// one module per group, then the barrel.
pub trait ModuleEmitter {
    /// Output dialect
    fn dialect(&self) -> Dialect;

    /// Configuration for this pass
    fn config(&self) -> &GeneratorConfig;

    /// Whether a shared type declaration file is produced.
    fn emits_types_file(&self) -> bool {
        self.config().separate_types
    }

    /// Shared type declarations: component schemas plus request/response types.
    fn types_file(&self, modules: &[ModulePlan<'_>], ctx: &mut GenerationContext) -> GeneratedFile;

    /// Request-helper stub the group modules import.
    fn utils_file(&self) -> GeneratedFile;

    /// One group module.
    fn module_file(&self, module: &ModulePlan<'_>, ctx: &mut GenerationContext) -> GeneratedFile;

    /// Barrel re-exporting everything that was emitted.
    fn index_file(&self, modules: &[ModulePlan<'_>]) -> GeneratedFile;

    /// Source file extension for this dialect.
    fn file_extension(&self) -> &'static str {
        self.dialect().extension()
    }

    /// Produce the complete file set.
    fn emit(&self, modules: &[ModulePlan<'_>], ctx: &mut GenerationContext) -> Vec<GeneratedFile> {
        let config = self.config();
        let mut files = Vec::with_capacity(modules.len() + 3);

        if self.emits_types_file() {
            files.push(self.types_file(modules, ctx));
        }
        if config.generate_utils {
            files.push(self.utils_file());
        }
        for module in modules {
            ctx.reset_declared();
            files.push(self.module_file(module, ctx));
        }
        if config.generate_index {
            files.push(self.index_file(modules));
        }

        debug!(
            dialect = %self.dialect(),
            files = files.len(),
            "emitted files"
        );
        files
    }
}

#[cfg(test)]
mod tests {
    use apigen_core::FileKind;
    use apigen_spec::PartialConfig;

    use super::*;
    use crate::naming::ModulePath;

    struct Recorder {
        config: GeneratorConfig,
    }

    impl ModuleEmitter for Recorder {
        fn dialect(&self) -> Dialect {
            Dialect::TypeScript
        }

        fn config(&self) -> &GeneratorConfig {
            &self.config
        }

        fn types_file(&self, _: &[ModulePlan<'_>], _: &mut GenerationContext) -> GeneratedFile {
            GeneratedFile::new("types.ts", "", FileKind::TypeScript)
        }

        fn utils_file(&self) -> GeneratedFile {
            GeneratedFile::new("utils/request.ts", "", FileKind::TypeScript)
        }

        fn module_file(&self, module: &ModulePlan<'_>, ctx: &mut GenerationContext) -> GeneratedFile {
            assert!(ctx.declare("Shared"), "declared types leak between modules");
            GeneratedFile::new(module.module.file_path("ts"), "", FileKind::TypeScript)
        }

        fn index_file(&self, _: &[ModulePlan<'_>]) -> GeneratedFile {
            GeneratedFile::new("index.ts", "", FileKind::TypeScript)
        }
    }

    fn module(tag: &str) -> ModulePlan<'static> {
        ModulePlan {
            tag: tag.to_string(),
            module: ModulePath::for_tag(tag),
            operations: Vec::new(),
        }
    }

    fn paths(config: GeneratorConfig) -> Vec<String> {
        let emitter = Recorder { config };
        let mut ctx = GenerationContext::new();
        emitter
            .emit(&[module("pets"), module("store")], &mut ctx)
            .into_iter()
            .map(|f| f.path)
            .collect()
    }

    #[test]
    fn test_file_order() {
        assert_eq!(
            paths(GeneratorConfig::default()),
            ["types.ts", "utils/request.ts", "pets.ts", "store.ts", "index.ts"]
        );
    }

    #[test]
    fn test_flags_drop_files() {
        let config = GeneratorConfig::from_partial(PartialConfig {
            separate_types: Some(false),
            generate_utils: Some(false),
            generate_index: Some(false),
            ..Default::default()
        });
        assert_eq!(paths(config), ["pets.ts", "store.ts"]);
    }
}
