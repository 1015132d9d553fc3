//! JavaScript module emitter.
//!
//! Functions carry JSDoc annotations that point at `types.d.ts`, so the
//! declaration file is emitted whatever `separateTypes` says.

use apigen_codegen::{GenerationContext, ModuleEmitter, ModulePlan};
use apigen_core::{FileKind, GeneratedFile};
use apigen_spec::{Dialect, Document, GeneratorConfig};

use crate::{
    code_file::CodeFile,
    declarations::Declarations,
    files::RequestJs,
    shape::RequestShape,
    shared,
};

/// Emits `.js` modules plus a `types.d.ts` declaration file.
pub struct JavaScriptEmitter<'a> {
    declarations: Declarations<'a>,
    config: &'a GeneratorConfig,
}

impl<'a> JavaScriptEmitter<'a> {
    pub fn new(doc: &'a Document, config: &'a GeneratorConfig) -> Self {
        Self {
            declarations: Declarations::new(doc, config),
            config,
        }
    }
}

impl ModuleEmitter for JavaScriptEmitter<'_> {
    fn dialect(&self) -> Dialect {
        Dialect::JavaScript
    }

    fn config(&self) -> &GeneratorConfig {
        self.config
    }

    fn emits_types_file(&self) -> bool {
        true
    }

    fn types_file(&self, modules: &[ModulePlan<'_>], ctx: &mut GenerationContext) -> GeneratedFile {
        shared::types_file(&self.declarations, modules, self.config, ctx, "types.d.ts")
    }

    fn utils_file(&self) -> GeneratedFile {
        RequestJs::new(self.config).file()
    }

    fn module_file(&self, module: &ModulePlan<'_>, ctx: &mut GenerationContext) -> GeneratedFile {
        let config = self.config;
        let types_path = format!("{}types", module.module.root_prefix());

        let mut file = CodeFile::new().raw_import(config.import_line());
        for op in &module.operations {
            let shape = RequestShape::of(op, self.declarations.translator(), ctx);
            file = file.add(shared::client_function(op, &shape, config, Dialect::JavaScript, &types_path));
        }
        if let Some(export) = shared::default_export(module, config) {
            file = file.export(export);
        }

        GeneratedFile::new(module.module.file_path("js"), file.render(), FileKind::JavaScript)
    }

    fn index_file(&self, modules: &[ModulePlan<'_>]) -> GeneratedFile {
        shared::index_file(modules, self.config, Dialect::JavaScript, false)
    }
}

#[cfg(test)]
mod tests {
    use apigen_codegen::{group_operations, plan_modules, testing::PETSTORE_YAML};

    use super::*;

    #[test]
    fn test_types_file_ignores_separate_types() {
        let doc = Document::parse(PETSTORE_YAML).unwrap();
        let config = GeneratorConfig {
            code_language: Dialect::JavaScript,
            separate_types: false,
            ..GeneratorConfig::default()
        };
        let mut ctx = GenerationContext::new();
        let plans = plan_modules(group_operations(&doc), &config, &mut ctx);
        let files = JavaScriptEmitter::new(&doc, &config).emit(&plans, &mut ctx);

        let paths: Vec<_> = files.iter().map(|f| f.path.as_str()).collect();
        assert_eq!(paths, ["types.d.ts", "utils/request.js", "pets.js", "store.js", "index.js"]);
        assert_eq!(files[0].kind, FileKind::TypeScript);
    }
}
