//! TypeScript module emitter.

use apigen_codegen::{GenerationContext, ModuleEmitter, ModulePlan};
use apigen_core::{FileKind, GeneratedFile};
use apigen_spec::{Dialect, Document, GeneratorConfig};

use crate::{
    ast::{Declaration, Import},
    code_file::CodeFile,
    declarations::Declarations,
    files::RequestTs,
    shape::RequestShape,
    shared,
};

/// Emits `.ts` modules with full type annotations.
pub struct TypeScriptEmitter<'a> {
    declarations: Declarations<'a>,
    config: &'a GeneratorConfig,
}

impl<'a> TypeScriptEmitter<'a> {
    pub fn new(doc: &'a Document, config: &'a GeneratorConfig) -> Self {
        Self {
            declarations: Declarations::new(doc, config),
            config,
        }
    }

    /// Everything a module file declares for itself when types are not
    /// kept in `types.ts`.
    fn inline_declarations(
        &self,
        module: &ModulePlan<'_>,
        shapes: &[RequestShape],
        ctx: &mut GenerationContext,
    ) -> Vec<Declaration> {
        let mut declarations: Vec<Declaration> = self
            .declarations
            .components_used_by(&module.operations, ctx)
            .into_iter()
            .map(Declaration::private)
            .collect();
        for (op, shape) in module.operations.iter().zip(shapes) {
            declarations.extend(self.declarations.operation(op, shape, ctx));
        }
        declarations
    }
}

impl ModuleEmitter for TypeScriptEmitter<'_> {
    fn dialect(&self) -> Dialect {
        Dialect::TypeScript
    }

    fn config(&self) -> &GeneratorConfig {
        self.config
    }

    fn types_file(&self, modules: &[ModulePlan<'_>], ctx: &mut GenerationContext) -> GeneratedFile {
        shared::types_file(&self.declarations, modules, self.config, ctx, "types.ts")
    }

    fn utils_file(&self) -> GeneratedFile {
        RequestTs::new(self.config).file()
    }

    fn module_file(&self, module: &ModulePlan<'_>, ctx: &mut GenerationContext) -> GeneratedFile {
        let config = self.config;
        let types_path = format!("{}types", module.module.root_prefix());
        let shapes: Vec<RequestShape> = module
            .operations
            .iter()
            .map(|op| RequestShape::of(op, self.declarations.translator(), ctx))
            .collect();

        let mut file = CodeFile::new().raw_import(config.import_line());

        if config.separate_types {
            let mut names: Vec<&str> = Vec::with_capacity(module.operations.len() * 2);
            for (op, shape) in module.operations.iter().zip(&shapes) {
                if !shape.is_empty() {
                    names.push(&op.names.request_type);
                }
                names.push(&op.names.response_type);
            }
            names.sort_unstable();
            names.dedup();
            file = file.import(Import::new(&types_path).names(names).type_only());
        } else {
            let declarations = self.inline_declarations(module, &shapes, ctx);
            if config.include_comments && !declarations.is_empty() {
                file = file.section("types");
            }
            file = file.add_all(declarations);
            if config.include_comments {
                file = file.section("API functions");
            }
        }

        file = file.add_all(
            module
                .operations
                .iter()
                .zip(&shapes)
                .map(|(op, shape)| shared::client_function(op, shape, config, Dialect::TypeScript, &types_path)),
        );
        if let Some(export) = shared::default_export(module, config) {
            file = file.export(export);
        }

        GeneratedFile::new(module.module.file_path("ts"), file.render(), FileKind::TypeScript)
    }

    fn index_file(&self, modules: &[ModulePlan<'_>]) -> GeneratedFile {
        shared::index_file(modules, self.config, Dialect::TypeScript, self.config.separate_types)
    }
}
