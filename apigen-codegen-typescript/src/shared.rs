//! Pieces both dialects emit the same way.

use apigen_codegen::{CodeFragment, GenerationContext, ModulePlan, NameRegistry, PlannedOperation};
use apigen_core::{FileKind, GeneratedFile, NamingStyle};
use apigen_spec::{Dialect, ExportStyle, GeneratorConfig};

use crate::{
    ast::{Export, Fn, FnStyle, Param},
    code_file::CodeFile,
    declarations::Declarations,
    naming::TS_NAMING,
    shape::{PARAMS, RequestShape},
};

pub(crate) const GENERATED_HEADER: &str = "This file is generated by apigen. Do not edit it by hand.";

/// The identifier a client function is declared under.
pub(crate) fn function_name(op: &PlannedOperation<'_>) -> String {
    TS_NAMING.safe_name(&op.names.function)
}

/// Doc comment lines for a client function.
///
/// The first line is the summary, else the description, else the function
/// name. JavaScript output passes `jsdoc_types` to add `@param`/`@returns`.
fn function_doc(op: &PlannedOperation<'_>, shape: &RequestShape, jsdoc_types: Option<&str>) -> String {
    let summary = op.operation.summary.trim();
    let description = op.operation.description.trim();

    let mut lines: Vec<String> = Vec::new();
    lines.push(if !summary.is_empty() {
        summary.to_string()
    } else if !description.is_empty() {
        description.to_string()
    } else {
        function_name(op)
    });
    if !summary.is_empty() && !description.is_empty() && description != summary {
        lines.push(description.to_string());
    }
    if op.operation.deprecated {
        lines.push("@deprecated".to_string());
    }
    if let Some(types) = jsdoc_types {
        if !shape.is_empty() {
            lines.push(format!(
                "@param {{import('{}').{}}} {}",
                types, op.names.request_type, PARAMS
            ));
        }
        lines.push(format!(
            "@returns {{Promise<import('{}').{}>}}",
            types, op.names.response_type
        ));
    }
    lines.join("\n")
}

/// The client function for one operation.
pub(crate) fn client_function(
    op: &PlannedOperation<'_>,
    shape: &RequestShape,
    config: &GeneratorConfig,
    dialect: Dialect,
    types_path: &str,
) -> Fn {
    let typed = dialect == Dialect::TypeScript;
    let response = &op.names.response_type;
    let call = if typed {
        format!("request<{}>(", response)
    } else {
        "request(".to_string()
    };

    let object = shape.call_object(op);
    let body = if config.use_async {
        vec![
            object.wrapped(&format!("const response = await {}", call), ");"),
            CodeFragment::line("return response;"),
        ]
    } else {
        vec![object.wrapped(&format!("return {}", call), ");")]
    };

    let mut function = Fn::new(function_name(op))
        .exported(config.export_style == ExportStyle::Named)
        .async_(config.use_async)
        .style(if config.use_async {
            FnStyle::Arrow
        } else {
            FnStyle::Declaration
        })
        .body(body);

    if !shape.is_empty() {
        function = function.param(if typed {
            Param::new(PARAMS, &op.names.request_type)
        } else {
            Param::untyped(PARAMS)
        });
    }
    if typed {
        function = function.returns(Some(format!("Promise<{}>", response)));
    }
    if config.include_comments {
        let jsdoc_types = (!typed).then_some(types_path);
        function = function.doc(Some(function_doc(op, shape, jsdoc_types)));
    }
    function
}

/// `export default { ... }` for the default export style.
pub(crate) fn default_export(module: &ModulePlan<'_>, config: &GeneratorConfig) -> Option<Export> {
    (config.export_style == ExportStyle::Default)
        .then(|| Export::default_object(module.operations.iter().map(function_name)))
}

/// The shared type declaration file.
pub(crate) fn types_file(
    declarations: &Declarations<'_>,
    modules: &[ModulePlan<'_>],
    config: &GeneratorConfig,
    ctx: &mut GenerationContext,
    path: &str,
) -> GeneratedFile {
    let mut file = CodeFile::new();
    if config.include_comments {
        file = file.header(GENERATED_HEADER);
    }

    file = file.add_all(declarations.components(ctx));
    for op in modules.iter().flat_map(|m| &m.operations) {
        let shape = RequestShape::of(op, declarations.translator(), ctx);
        file = file.add_all(declarations.operation(op, &shape, ctx));
    }

    GeneratedFile::new(path, file.render(), FileKind::TypeScript)
}

/// The barrel module.
pub(crate) fn index_file(
    modules: &[ModulePlan<'_>],
    config: &GeneratorConfig,
    dialect: Dialect,
    with_types: bool,
) -> GeneratedFile {
    let (extension, kind) = match dialect {
        Dialect::TypeScript => (None, FileKind::TypeScript),
        Dialect::JavaScript => (Some("js"), FileKind::JavaScript),
    };

    let mut file = CodeFile::new();
    if config.include_comments {
        file = file.header(GENERATED_HEADER);
    }
    if with_types {
        file = file.export(Export::all("./types"));
    }
    if config.generate_utils {
        let utils = match extension {
            Some(ext) => format!("./utils/request.{}", ext),
            None => "./utils/request".to_string(),
        };
        file = file.export(Export::all(utils));
    }

    let mut aliases = NameRegistry::new();
    for module in modules {
        let specifier = module.module.import_path(extension);
        let export = match config.export_style {
            ExportStyle::Named => Export::all(specifier),
            ExportStyle::Default => {
                let (alias, _) = aliases.claim(&format!("{}_api", module.module.stem), NamingStyle::CamelCase);
                Export::default_as(specifier, NamingStyle::CamelCase.apply(&alias))
            }
        };
        file = file.export(export);
    }

    GeneratedFile::new(format!("index.{}", dialect.extension()), file.render(), kind)
}
