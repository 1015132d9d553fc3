//! Module plan: the retained groups with every name resolved.
//!
//! Names are assigned once per pass, in emission order, so the type file and
//! the group modules always agree on them.

use std::collections::HashSet;

use apigen_spec::{GeneratorConfig, HttpMethod, Operation};

use crate::{
    context::GenerationContext,
    diagnostic::Stage,
    grouping::{GroupedOperation, OperationGroups},
    naming::{ModulePath, NameRegistry, OperationNames, function_base_name},
};

/// An operation ready for emission.
#[derive(Debug, Clone)]
pub struct PlannedOperation<'a> {
    pub path: &'a str,
    pub method: HttpMethod,
    pub operation: &'a Operation,
    pub names: OperationNames,
}

impl PlannedOperation<'_> {
    pub fn location(&self) -> String {
        format!("{} {}", self.method.as_upper(), self.path)
    }
}

/// One group module.
#[derive(Debug, Clone)]
pub struct ModulePlan<'a> {
    pub tag: String,
    pub module: ModulePath,
    pub operations: Vec<PlannedOperation<'a>>,
}

/// Stems of the barrel and the shared type file.
const RESERVED_MODULES: &[&str] = &["index", "types"];

/// Resolve function, type and file names for every retained group.
///
/// Function names that collide get a numeric suffix and a warning. Two tags
/// that map to the same module file, or to `index`/`types`, are separated
/// the same way.
pub fn plan_modules<'a>(
    groups: OperationGroups<'a>,
    config: &GeneratorConfig,
    ctx: &mut GenerationContext,
) -> Vec<ModulePlan<'a>> {
    let mut functions = NameRegistry::new();
    let mut files: HashSet<String> = RESERVED_MODULES.iter().map(|s| s.to_string()).collect();
    let mut plans = Vec::with_capacity(groups.len());

    for (tag, operations) in groups {
        let module = unique_module(&tag, &mut files, ctx);
        let operations = operations
            .into_iter()
            .map(|op| plan_operation(op, config, &mut functions, ctx))
            .collect();

        plans.push(ModulePlan {
            tag,
            module,
            operations,
        });
    }

    plans
}

fn plan_operation<'a>(
    op: GroupedOperation<'a>,
    config: &GeneratorConfig,
    functions: &mut NameRegistry,
    ctx: &mut GenerationContext,
) -> PlannedOperation<'a> {
    let base = function_base_name(op.method, op.path);
    let (claimed, renamed) = functions.claim(&base, config.function_naming);
    let names = OperationNames::new(claimed, config.function_naming, config.type_naming);

    if renamed {
        ctx.warn(
            Stage::Naming,
            format!(
                "function name `{}` is already used, renamed to `{}`",
                config.function_naming.apply(&base),
                names.function
            ),
            Some(&op.location()),
        );
    }

    PlannedOperation {
        path: op.path,
        method: op.method,
        operation: op.operation,
        names,
    }
}

fn unique_module(tag: &str, files: &mut HashSet<String>, ctx: &mut GenerationContext) -> ModulePath {
    let base = ModulePath::for_tag(tag);
    // Compare by stem so `pets.ts` and `pets/index.ts` never land side by side.
    if files.insert(base.stem.to_lowercase()) {
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = base.with_suffix(n);
        if files.insert(candidate.stem.to_lowercase()) {
            ctx.warn(
                Stage::Group,
                format!(
                    "tag `{}` maps to an existing module `{}`, using `{}`",
                    tag, base.stem, candidate.stem
                ),
                None,
            );
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use apigen_spec::Document;

    use super::*;
    use crate::{diagnostic::Severity, grouping::group_operations};

    fn document() -> Document {
        Document::parse(
            r#"
openapi: 3.0.0
info: { title: Pets, version: "1" }
paths:
  /pets/{id}:
    get: { tags: [Pets] }
  /pets/{petId}/:
    get: { tags: [pets] }
  /pets:
    post: { tags: [pets] }
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_function_collision_is_renamed() {
        let doc = document();
        let mut ctx = GenerationContext::new();
        let plans = plan_modules(group_operations(&doc), &GeneratorConfig::default(), &mut ctx);

        assert_eq!(plans[0].operations[0].names.function, "getPets");
        assert_eq!(plans[1].operations[0].names.function, "getPets2");
        assert_eq!(plans[1].operations[0].names.request_type, "GetPets2Request");
        assert_eq!(plans[1].operations[1].names.function, "postPets");

        let warnings: Vec<_> = ctx.warnings().collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|d| d.severity == Severity::Warning));
        assert!(warnings[0].message.contains("module"));
        assert_eq!(warnings[1].location.as_deref(), Some("GET /pets/{petId}/"));
    }

    #[test]
    fn test_module_collision_is_suffixed() {
        let doc = document();
        let mut ctx = GenerationContext::new();
        let plans = plan_modules(group_operations(&doc), &GeneratorConfig::default(), &mut ctx);

        assert_eq!(plans[0].module.file_path("ts"), "pets.ts");
        assert_eq!(plans[1].module.file_path("ts"), "pets-2.ts");
    }

    #[test]
    fn test_reserved_module_names_are_suffixed() {
        let doc = Document::parse(
            r#"
openapi: 3.0.0
info: { title: Pets, version: "1" }
paths:
  /a:
    get: { tags: [Index] }
  /b:
    get: { tags: [types] }
"#,
        )
        .unwrap();
        let mut ctx = GenerationContext::new();
        let plans = plan_modules(group_operations(&doc), &GeneratorConfig::default(), &mut ctx);

        assert_eq!(plans[0].module.file_path("ts"), "index-2.ts");
        assert_eq!(plans[1].module.file_path("ts"), "types-2.ts");

        let warnings: Vec<_> = ctx.warnings().collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().all(|d| d.stage == Stage::Group));
        assert!(warnings[0].message.contains("`index-2`"));
    }
}
