//! Named type declarations: component schemas and per-operation types.

use std::{borrow::Cow, collections::HashSet};

use apigen_codegen::{GenerationContext, PlannedOperation, Stage};
use apigen_spec::{Document, GeneratorConfig, Schema};

use crate::{
    ast::{Declaration, Field, Interface, TypeAlias},
    naming::property_key,
    shape::{DataShape, RequestShape},
    translator::TypeTranslator,
};

/// Builds declarations for one generation pass.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Declarations<'a> {
    doc: &'a Document,
    config: &'a GeneratorConfig,
    translator: TypeTranslator<'a>,
}

impl<'a> Declarations<'a> {
    pub fn new(doc: &'a Document, config: &'a GeneratorConfig) -> Self {
        Self {
            doc,
            config,
            translator: TypeTranslator::new(doc, config.type_naming, config.include_comments),
        }
    }

    pub fn translator(&self) -> &TypeTranslator<'a> {
        &self.translator
    }

    /// Every component schema, in document order.
    pub fn components(&self, ctx: &mut GenerationContext) -> Vec<Declaration> {
        self.doc
            .schemas()
            .into_iter()
            .flatten()
            .filter_map(|(name, schema)| self.component(name, schema, ctx))
            .collect()
    }

    /// Component schemas the operations refer to, directly or through other
    /// components, in document order.
    pub fn components_used_by(
        &self,
        operations: &[PlannedOperation<'_>],
        ctx: &mut GenerationContext,
    ) -> Vec<Declaration> {
        let mut reachable: HashSet<Cow<'_, str>> = HashSet::new();
        let mut pending: Vec<Cow<'_, str>> = operations
            .iter()
            .flat_map(|op| operation_schemas(op))
            .flat_map(Schema::references)
            .collect();

        while let Some(name) = pending.pop() {
            if reachable.contains(&name) {
                continue;
            }
            let schema = self.doc.schema(&name);
            reachable.insert(name);
            if let Some(schema) = schema {
                pending.extend(schema.references());
            }
        }

        self.doc
            .schemas()
            .into_iter()
            .flatten()
            .filter(|(name, _)| reachable.contains(name.as_str()))
            .filter_map(|(name, schema)| self.component(name, schema, ctx))
            .collect()
    }

    fn component(&self, name: &str, schema: &Schema, ctx: &mut GenerationContext) -> Option<Declaration> {
        let type_name = self.translator.type_name(name);
        let location = format!("components.schemas.{}", name);
        if !ctx.declare(&type_name) {
            ctx.warn(
                Stage::Types,
                format!("type `{}` is already declared, skipped", type_name),
                Some(&location),
            );
            return None;
        }

        let doc = schema
            .description
            .clone()
            .filter(|d| self.config.include_comments && !d.trim().is_empty());

        let declaration = match schema.properties() {
            Some((properties, required)) => Interface::new(type_name)
                .doc(doc)
                .fields(properties.iter().map(|(name, property)| {
                    Field::new(property_key(name), self.translator.translate(property, ctx, &location))
                        .doc(self.translator.field_doc(property))
                        .optional_if(!required.contains(name))
                }))
                .into(),
            None => TypeAlias::new(type_name, self.translator.translate(schema, ctx, &location))
                .doc(doc)
                .into(),
        };
        Some(declaration)
    }

    /// Request, data and response declarations for one operation.
    ///
    /// The request type is left out when the operation takes no input.
    pub fn operation(
        &self,
        op: &PlannedOperation<'_>,
        request: &RequestShape,
        ctx: &mut GenerationContext,
    ) -> Vec<Declaration> {
        let names = &op.names;
        let label = if op.operation.summary.trim().is_empty() {
            names.function.as_str()
        } else {
            op.operation.summary.trim()
        };
        let doc = |suffix: &str| {
            self.config
                .include_comments
                .then(|| format!("{} {}", label, suffix))
        };

        let mut declarations: Vec<Declaration> = Vec::with_capacity(3);

        if !request.is_empty() {
            declarations.push(request.interface(&names.request_type, doc("request")).into());
        }

        let data_type = match DataShape::of(op, &self.translator, ctx) {
            DataShape::Alias(ty) => {
                declarations.push(TypeAlias::new(&names.data_type, ty).into());
                names.data_type.clone()
            }
            DataShape::Interface(fields) => {
                declarations.push(Interface::new(&names.data_type).fields(fields).into());
                names.data_type.clone()
            }
            DataShape::Inline(ty) => ty,
        };

        declarations.push(
            Interface::new(&names.response_type)
                .doc(doc("response"))
                .field(Field::new("code", "number"))
                .field(Field::new("message", "string"))
                .field(Field::new("data", data_type))
                .into(),
        );

        let location = op.location();
        declarations
            .into_iter()
            .filter(|declaration: &Declaration| {
                let fresh = ctx.declare(declaration.name());
                if !fresh {
                    ctx.warn(
                        Stage::Types,
                        format!("type `{}` is already declared, skipped", declaration.name()),
                        Some(&location),
                    );
                }
                fresh
            })
            .collect()
    }
}

/// Every schema an operation mentions.
fn operation_schemas<'o>(op: &PlannedOperation<'o>) -> Vec<&'o Schema> {
    let operation = op.operation;
    let mut schemas: Vec<&Schema> = operation
        .parameters
        .iter()
        .filter_map(|p| p.schema.as_ref())
        .collect();
    if let Some(schema) = operation
        .request_body
        .as_ref()
        .and_then(|body| body.preferred_schema())
    {
        schemas.push(schema);
    }
    if let Some(schema) = operation.success_schema() {
        schemas.push(schema);
    }
    schemas
}
