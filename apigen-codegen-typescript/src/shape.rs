//! Per-operation request and response shapes.
//!
//! A shape is computed once and drives both the request/response type
//! declarations and the body of the client function, so the two can never
//! disagree on field names.

use std::collections::HashSet;

use apigen_codegen::{GenerationContext, PlannedOperation, Stage};
use apigen_spec::{ParameterLocation, Schema, SchemaKind};

use crate::{
    ast::{Field, Interface, JsObject},
    naming::{property_access, property_key},
    translator::{FALLBACK_TYPE, TypeTranslator},
};

/// Name of the single argument every client function takes.
pub(crate) const PARAMS: &str = "params";

/// One field of a request type.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RequestField {
    pub name: String,
    pub ty: String,
    pub required: bool,
    pub doc: Option<String>,
}

impl RequestField {
    fn to_field(&self) -> Field {
        Field::new(property_key(&self.name), self.ty.clone())
            .doc(self.doc.clone())
            .optional_if(!self.required)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum BodyShape {
    None,
    /// Object body whose properties become top-level request fields
    Flattened(Vec<RequestField>),
    /// Any other body, passed through as `body`
    Opaque { ty: String, required: bool },
}

/// Everything an operation accepts.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct RequestShape {
    /// Path placeholders, in template order
    pub path: Vec<RequestField>,
    pub query: Vec<RequestField>,
    pub headers: Vec<RequestField>,
    pub body: BodyShape,
}

impl RequestShape {
    pub fn of(op: &PlannedOperation<'_>, translator: &TypeTranslator<'_>, ctx: &mut GenerationContext) -> Self {
        let location = op.location();
        let mut taken: HashSet<String> = HashSet::new();

        let parameter_type = |schema: Option<&Schema>, ctx: &mut GenerationContext| match schema {
            Some(schema) => translator.translate(schema, ctx, &location),
            None => FALLBACK_TYPE.to_string(),
        };
        let parameter_doc = |description: Option<&String>| {
            description
                .filter(|_| translator.comments_enabled())
                .filter(|d| !d.trim().is_empty())
                .cloned()
        };

        let mut path = Vec::new();
        for placeholder in placeholders(op.path) {
            let declared = op
                .operation
                .parameters_in(ParameterLocation::Path)
                .find(|p| p.name == placeholder);
            let field = match declared {
                Some(param) => RequestField {
                    name: placeholder.to_string(),
                    ty: parameter_type(param.schema.as_ref(), ctx),
                    required: true,
                    doc: parameter_doc(param.description.as_ref()),
                },
                None => RequestField {
                    name: placeholder.to_string(),
                    ty: "string".to_string(),
                    required: true,
                    doc: None,
                },
            };
            if taken.insert(field.name.clone()) {
                path.push(field);
            }
        }
        for param in op.operation.parameters_in(ParameterLocation::Path) {
            if !path.iter().any(|f| f.name == param.name) {
                ctx.warn(
                    Stage::Types,
                    format!("path parameter `{}` does not appear in the path template", param.name),
                    Some(&location),
                );
            }
        }

        // `headers` and an opaque `body` are request fields too; claim them
        // before query and body fields so those cannot shadow them.
        let has_headers = op.operation.parameters_in(ParameterLocation::Header).next().is_some();
        let has_opaque_body = op.operation.request_body.as_ref().is_some_and(|body| {
            body.preferred_schema()
                .is_none_or(|schema| schema.properties().is_none())
        });
        let mut container = |name: &str, wanted: bool, ctx: &mut GenerationContext| {
            if !wanted {
                return false;
            }
            if taken.insert(name.to_string()) {
                return true;
            }
            ctx.warn(
                Stage::Types,
                format!("`{}` clashes with a path parameter of the same name, skipped", name),
                Some(&location),
            );
            false
        };
        let keep_headers = container("headers", has_headers, ctx);
        let keep_body = container("body", has_opaque_body, ctx);

        let mut query = Vec::new();
        for param in op.operation.parameters_in(ParameterLocation::Query) {
            if !taken.insert(param.name.clone()) {
                ctx.warn(
                    Stage::Types,
                    format!("query parameter `{}` clashes with another request field, skipped", param.name),
                    Some(&location),
                );
                continue;
            }
            query.push(RequestField {
                name: param.name.clone(),
                ty: parameter_type(param.schema.as_ref(), ctx),
                required: param.required,
                doc: parameter_doc(param.description.as_ref()),
            });
        }

        let headers: Vec<RequestField> = op
            .operation
            .parameters_in(ParameterLocation::Header)
            .filter(|_| keep_headers)
            .map(|param| RequestField {
                name: param.name.clone(),
                ty: parameter_type(param.schema.as_ref(), ctx),
                required: param.required,
                doc: parameter_doc(param.description.as_ref()),
            })
            .collect();

        for param in op.operation.parameters_in(ParameterLocation::Cookie) {
            ctx.info(
                Stage::Types,
                format!("cookie parameter `{}` is not part of the request type", param.name),
                Some(&location),
            );
        }

        let body = match &op.operation.request_body {
            None => BodyShape::None,
            Some(_) if has_opaque_body && !keep_body => BodyShape::None,
            Some(request_body) => match request_body.preferred_schema() {
                Some(schema) => match schema.properties() {
                    Some((properties, required)) => {
                        let mut fields = Vec::with_capacity(properties.len());
                        for (name, property) in properties {
                            if !taken.insert(name.clone()) {
                                ctx.warn(
                                    Stage::Types,
                                    format!("body field `{}` clashes with another request field, skipped", name),
                                    Some(&location),
                                );
                                continue;
                            }
                            fields.push(RequestField {
                                name: name.clone(),
                                ty: translator.translate(property, ctx, &location),
                                required: required.contains(name),
                                doc: translator.field_doc(property),
                            });
                        }
                        BodyShape::Flattened(fields)
                    }
                    None => BodyShape::Opaque {
                        ty: translator.translate(schema, ctx, &location),
                        required: request_body.required,
                    },
                },
                None => BodyShape::Opaque {
                    ty: FALLBACK_TYPE.to_string(),
                    required: request_body.required,
                },
            },
        };
        Self {
            path,
            query,
            headers,
            body,
        }
    }

    /// Whether the function takes no argument at all.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
            && self.query.is_empty()
            && self.headers.is_empty()
            && matches!(self.body, BodyShape::None)
    }

    /// Fields of the request type, in declaration order.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields: Vec<Field> = self
            .path
            .iter()
            .chain(&self.query)
            .map(RequestField::to_field)
            .collect();

        if !self.headers.is_empty() {
            let required = self.headers.iter().any(|h| h.required);
            fields.push(Field::new("headers", inline_object(&self.headers)).optional_if(!required));
        }

        match &self.body {
            BodyShape::None => {}
            BodyShape::Flattened(body) => fields.extend(body.iter().map(RequestField::to_field)),
            BodyShape::Opaque { ty, required } => {
                fields.push(Field::new("body", ty.clone()).optional_if(!required))
            }
        }
        fields
    }

    pub fn interface(&self, name: &str, doc: Option<String>) -> Interface {
        Interface::new(name).doc(doc).fields(self.fields())
    }

    /// The object passed to `request(...)`.
    pub fn call_object(&self, op: &PlannedOperation<'_>) -> JsObject {
        let mut object = JsObject::new()
            .raw("url", self.url(op.path))
            .string("method", &op.method.as_upper());

        if !self.query.is_empty() {
            let params = self.query.iter().fold(JsObject::new(), |acc, field| {
                acc.raw(property_key(&field.name), property_access(PARAMS, &field.name))
            });
            object = object.object("params", params);
        }

        if !self.headers.is_empty() {
            object = object.raw("headers", property_access(PARAMS, "headers"));
        }

        match &self.body {
            BodyShape::None => {}
            BodyShape::Flattened(fields) => {
                let data = fields.iter().fold(JsObject::new(), |acc, field| {
                    acc.raw(property_key(&field.name), property_access(PARAMS, &field.name))
                });
                object = object.object("data", data);
            }
            BodyShape::Opaque { .. } => {
                object = object.raw("data", property_access(PARAMS, "body"));
            }
        }

        object
    }

    /// The URL expression: a quoted string, or a template literal when the
    /// path has placeholders.
    fn url(&self, path: &str) -> String {
        if self.path.is_empty() {
            return format!("'{}'", path.replace('\\', "\\\\").replace('\'', "\\'"));
        }

        let mut out = String::from("`");
        let mut rest = path;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            out.push_str(&escape_template(&rest[..start]));
            let name = &rest[start + 1..start + len];
            out.push_str(&format!("${{{}}}", property_access(PARAMS, name)));
            rest = &rest[start + len + 1..];
        }
        out.push_str(&escape_template(rest));
        out.push('`');
        out
    }
}

/// Names of the `{placeholders}` in a path template, in order.
pub(crate) fn placeholders(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        let name = &rest[start + 1..start + len];
        if !name.is_empty() {
            names.push(name);
        }
        rest = &rest[start + len + 1..];
    }
    names
}

fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

/// `{ a: T; b?: U }` laid out one field per line.
fn inline_object(fields: &[RequestField]) -> String {
    let mut out = String::from("{\n");
    for field in fields {
        if let Some(doc) = &field.doc {
            let doc = doc.split_whitespace().collect::<Vec<_>>().join(" ");
            out.push_str(&format!("  /** {} */\n", doc.replace("*/", "*\\/")));
        }
        let optional = if field.required { "" } else { "?" };
        out.push_str(&format!(
            "  {}{}: {};\n",
            property_key(&field.name),
            optional,
            field.ty.replace('\n', "\n  ")
        ));
    }
    out.push('}');
    out
}

/// What the response envelope's `data` field holds.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DataShape {
    /// `type XData = T`
    Alias(String),
    /// `interface XData { ... }`
    Interface(Vec<Field>),
    /// No named type; `data` is typed with this expression directly
    Inline(String),
}

impl DataShape {
    /// Inspect the first content schema of the `200` response.
    pub fn of(op: &PlannedOperation<'_>, translator: &TypeTranslator<'_>, ctx: &mut GenerationContext) -> Self {
        let location = op.location();
        let Some(schema) = op.operation.success_schema() else {
            ctx.info(
                Stage::Types,
                format!("no `200` response schema, `data` is typed `{}`", FALLBACK_TYPE),
                Some(&location),
            );
            return DataShape::Inline(FALLBACK_TYPE.to_string());
        };

        match (&schema.kind, schema.properties()) {
            (SchemaKind::Reference(_), _) | (SchemaKind::Array(_), _) => {
                DataShape::Alias(translator.translate(schema, ctx, &location))
            }
            (_, Some((properties, required))) => DataShape::Interface(
                properties
                    .iter()
                    .map(|(name, property)| {
                        Field::new(property_key(name), translator.translate(property, ctx, &location))
                            .doc(translator.field_doc(property))
                            .optional_if(!required.contains(name))
                    })
                    .collect(),
            ),
            _ => DataShape::Inline(translator.translate(schema, ctx, &location)),
        }
    }
}

#[cfg(test)]
mod tests {
    use apigen_codegen::{CodeBuilder, group_operations, plan_modules};
    use apigen_core::NamingStyle;
    use apigen_spec::{Document, GeneratorConfig};

    use super::*;

    const DOC: &str = r#"
openapi: 3.0.0
info: { title: T, version: "1" }
paths:
  /stores/{storeId}/pets/{id}:
    put:
      parameters:
        - { name: id, in: path, required: true, schema: { type: integer } }
        - { name: page-size, in: query, schema: { type: integer } }
        - { name: X-Token, in: header, required: true, schema: { type: string } }
        - { name: session, in: cookie, schema: { type: string } }
      requestBody:
        content:
          application/json:
            schema:
              type: object
              required: [name]
              properties:
                id: { type: string }
                name: { type: string }
      responses:
        "200":
          description: ok
          content:
            application/json:
              schema: { type: string }
  /raw:
    post:
      requestBody:
        required: true
        content:
          text/plain:
            schema: { type: string }
      responses: {}
"#;

    fn with_shapes(f: impl FnOnce(Vec<(RequestShape, DataShape, String, String)>, GenerationContext)) {
        with_shapes_in(DOC, f)
    }

    fn with_shapes_in(source: &str, f: impl FnOnce(Vec<(RequestShape, DataShape, String, String)>, GenerationContext)) {
        let doc = Document::parse(source).unwrap();
        let mut ctx = GenerationContext::new();
        let plans = plan_modules(group_operations(&doc), &GeneratorConfig::default(), &mut ctx);
        let translator = TypeTranslator::new(&doc, NamingStyle::PascalCase, true);

        let mut shapes = Vec::new();
        for op in &plans[0].operations {
            let request = RequestShape::of(op, &translator, &mut ctx);
            let data = DataShape::of(op, &translator, &mut ctx);
            let mut builder = CodeBuilder::typescript();
            builder.apply_fragment(request.call_object(op).wrapped("request(", ");"));
            let mut interface = CodeBuilder::typescript();
            interface.emit(&request.interface("Req", None));
            shapes.push((request, data, builder.build(), interface.build()));
        }
        f(shapes, ctx);
    }

    #[test]
    fn test_placeholders() {
        assert_eq!(placeholders("/stores/{storeId}/pets/{id}.json"), ["storeId", "id"]);
        assert!(placeholders("/pets").is_empty());
    }

    #[test]
    fn test_request_fields_and_clashes() {
        with_shapes(|shapes, ctx| {
            let (request, data, _, interface) = &shapes[0];
            let path: Vec<_> = request.path.iter().map(|f| (f.name.as_str(), f.ty.as_str())).collect();
            assert_eq!(path, [("storeId", "string"), ("id", "number")]);
            assert_eq!(request.query[0].name, "page-size");
            assert_eq!(*data, DataShape::Inline("string".to_string()));

            assert_eq!(
                interface,
                "export interface Req {\n  storeId: string;\n  id: number;\n  \"page-size\"?: number;\n  headers: {\n    \"X-Token\": string;\n  };\n  name: string;\n}\n"
            );

            let warnings: Vec<_> = ctx.warnings().map(|d| d.message.as_str()).collect();
            assert_eq!(warnings, ["body field `id` clashes with another request field, skipped"]);
            assert!(ctx.diagnostics().iter().any(|d| d.message.contains("cookie parameter `session`")));
        });
    }

    #[test]
    fn test_call_object() {
        with_shapes(|shapes, _| {
            assert_eq!(
                shapes[0].2,
                "request({\n  url: `/stores/${params.storeId}/pets/${params.id}`,\n  method: 'PUT',\n  params: {\n    \"page-size\": params[\"page-size\"],\n  },\n  headers: params.headers,\n  data: {\n    name: params.name,\n  },\n});\n"
            );
        });
    }

    #[test]
    fn test_opaque_body() {
        with_shapes(|shapes, _| {
            let (request, data, call, interface) = &shapes[1];
            assert_eq!(
                request.body,
                BodyShape::Opaque {
                    ty: "string".to_string(),
                    required: true
                }
            );
            assert_eq!(*data, DataShape::Inline("any".to_string()));
            assert!(call.contains("url: '/raw',"));
            assert!(call.contains("data: params.body,"));
            assert!(interface.contains("  body: string;\n"));
        });
    }

    #[test]
    fn test_headers_and_body_are_never_shadowed() {
        let source = r#"
openapi: 3.0.0
info: { title: T, version: "1" }
paths:
  /a:
    get:
      parameters:
        - { name: headers, in: query, schema: { type: string } }
        - { name: X-Id, in: header, schema: { type: string } }
  /b:
    post:
      parameters:
        - { name: body, in: query, schema: { type: string } }
      requestBody:
        content:
          text/plain:
            schema: { type: string }
  /c/{body}:
    put:
      requestBody:
        content:
          text/plain:
            schema: { type: string }
"#;
        with_shapes_in(source, |shapes, ctx| {
            let (request, _, call, interface) = &shapes[0];
            assert!(request.query.is_empty());
            assert_eq!(request.headers[0].name, "X-Id");
            assert_eq!(interface.matches("headers?:").count(), 1);
            assert!(call.contains("headers: params.headers,"));
            assert!(!call.contains("params: {"));

            let (request, _, call, interface) = &shapes[1];
            assert!(request.query.is_empty());
            assert!(matches!(request.body, BodyShape::Opaque { .. }));
            assert_eq!(interface.matches("body?:").count(), 1);
            assert!(call.contains("data: params.body,"));

            let (request, _, call, _) = &shapes[2];
            assert_eq!(request.path[0].name, "body");
            assert_eq!(request.body, BodyShape::None);
            assert!(!call.contains("data:"));

            let warnings: Vec<_> = ctx.warnings().map(|d| d.message.as_str()).collect();
            assert_eq!(
                warnings,
                [
                    "query parameter `headers` clashes with another request field, skipped",
                    "query parameter `body` clashes with another request field, skipped",
                    "`body` clashes with a path parameter of the same name, skipped",
                ]
            );
        });
    }
}
