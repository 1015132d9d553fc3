//! utils/request.js stub generator.

use apigen_codegen::{CodeFragment, Renderable};
use apigen_core::{FileKind, GeneratedFile};
use apigen_spec::GeneratorConfig;

use super::{NOT_IMPLEMENTED, STUB_DOC, request_path};
use crate::{
    ast::{Fn, Param},
    code_file::CodeFile,
    shared::GENERATED_HEADER,
};

/// `@typedef` for the request configuration object.
struct RequestConfigTypedef;

impl Renderable for RequestConfigTypedef {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        vec![CodeFragment::jsdoc(
            [
                "@typedef {Object} RequestConfig",
                "@property {string} url",
                r#"@property {"GET" | "POST" | "PUT" | "DELETE" | "PATCH"} method"#,
                "@property {Record<string, any>} [params]",
                "@property {any} [data]",
                "@property {Record<string, string>} [headers]",
            ]
            .join("\n"),
        )]
    }
}

/// The JSDoc-annotated request helper for JavaScript output.
pub struct RequestJs {
    use_async: bool,
    include_comments: bool,
}

impl RequestJs {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            use_async: config.use_async,
            include_comments: config.include_comments,
        }
    }

    fn request_fn(&self) -> Fn {
        let mut doc = Vec::with_capacity(4);
        if self.include_comments {
            doc.push(STUB_DOC);
        }
        doc.extend(["@template T", "@param {RequestConfig} config", "@returns {Promise<T>}"]);

        let body = if self.use_async {
            format!("throw {};", NOT_IMPLEMENTED)
        } else {
            format!("return Promise.reject({});", NOT_IMPLEMENTED)
        };
        Fn::new("request")
            .doc(Some(doc.join("\n")))
            .async_(self.use_async)
            .param(Param::untyped("config"))
            .body_line(body)
    }

    pub fn render(&self) -> String {
        let mut file = CodeFile::new();
        if self.include_comments {
            file = file.header(GENERATED_HEADER);
        }
        file.add(RequestConfigTypedef).add(self.request_fn()).render()
    }

    pub fn file(&self) -> GeneratedFile {
        GeneratedFile::new(request_path("js"), self.render(), FileKind::JavaScript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jsdoc_stub() {
        let helper = RequestJs::new(&GeneratorConfig::default());
        assert_eq!(helper.file().path, "utils/request.js");

        let out = helper.render();
        assert!(out.contains("/**\n * @typedef {Object} RequestConfig\n * @property {string} url\n"));
        assert!(out.contains(" * @property {Record<string, string>} [headers]\n */\n"));
        assert!(out.ends_with(
            " * @template T\n * @param {RequestConfig} config\n * @returns {Promise<T>}\n */\nexport async function request(config) {\n  throw new Error(\"request is not implemented\");\n}\n"
        ));
    }
}
