//! utils/request.ts stub generator.

use apigen_core::{FileKind, GeneratedFile};
use apigen_spec::GeneratorConfig;

use super::{NOT_IMPLEMENTED, STUB_DOC, request_path};
use crate::{
    ast::{Field, Fn, Interface, Param},
    code_file::CodeFile,
    shared::GENERATED_HEADER,
};

/// The typed request helper the group modules import.
pub struct RequestTs {
    use_async: bool,
    include_comments: bool,
}

impl RequestTs {
    pub fn new(config: &GeneratorConfig) -> Self {
        Self {
            use_async: config.use_async,
            include_comments: config.include_comments,
        }
    }

    fn request_config() -> Interface {
        Interface::new("RequestConfig")
            .field(Field::new("url", "string"))
            .field(Field::new(
                "method",
                r#""GET" | "POST" | "PUT" | "DELETE" | "PATCH""#,
            ))
            .field(Field::new("params", "Record<string, any>").optional())
            .field(Field::new("data", "any").optional())
            .field(Field::new("headers", "Record<string, string>").optional())
    }

    fn api_response() -> Interface {
        Interface::new("ApiResponse<T = any>")
            .field(Field::new("data", "T"))
            .field(Field::new("status", "number"))
            .field(Field::new("statusText", "string"))
    }

    fn request_fn(&self) -> Fn {
        let body = if self.use_async {
            format!("throw {};", NOT_IMPLEMENTED)
        } else {
            format!("return Promise.reject({});", NOT_IMPLEMENTED)
        };
        Fn::new("request<T = any>")
            .doc(self.include_comments.then_some(STUB_DOC))
            .async_(self.use_async)
            .param(Param::new("config", "RequestConfig"))
            .returns(Some("Promise<T>"))
            .body_line(body)
    }

    pub fn render(&self) -> String {
        let mut file = CodeFile::new();
        if self.include_comments {
            file = file.header(GENERATED_HEADER);
        }
        file.add(Self::request_config())
            .add(Self::api_response())
            .add(self.request_fn())
            .render()
    }

    pub fn file(&self) -> GeneratedFile {
        GeneratedFile::new(request_path("ts"), self.render(), FileKind::TypeScript)
    }
}
