//! Fixed support files emitted next to the group modules.

mod request_js;
mod request_ts;

pub use request_js::RequestJs;
pub use request_ts::RequestTs;

/// Path of the request helper, relative to the output root.
pub(crate) fn request_path(extension: &str) -> String {
    format!("utils/request.{}", extension)
}

pub(crate) const NOT_IMPLEMENTED: &str = "new Error(\"request is not implemented\")";

pub(crate) const STUB_DOC: &str = "Send a request. Replace this stub with your HTTP client.";
