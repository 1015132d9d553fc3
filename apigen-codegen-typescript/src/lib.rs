//! TypeScript and JavaScript client emitters for apigen.
//!
//! [`generate`] runs a whole pass: tag filtering, grouping, name planning
//! and emission through either [`TypeScriptEmitter`] or
//! [`JavaScriptEmitter`]. Both emitters share the declaration and
//! function builders in this crate and differ only in annotations and
//! file extensions.
//!
//! ```
//! use apigen_codegen_typescript::generate_from_str;
//! use apigen_spec::GeneratorConfig;
//!
//! let doc = r#"{"openapi": "3.0.0", "info": {"title": "T", "version": "1"}, "paths": {}}"#;
//! let result = generate_from_str(doc, &GeneratorConfig::default()).unwrap();
//! assert!(result.file("index.ts").is_some());
//! ```

pub mod ast;
mod code_file;
mod declarations;
mod files;
mod generator;
mod naming;
mod shape;
mod shared;
mod translator;
mod typed;
mod untyped;

pub use code_file::{CodeFile, RawCode};
pub use files::{RequestJs, RequestTs};
pub use generator::{GenerateResult, generate, generate_from_str};
pub use naming::{TS_NAMING, is_identifier, property_access, property_key};
pub use translator::{FALLBACK_TYPE, TypeTranslator};
pub use typed::TypeScriptEmitter;
pub use untyped::JavaScriptEmitter;
