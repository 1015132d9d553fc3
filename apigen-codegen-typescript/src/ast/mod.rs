//! TypeScript AST builders for declarations, functions, imports, and exports.
//!
//! These provide a high-level API for constructing TypeScript (and the
//! JavaScript subset of it), which can then be rendered via CodeBuilder.

mod exports;
mod fns;
mod imports;
mod interface;
mod objects;
mod types;

pub use exports::Export;
pub use fns::{Fn, FnStyle, Param};
pub use imports::Import;
pub use interface::{Field, Interface};
pub use objects::JsObject;
pub use types::{Declaration, TypeAlias};
