// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! OpenAPI document handling for apigen.
//!
//! Text in either JSON or YAML goes through [`Document::parse`], which
//! validates the top-level structure and normalizes the result so later
//! stages never have to branch on missing optional fields.

mod config;
mod document;
mod error;
mod filter;
mod normalize;
mod parse;
mod schema;
mod validate;

pub use config::*;
pub use document::*;
pub use error::{Error, Result, SourceContext};
pub use filter::{PathStatistics, available_tags, filter_by_tags, path_statistics};
pub use normalize::generate_operation_id;
pub use parse::read_value;
pub use schema::*;
pub use validate::validate;
