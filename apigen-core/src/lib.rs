//! Core utilities and types for the apigen client generator.
//!
//! This crate provides the naming helpers and file types shared by every
//! other crate in the workspace.

mod file;
mod naming;
mod utils;

// File operations
pub use file::{FileKind, GeneratedFile, Overwrite, WriteResult, write_file};
// Naming
pub use naming::NamingStyle;
// String utilities
pub use utils::{
    contains_cjk, is_cjk, split_words, to_camel_case, to_pascal_case,
    to_snake_case,
};
