//! Shared code generation utilities for the apigen client generator.
//!
//! This crate provides the dialect-agnostic half of generation, used by the
//! dialect emitters in `apigen-codegen-typescript`.
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`grouping`] - Operations partitioned by primary tag
//! - [`naming`] - Function, type and module names derived from paths and tags
//! - [`plan`] - Retained groups with every name resolved
//! - [`emitter`] - The [`ModuleEmitter`](emitter::ModuleEmitter) trait driving file emission
//! - [`context`] / [`diagnostic`] - Per-pass state and non-fatal findings
//! - [`tree`] - Preview tree projected from the generated files
//! - [`testing`] - Test utilities (feature-gated)

pub mod builder;
pub mod context;
pub mod diagnostic;
pub mod emitter;
pub mod grouping;
pub mod naming;
pub mod plan;
pub mod tree;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use builder::{CodeBuilder, CodeFragment, Indent, Renderable};
pub use context::GenerationContext;
pub use diagnostic::{Diagnostic, Severity, Stage};
pub use emitter::ModuleEmitter;
pub use grouping::{GroupedOperation, OperationGroups, group_operations, retain_groups};
pub use naming::{ModulePath, NameRegistry, NamingConvention, OperationNames, function_base_name};
pub use plan::{ModulePlan, PlannedOperation, plan_modules};
pub use tree::{FileTreeNode, NodeKind, build_tree};
