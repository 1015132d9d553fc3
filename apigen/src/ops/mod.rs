//! Core operations.
//!
//! This module contains the business logic for apigen commands,
//! separated from CLI argument parsing and output rendering.

pub mod check;
pub mod config;
pub mod generate;

pub use check::check;
pub use config::{DEFAULT_CONFIG_FILE, load_config};
pub use generate::{GenerateOptions, generate, generate_json};
