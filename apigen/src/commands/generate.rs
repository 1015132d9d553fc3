use std::path::{Path, PathBuf};

use apigen_core::NamingStyle;
use apigen_spec::{Dialect, Document, ExportStyle, PartialConfig};
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// OpenAPI document (JSON or YAML)
    pub input: PathBuf,

    /// Config file (defaults to ./apigen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = "api")]
    pub output: PathBuf,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Print `{files, structure}` as JSON instead of writing to disk
    #[arg(long, conflicts_with = "dry_run")]
    pub json: bool,

    /// Do not overwrite files that already exist
    #[arg(long)]
    pub keep_existing: bool,

    #[command(flatten)]
    pub overrides: ConfigOverrides,
}

/// Flags that override values from the config file.
#[derive(Args, Default)]
pub struct ConfigOverrides {
    /// Output language: typescript or javascript
    #[arg(short, long)]
    pub language: Option<Dialect>,

    /// Only generate these tags (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub tags: Option<Vec<String>>,

    /// Never generate these tags (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude_tags: Option<Vec<String>>,

    /// Function naming: camelCase, snake_case or PascalCase
    #[arg(long)]
    pub function_naming: Option<NamingStyle>,

    /// Type naming: camelCase, snake_case or PascalCase
    #[arg(long)]
    pub type_naming: Option<NamingStyle>,

    /// Export style: named or default
    #[arg(long)]
    pub export_style: Option<ExportStyle>,

    /// Inline types into each module instead of a shared types file
    #[arg(long)]
    pub inline_types: bool,

    /// Skip the index module
    #[arg(long)]
    pub no_index: bool,

    /// Skip the request helper stub
    #[arg(long)]
    pub no_utils: bool,

    /// Return promises directly instead of async functions
    #[arg(long)]
    pub no_async: bool,

    /// Leave out doc comments
    #[arg(long)]
    pub no_comments: bool,

    /// Import line placed at the top of every module
    #[arg(long)]
    pub import_template: Option<String>,
}

impl ConfigOverrides {
    /// Only flags that were given are set.
    pub fn to_partial(&self) -> PartialConfig {
        let off = |flag: bool| flag.then_some(false);
        PartialConfig {
            code_language: self.language,
            output_tags: self.tags.clone(),
            exclude_tags: self.exclude_tags.clone(),
            function_naming: self.function_naming,
            type_naming: self.type_naming,
            export_style: self.export_style,
            separate_types: off(self.inline_types),
            generate_index: off(self.no_index),
            generate_utils: off(self.no_utils),
            use_async: off(self.no_async),
            include_comments: off(self.no_comments),
            import_template: self.import_template.clone(),
            request_util_path: None,
        }
    }
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = ops::load_config(
            self.config.as_deref(),
            Path::new("."),
            self.overrides.to_partial(),
        )
        .unwrap_or_exit();
        let doc = Document::from_file(&self.input).unwrap_or_exit();

        if self.json {
            println!("{}", ops::generate_json(&doc, &config)?);
            return Ok(());
        }

        let report = ops::generate(
            &doc,
            &config,
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                keep_existing: self.keep_existing,
            },
        )?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        overrides: ConfigOverrides,
    }

    #[test]
    fn test_unset_flags_leave_config_alone() {
        let harness = Harness::try_parse_from(["apigen"]).unwrap();
        assert_eq!(harness.overrides.to_partial(), PartialConfig::default());
    }

    #[test]
    fn test_flags_become_overrides() {
        let harness = Harness::try_parse_from([
            "apigen",
            "--language",
            "js",
            "--tags",
            "pets,store",
            "--function-naming",
            "snake_case",
            "--no-async",
            "--inline-types",
        ])
        .unwrap();
        let partial = harness.overrides.to_partial();

        assert_eq!(partial.code_language, Some(Dialect::JavaScript));
        assert_eq!(partial.output_tags, Some(vec!["pets".to_string(), "store".to_string()]));
        assert_eq!(partial.function_naming, Some(NamingStyle::SnakeCase));
        assert_eq!(partial.use_async, Some(false));
        assert_eq!(partial.separate_types, Some(false));
        assert_eq!(partial.include_comments, None);
    }
}
