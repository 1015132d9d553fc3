use std::path::{Path, PathBuf};

use apigen_spec::{Document, PartialConfig};
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// OpenAPI document (JSON or YAML)
    pub input: PathBuf,

    /// Config file (defaults to ./apigen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Exit with an error when generation reports warnings
    #[arg(long)]
    pub deny_warnings: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let config = ops::load_config(self.config.as_deref(), Path::new("."), PartialConfig::default())
            .unwrap_or_exit();
        let doc = Document::from_file(&self.input).unwrap_or_exit();

        let report = ops::check(&doc, &config, &self.input);
        report.render(&mut TerminalOutput::new());

        if self.deny_warnings && report.has_warnings() {
            std::process::exit(1);
        }
        Ok(())
    }
}
