use std::path::PathBuf;

use apigen_core::write_file;
use apigen_spec::CONFIG_TEMPLATE;
use clap::Args;
use eyre::{Context, Result, bail};

use crate::ops::DEFAULT_CONFIG_FILE;

#[derive(Args)]
pub struct InitCommand {
    /// Where to write the config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        if self.output.exists() && !self.force {
            bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        write_file(&self.output, CONFIG_TEMPLATE)
            .wrap_err_with(|| format!("Failed to write {}", self.output.display()))?;

        println!("Created {}", self.output.display());
        println!();
        println!("Next steps:");
        println!("  apigen generate openapi.yaml");

        Ok(())
    }
}
