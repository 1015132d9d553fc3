use std::path::PathBuf;

use apigen_spec::{Document, available_tags, path_statistics};
use clap::Args;
use eyre::Result;

use super::UnwrapOrExit;

#[derive(Args)]
pub struct TagsCommand {
    /// OpenAPI document (JSON or YAML)
    pub input: PathBuf,

    /// Print the tag names only
    #[arg(short, long)]
    pub quiet: bool,
}

impl TagsCommand {
    pub fn run(&self) -> Result<()> {
        let doc = Document::from_file(&self.input).unwrap_or_exit();
        let stats = path_statistics(&doc);

        for tag in available_tags(&doc) {
            if self.quiet {
                println!("{}", tag);
            } else {
                let count = stats.by_tag.get(&tag).copied().unwrap_or(0);
                println!("{:<24} {}", tag, count);
            }
        }
        Ok(())
    }
}
