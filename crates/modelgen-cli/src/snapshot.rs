use crate::SourceArgs;
use anyhow::Result;
use clap::Parser;
use console::style;
use modelgen::{Config, SnapshotFile};
use std::path::PathBuf;

#[derive(Parser, Debug)]
pub struct SnapshotCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only these tables
    #[arg(long, value_delimiter = ',')]
    pub tables: Option<Vec<String>>,

    /// Every table except these
    #[arg(long, value_delimiter = ',')]
    pub skip_tables: Option<Vec<String>>,

    /// Write the snapshot here instead of printing it
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl SnapshotCommand {
    pub async fn run(self) -> Result<()> {
        let config = Config {
            tables: self.tables,
            skip_tables: self.skip_tables,
            ..Config::default()
        };

        let automate = self.source.automate(config)?;
        let snapshot = SnapshotFile::new(automate.dialect(), automate.tables().await?);

        match &self.output {
            Some(path) => {
                snapshot.save(path)?;
                println!(
                    "  {} {}",
                    style("✓").green().bold(),
                    style(format!(
                        "Saved {} tables to {}",
                        snapshot.tables.len(),
                        path.display()
                    ))
                    .dim()
                );
            }
            None => println!("{snapshot}"),
        }

        Ok(())
    }
}
