use crate::{OptionArgs, SourceArgs};
use anyhow::Result;
use clap::Parser;
use console::style;
use modelgen::FileKind;

#[derive(Parser, Debug)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(flatten)]
    pub options: OptionArgs,

    /// Print the generated code instead of writing files
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    pub async fn run(self) -> Result<()> {
        let config = self.options.config()?;
        let automate = self.source.automate(config)?;

        let generated = if self.dry_run {
            automate.generate().await?
        } else {
            automate.run().await?
        };

        for diagnostic in generated.definitions.diagnostics() {
            eprintln!("  {} {diagnostic}", style("!").yellow().bold());
        }

        let config = automate.config();

        if self.dry_run {
            for file in &generated.files {
                let dir = match file.kind {
                    FileKind::Model => config.dir.as_path(),
                    FileKind::Types => config.types_dir(),
                };

                println!(
                    "{}",
                    style(format!("// {}", dir.join(&file.file_name).display()))
                        .cyan()
                        .bold()
                );
                println!("{}", file.contents);
            }
            return Ok(());
        }

        println!();
        println!(
            "  {} {}",
            style("✓").green().bold(),
            style(format!(
                "Generated {} models ({} files) in {}",
                generated.definitions.len(),
                generated.files.len(),
                config.dir.display()
            ))
            .dim()
        );
        println!();

        Ok(())
    }
}
