mod generate;
pub use generate::GenerateCommand;

mod snapshot;
pub use snapshot::SnapshotCommand;

mod source;
pub use source::{OptionArgs, SourceArgs};

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "modelgen")]
#[command(about = "Generate Sequelize models from an existing database schema")]
#[command(version)]
pub struct Cli {
    /// Log stage progress
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub enum Command {
    /// Generate model files
    Generate(GenerateCommand),

    /// Capture the database schema into a snapshot file
    Snapshot(SnapshotCommand),
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Generate(cmd) => cmd.run().await,
            Command::Snapshot(cmd) => cmd.run().await,
        }
    }
}

/// Installs the log subscriber. `RUST_LOG` takes precedence over `verbose`.
pub fn init_tracing(verbose: bool) {
    let default = if verbose { "modelgen=debug,warn" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
