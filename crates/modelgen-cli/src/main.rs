use clap::Parser;
use console::style;
use modelgen_cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    modelgen_cli::init_tracing(cli.verbose);

    if let Err(err) = cli.run().await {
        eprintln!("{} {err:#}", style("error:").red().bold());
        std::process::exit(1);
    }
}
