use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

mod corpus;
mod extract;
mod inspect;
mod output;
mod pipeline;
mod telemetry;
mod tokenizer;
mod util;

#[derive(Parser)]
#[command(name = "docpack", version, about = "Pack sentence streams into document-aware context windows")]
struct Cli {
    /// Print a JSON run report to stderr when the command finishes
    #[arg(global = true, long, default_value_t = false)]
    report: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Pack(pipeline::pack::PackCmd),
    Extract(extract::ExtractCmd),
    Inspect(inspect::InspectCmd),
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and DOCPACK_LOG_FORMAT
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Pack(args) => pipeline::pack::run(args, cli.report)?,
        Commands::Extract(args) => extract::run(args, cli.report)?,
        Commands::Inspect(args) => inspect::run(args, cli.report)?,
    }

    Ok(())
}
