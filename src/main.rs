use anyhow::Result;
use clap::Parser;
use finbank::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.run()
}
