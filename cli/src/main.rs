mod cli;
mod commands;
mod logging;

use cli::{Cli, Commands};
use commands::{check, resolve};

pub fn run() -> anyhow::Result<()> {
    use clap::Parser;

    let cli = Cli::parse();
    logging::init(cli.verbose);
    match &cli.command {
        Commands::Resolve(args) => resolve::run(&cli, args),
        Commands::Check(args) => check::run(&cli, args),
    }
}

fn main() -> anyhow::Result<()> { run() }
