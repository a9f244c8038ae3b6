use brickwork::cli::{Cli, Commands};
use brickwork::output::Printer;
use clap::Parser;
use miette::Result;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Build(args) => brickwork::cli::build::run(args, &printer)?,
        Commands::Catalog(args) => brickwork::cli::catalog::run(args, &printer)?,
        Commands::Completions(args) => brickwork::cli::completions::run(args)?,
    }

    Ok(())
}
