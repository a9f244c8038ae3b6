pub mod build;
pub mod catalog;
pub mod completions;

use clap::{Parser, Subcommand};

/// brickwork - Turn pictures into toy-brick mosaics
#[derive(Parser, Debug)]
#[command(name = "brickwork")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render an image as a brick mosaic
    Build(build::BuildArgs),

    /// List the brick footprint catalog
    Catalog(catalog::CatalogArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_build_requires_output() {
        assert!(Cli::try_parse_from(["brickwork", "build", "in.png"]).is_err());
    }
}
