//! CLI entry point for the edge-matching tile solver

use clap::Parser;
use edgetile::io::cli::{Cli, TilesetProcessor};

fn main() -> edgetile::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let mut processor = TilesetProcessor::new(cli);
    processor.process()
}
