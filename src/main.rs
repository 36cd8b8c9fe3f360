//! CLI entry point for the brick mosaic builder

use brickify::io::cli::{Cli, FileProcessor};
use brickify::io::logging;
use clap::Parser;

fn main() -> brickify::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.quiet);
    let mut processor = FileProcessor::new(cli);
    processor.process().map(|_| ())
}
