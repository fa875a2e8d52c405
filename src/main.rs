//! CLI entry point for image quilting texture synthesis

use clap::Parser;
use quilting::io::cli::{Cli, FileProcessor};
use quilting::io::logging::init_logging;

fn main() -> quilting::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet)?;
    let mut processor = FileProcessor::new(cli);
    processor.process()
}
