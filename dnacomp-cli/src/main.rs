#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use std::sync::Arc;

use clap::Parser;
use cli::{Cli, Commands};
use cmd::{compress, decompress};
use human_panic::setup_panic;
use lazy_static::lazy_static;

use crate::logging::init_logging;
use crate::progress_bar::DnaProgressBar;

mod cli;
mod cmd;
mod logging;
mod opts;
mod progress_bar;

const COMPRESSED_EXTENSION: &str = "dnac";
const FASTA_EXTENSION: &str = "fa";

lazy_static! {
    pub(crate) static ref PROGRESS_BAR: DnaProgressBar = DnaProgressBar::new();
}

fn main() -> anyhow::Result<()> {
    setup_panic!();

    let cli: Cli = Cli::parse();

    if !cli.no_progress {
        PROGRESS_BAR.show();
    }

    init_logging(cli.verbose.log_level_filter()).expect("Could not initialize logging");

    match &cli.command {
        Commands::Compress {
            input,
            output,
            no_header,
        } => {
            let output = input.output_path(output, COMPRESSED_EXTENSION);
            if let Some(length) = input.length() {
                log::debug!("Input file {}: {} bytes", input, length);
            }

            compress::compress(
                input.path(),
                &output,
                *no_header,
                Arc::new(PROGRESS_BAR.clone()),
            )?;
        }
        Commands::Decompress { input, output } => {
            let output = input.output_path(output, FASTA_EXTENSION);
            if let Some(length) = input.length() {
                log::debug!("Input file {}: {} bytes", input, length);
            }

            decompress::decompress(input.path(), &output, Arc::new(PROGRESS_BAR.clone()))?;
        }
    }

    PROGRESS_BAR.finish();
    Ok(())
}
